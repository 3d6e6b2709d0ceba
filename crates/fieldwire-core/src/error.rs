use std::{collections::BTreeMap, fmt};
use thiserror::Error as ThisError;

///
/// ViolationKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ViolationKind {
    Required,
    Range,
    Format,
    Choice,
    Compound,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Required => "required",
            Self::Range => "range",
            Self::Format => "format",
            Self::Choice => "choice",
            Self::Compound => "compound",
        };

        f.write_str(label)
    }
}

///
/// Violation
///
/// One named validation failure. `Compound` aggregates the failures of a
/// list field's items, keyed by item index.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Violation {
    #[error("{0}")]
    Required(String),

    #[error("{0}")]
    Range(String),

    #[error("{0}")]
    Format(String),

    #[error("{0}")]
    Choice(String),

    #[error("{} item(s) failed validation", .0.len())]
    Compound(Vec<ItemViolation>),
}

impl Violation {
    pub const REQUIRED_MESSAGE: &'static str = "This field is required.";

    #[must_use]
    pub fn required() -> Self {
        Self::Required(Self::REQUIRED_MESSAGE.to_string())
    }

    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn choice(msg: impl Into<String>) -> Self {
        Self::Choice(msg.into())
    }

    #[must_use]
    pub const fn kind(&self) -> ViolationKind {
        match self {
            Self::Required(_) => ViolationKind::Required,
            Self::Range(_) => ViolationKind::Range,
            Self::Format(_) => ViolationKind::Format,
            Self::Choice(_) => ViolationKind::Choice,
            Self::Compound(_) => ViolationKind::Compound,
        }
    }

    /// Child item failures; empty for scalar violations.
    #[must_use]
    pub fn items(&self) -> &[ItemViolation] {
        match self {
            Self::Compound(items) => items,
            _ => &[],
        }
    }
}

///
/// ItemViolation
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemViolation {
    pub index: usize,
    pub violations: Vec<Violation>,
}

///
/// FieldValueError
///
/// Every violation a field produced during one `validate` call, together
/// with the names the field is addressed by.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("field '{}' failed validation: {}", primary(.names), join_messages(.violations))]
pub struct FieldValueError {
    pub names: Vec<String>,
    pub violations: Vec<Violation>,
}

impl FieldValueError {
    #[must_use]
    pub const fn new(names: Vec<String>, violations: Vec<Violation>) -> Self {
        Self { names, violations }
    }

    #[must_use]
    pub fn primary_name(&self) -> &str {
        primary(&self.names)
    }

    /// True if any violation (at any depth) has the given kind.
    #[must_use]
    pub fn has_kind(&self, kind: ViolationKind) -> bool {
        fn walk(violations: &[Violation], kind: ViolationKind) -> bool {
            violations
                .iter()
                .any(|v| v.kind() == kind || v.items().iter().any(|i| walk(&i.violations, kind)))
        }

        walk(&self.violations, kind)
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<ViolationKind> {
        self.violations.iter().map(Violation::kind).collect()
    }

    /// Flatten into messages keyed by path, e.g. `tags[1]`.
    #[must_use]
    pub fn issues(&self) -> BTreeMap<String, Vec<String>> {
        let mut issues = BTreeMap::new();
        collect_issues(&mut issues, self.primary_name(), &self.violations);

        issues
    }
}

fn collect_issues(issues: &mut BTreeMap<String, Vec<String>>, path: &str, violations: &[Violation]) {
    for violation in violations {
        match violation {
            Violation::Compound(items) => {
                for item in items {
                    let item_path = format!("{path}[{}]", item.index);
                    collect_issues(issues, &item_path, &item.violations);
                }
            }
            other => issues
                .entry(path.to_string())
                .or_default()
                .push(other.to_string()),
        }
    }
}

fn primary(names: &[String]) -> &str {
    names.first().map_or("", String::as_str)
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

///
/// IgnoreField
///
/// Signal raised by a clean hook to skip a field for one assignment.
/// Not an error: the record layer absorbs it.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct IgnoreField;

///
/// TESTS
///
