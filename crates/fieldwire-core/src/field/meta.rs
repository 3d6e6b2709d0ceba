use crate::{
    error::{FieldValueError, Violation},
    validator::{SharedValidator, Validator, run_all},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

///
/// NullPolicy
/// What a field renders when its value is empty.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Suppress the field entirely.
    Hide,
    /// Render a null marker.
    #[default]
    Null,
    /// Render the declared default.
    Default,
}

///
/// FieldOptions
///
/// Keyword surface shared by every field kind. Deserializable so field
/// declarations can be loaded from configuration.
///

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldOptions {
    pub names: Vec<String>,
    pub required: bool,
    pub default: Option<Value>,
    pub identity: bool,
    pub on_null: NullPolicy,
    pub map_field: Option<String>,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            required: true,
            default: None,
            identity: false,
            on_null: NullPolicy::default(),
            map_field: None,
        }
    }
}

///
/// FieldMeta
///
/// Declaration-level state of a field plus the per-instance ignore flag.
///

#[derive(Clone, Debug)]
pub struct FieldMeta {
    names: Vec<String>,
    required: bool,
    default: Option<Value>,
    identity: bool,
    on_null: NullPolicy,
    map_field: Option<String>,
    validators: Vec<SharedValidator>,
    ignore: bool,
}

impl Default for FieldMeta {
    fn default() -> Self {
        Self::new(FieldOptions::default())
    }
}

impl FieldMeta {
    #[must_use]
    pub fn new(options: FieldOptions) -> Self {
        let mut meta = Self {
            names: Vec::new(),
            required: true,
            default: None,
            identity: false,
            on_null: NullPolicy::default(),
            map_field: None,
            validators: Vec::new(),
            ignore: false,
        };
        meta.apply(options);

        meta
    }

    /// Overwrite the keyword options, keeping validators intact.
    pub fn apply(&mut self, options: FieldOptions) {
        let FieldOptions {
            names,
            required,
            default,
            identity,
            on_null,
            map_field,
        } = options;

        for name in names {
            self.add_name(name);
        }
        self.required = required;
        self.default = default;
        self.identity = identity;
        self.on_null = on_null;
        self.map_field = map_field;
    }

    /// Fresh per-instance copy of this declaration.
    #[must_use]
    pub fn spawn(&self) -> Self {
        Self {
            ignore: false,
            ..self.clone()
        }
    }

    ///
    /// NAMES
    ///

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn primary_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Append an alias; duplicates are ignored.
    pub fn add_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name) || self.map_field.as_deref() == Some(name)
    }

    #[must_use]
    pub fn map_field(&self) -> Option<&str> {
        self.map_field.as_deref()
    }

    pub fn set_map_field(&mut self, name: impl Into<String>) {
        self.map_field = Some(name.into());
    }

    ///
    /// FLAGS
    ///

    /// Identity fields are never required.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required && !self.identity
    }

    pub const fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.identity
    }

    pub const fn set_identity(&mut self, identity: bool) {
        self.identity = identity;
    }

    /// Identity fields are always hidden when empty.
    #[must_use]
    pub const fn null_policy(&self) -> NullPolicy {
        if self.identity {
            NullPolicy::Hide
        } else {
            self.on_null
        }
    }

    pub const fn set_null_policy(&mut self, on_null: NullPolicy) {
        self.on_null = on_null;
    }

    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn set_default(&mut self, default: Option<Value>) {
        self.default = default;
    }

    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        self.ignore
    }

    pub const fn set_ignore(&mut self, ignore: bool) {
        self.ignore = ignore;
    }

    ///
    /// VALIDATION
    ///

    #[must_use]
    pub fn validators(&self) -> &[SharedValidator] {
        &self.validators
    }

    pub fn push_validator(&mut self, validator: impl Validator + 'static) {
        self.validators.push(Arc::new(validator));
    }

    pub fn push_shared_validator(&mut self, validator: SharedValidator) {
        self.validators.push(validator);
    }

    /// Render for an empty value according to the null policy; `None` means
    /// the field is hidden.
    #[must_use]
    pub fn render_null(&self) -> Option<Value> {
        match self.null_policy() {
            NullPolicy::Hide => None,
            NullPolicy::Null => Some(Value::Null),
            NullPolicy::Default => Some(self.default.clone().unwrap_or(Value::Null)),
        }
    }

    /// Outcome for an empty value: a required field without a default fails
    /// with exactly one required violation.
    pub fn check_empty(&self) -> Result<(), FieldValueError> {
        if self.is_required() && self.default.is_none() {
            Err(self.fail(vec![Violation::required()]))
        } else {
            Ok(())
        }
    }

    /// Base pipeline: required/empty check, then every validator.
    pub fn check(&self, value: &Value) -> Result<(), FieldValueError> {
        self.check_with(value, Vec::new)
    }

    /// Base pipeline with kind-specific violations computed ahead of the
    /// declared validators.
    pub fn check_with(
        &self,
        value: &Value,
        intrinsic: impl FnOnce() -> Vec<Violation>,
    ) -> Result<(), FieldValueError> {
        if value.is_empty() {
            return self.check_empty();
        }

        let mut violations = intrinsic();
        violations.extend(run_all(&self.validators, value));

        if violations.is_empty() {
            Ok(())
        } else {
            Err(self.fail(violations))
        }
    }

    /// Build the field's error, logging it once.
    #[must_use]
    pub fn fail(&self, violations: Vec<Violation>) -> FieldValueError {
        debug!(
            field = self.primary_name().unwrap_or_default(),
            violations = violations.len(),
            "field validation failed"
        );

        FieldValueError::new(self.names.clone(), violations)
    }
}

///
/// TESTS
///
