use crate::{
    model::{ModelDef, ModelField, ModelFieldKind},
    schema::RecordSchemaBuilder,
};
use fieldwire_core::field::{
    BooleanField, ChoiceField, DecimalField, Field, FieldOptions, FloatField, IntegerField,
    NullPolicy, StringField, UrlField, UuidField,
};
use std::{fmt, sync::Arc};
use tracing::debug;

type Predicate = Arc<dyn Fn(&ModelField) -> bool + Send + Sync>;
type Factory = Arc<dyn Fn(&ModelField, FieldOptions) -> Box<dyn Field> + Send + Sync>;

///
/// Rule
///
/// One mapping entry: the first rule whose predicate accepts a model
/// attribute builds its field.
///

#[derive(Clone)]
pub struct Rule {
    name: String,
    predicate: Predicate,
    factory: Factory,
}

impl Rule {
    pub fn new<P, F>(name: impl Into<String>, predicate: P, factory: F) -> Self
    where
        P: Fn(&ModelField) -> bool + Send + Sync + 'static,
        F: Fn(&ModelField, FieldOptions) -> Box<dyn Field> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
            factory: Arc::new(factory),
        }
    }

    /// Rule matching a fixed set of attribute kinds.
    pub fn kinds<F>(name: impl Into<String>, kinds: &'static [ModelFieldKind], factory: F) -> Self
    where
        F: Fn(&ModelField, FieldOptions) -> Box<dyn Field> + Send + Sync + 'static,
    {
        Self::new(name, move |model| kinds.contains(&model.kind), factory)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn accepts(&self, model: &ModelField) -> bool {
        (self.predicate)(model)
    }

    #[must_use]
    pub fn build(&self, model: &ModelField, options: FieldOptions) -> Box<dyn Field> {
        (self.factory)(model, options)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish_non_exhaustive()
    }
}

///
/// ModelAdapter
///
/// Maps model attributes to field declarations through an ordered rule
/// list. Only the public field constructors are used.
///

#[derive(Clone, Debug)]
pub struct ModelAdapter {
    rules: Vec<Rule>,
}

impl Default for ModelAdapter {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

impl ModelAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter with no rules at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule ahead of every existing one.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.insert(0, rule);
        self
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Options every mapped field starts from.
    #[must_use]
    pub fn options_for(model: &ModelField) -> FieldOptions {
        let mut options = FieldOptions {
            default: model.default.clone(),
            ..FieldOptions::default()
        };

        if model.primary_key {
            options.identity = true;
            options.required = false;
            options.on_null = NullPolicy::Hide;
        }
        if model.null || model.blank {
            options.required = false;
        }

        options
    }

    /// Field for one attribute; `None` when no rule accepts it.
    #[must_use]
    pub fn field_for(&self, model: &ModelField) -> Option<Box<dyn Field>> {
        let rule = self.rules.iter().find(|rule| rule.accepts(model))?;

        Some(rule.build(model, Self::options_for(model)))
    }

    /// Declare every model attribute the builder does not already cover.
    /// Returns the attribute names the schema now covers, in model order.
    pub fn augment(&self, builder: &mut RecordSchemaBuilder, model: &ModelDef) -> Vec<String> {
        let mut covered = Vec::new();

        for attr in &model.fields {
            if builder.has_field(&attr.name) {
                covered.push(attr.name.clone());
                continue;
            }

            match self.field_for(attr) {
                Some(field) => {
                    builder.push_field(attr.name.clone(), field);
                    covered.push(attr.name.clone());
                }
                None => debug!(
                    model = %model.name,
                    attribute = %attr.name,
                    kind = ?attr.kind,
                    "model attribute has no field mapping"
                ),
            }
        }

        covered
    }
}

fn default_rules() -> Vec<Rule> {
    use ModelFieldKind as K;

    vec![
        Rule::new(
            "choice",
            |model| !model.choices.is_empty(),
            |model, options| Box::new(ChoiceField::new(model.choices.clone()).options(options)),
        ),
        Rule::kinds(
            "integer",
            &[K::Auto, K::Integer, K::SmallInteger],
            |_, options| Box::new(IntegerField::new().options(options)),
        ),
        Rule::kinds(
            "positive_integer",
            &[K::PositiveInteger, K::PositiveSmallInteger],
            |_, options| Box::new(IntegerField::positive().options(options)),
        ),
        Rule::kinds("float", &[K::Float], |_, options| {
            Box::new(FloatField::new().options(options))
        }),
        Rule::kinds("decimal", &[K::Decimal], |model, options| {
            let field = DecimalField::new().options(options);
            Box::new(match model.decimal_places {
                Some(dp) => field.decimal_places(dp),
                None => field,
            })
        }),
        Rule::kinds("email", &[K::Email], |model, options| {
            Box::new(bounded(StringField::email().options(options), model))
        }),
        Rule::kinds(
            "char",
            &[K::Char, K::Slug, K::CommaSeparatedInteger],
            |model, options| Box::new(bounded(StringField::new().options(options), model)),
        ),
        Rule::kinds("text", &[K::Text], |_, options| {
            Box::new(StringField::new().options(options))
        }),
        Rule::kinds("url", &[K::Url], |model, options| {
            let field = UrlField::new().options(options);
            Box::new(match model.max_length {
                Some(max) => field.max_length(max),
                None => field,
            })
        }),
        Rule::kinds("boolean", &[K::Boolean, K::NullBoolean], |_, options| {
            Box::new(BooleanField::new().options(options))
        }),
        Rule::kinds("uuid", &[K::Uuid], |_, options| {
            Box::new(UuidField::new().options(options))
        }),
    ]
}

// character-backed attributes carry their declared length bound
fn bounded(field: StringField, model: &ModelField) -> StringField {
    match model.max_length {
        Some(max) => field.max_length(max),
        None => field,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RecordSchema;
    use fieldwire_core::{field::FieldKind, value::Value};

    fn attr(name: &str, kind: ModelFieldKind) -> ModelField {
        ModelField::new(name, kind)
    }

    #[test]
    fn kinds_map_through_ordered_rules() {
        let adapter = ModelAdapter::new();
        let cases = [
            (ModelFieldKind::Auto, FieldKind::Integer),
            (ModelFieldKind::PositiveSmallInteger, FieldKind::Integer),
            (ModelFieldKind::Float, FieldKind::Float),
            (ModelFieldKind::Decimal, FieldKind::Decimal),
            (ModelFieldKind::Email, FieldKind::Email),
            (ModelFieldKind::Slug, FieldKind::String),
            (ModelFieldKind::Url, FieldKind::Url),
            (ModelFieldKind::NullBoolean, FieldKind::Boolean),
            (ModelFieldKind::Uuid, FieldKind::Uuid),
        ];

        for (kind, expected) in cases {
            let field = adapter.field_for(&attr("x", kind)).unwrap();
            assert_eq!(field.kind(), expected, "{kind:?}");
        }

        for kind in [ModelFieldKind::Date, ModelFieldKind::DateTime, ModelFieldKind::Time] {
            assert!(adapter.field_for(&attr("x", kind)).is_none());
        }
    }

    #[test]
    fn options_follow_attribute_flags() {
        let mut pk = attr("id", ModelFieldKind::Auto);
        pk.primary_key = true;
        let options = ModelAdapter::options_for(&pk);
        assert!(options.identity);
        assert!(!options.required);
        assert_eq!(options.on_null, NullPolicy::Hide);

        let mut blank = attr("note", ModelFieldKind::Text);
        blank.blank = true;
        assert!(!ModelAdapter::options_for(&blank).required);

        assert!(ModelAdapter::options_for(&attr("title", ModelFieldKind::Char)).required);
    }

    #[test]
    fn length_bound_applies_to_every_character_kind() {
        let adapter = ModelAdapter::new();

        for (kind, short, long) in [
            (ModelFieldKind::Email, "a@b.io", "someone@example.com"),
            (ModelFieldKind::Slug, "short", "far-too-long-slug"),
            (ModelFieldKind::CommaSeparatedInteger, "1,2", "1,2,3,4,5,6"),
            (ModelFieldKind::Url, "http://a.io", "https://example.com/path"),
        ] {
            let mut model = attr("x", kind);
            model.max_length = Some(12);
            let mut field = adapter.field_for(&model).unwrap();

            field.set_value(Value::from(short));
            assert!(field.validate().is_ok(), "{kind:?}");

            field.set_value(Value::from(long));
            let err = field.validate().unwrap_err();
            assert!(err.to_string().contains("at most 12 characters"), "{kind:?}: {err}");
        }

        let mut text = attr("body", ModelFieldKind::Text);
        text.max_length = Some(4);
        let mut field = adapter.field_for(&text).unwrap();
        field.set_value(Value::from("longer than four"));
        assert!(field.validate().is_ok());
    }

    #[test]
    fn choices_win_over_kind() {
        let mut status = attr("status", ModelFieldKind::Date);
        status.choices = vec![("Draft", "d").into(), ("Live", "l").into()];

        let field = ModelAdapter::new().field_for(&status).unwrap();
        assert_eq!(field.kind(), FieldKind::Choice);
    }

    #[test]
    fn custom_rule_takes_priority() {
        let adapter = ModelAdapter::new().with_rule(Rule::kinds(
            "date_as_text",
            &[ModelFieldKind::Date],
            |_, options| Box::new(StringField::new().options(options)),
        ));

        let field = adapter
            .field_for(&attr("born", ModelFieldKind::Date))
            .unwrap();
        assert_eq!(field.kind(), FieldKind::String);
        assert_eq!(adapter.rules()[0].name(), "date_as_text");
    }

    #[test]
    fn augment_skips_declared_and_unmapped_attributes() {
        let mut builder = RecordSchema::builder("person")
            .field("name", StringField::new().map_field("full_name"));

        let model = ModelDef {
            name: "Person".into(),
            fields: vec![
                attr("id", ModelFieldKind::Auto),
                attr("full_name", ModelFieldKind::Char),
                attr("born", ModelFieldKind::Date),
                attr("email", ModelFieldKind::Email),
            ],
        };

        let covered = ModelAdapter::new().augment(&mut builder, &model);
        assert_eq!(covered, vec!["id", "full_name", "email"]);

        let schema = builder.build();
        assert_eq!(schema.field_names(), vec!["name", "id", "email"]);
    }
}
