use crate::{
    field::{Field, FieldKind, FieldMeta},
    types::Uuid,
    validator::{IsEmail, IsString, IsUrl, IsUuid, MaxLength, MinLength},
    value::Value,
};
use url::Url;

///
/// StringField
///
/// Plain text, or an email address when built with `StringField::email`.
///

#[derive(Clone, Debug)]
pub struct StringField {
    meta: FieldMeta,
    value: Value,
    kind: FieldKind,
}

impl StringField {
    #[must_use]
    pub fn new() -> Self {
        let mut meta = FieldMeta::default();
        meta.push_validator(IsString);

        Self {
            meta,
            value: Value::Null,
            kind: FieldKind::String,
        }
    }

    /// String field that must hold an email address.
    #[must_use]
    pub fn email() -> Self {
        let mut field = Self::new();
        field.meta.push_validator(IsEmail);
        field.kind = FieldKind::Email;

        field
    }

    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.meta.push_validator(MaxLength::new(max));
        self
    }

    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.meta.push_validator(MinLength::new(min));
        self
    }
}

impl Default for StringField {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for StringField {
    scalar_field_common!();

    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn set_value(&mut self, raw: Value) {
        self.value = raw;
    }

    fn native(&self) -> Value {
        Value::Text(self.value.to_text())
    }

    fn domain(&self) -> Value {
        Value::Text(self.value.to_text())
    }
}

///
/// UuidField
///
/// Text that parses as a UUID is normalized on assignment; native output is
/// the hyphenated text, domain output the UUID itself.
///

#[derive(Clone, Debug)]
pub struct UuidField {
    meta: FieldMeta,
    value: Value,
}

impl UuidField {
    #[must_use]
    pub fn new() -> Self {
        let mut meta = FieldMeta::default();
        meta.push_validator(IsUuid);

        Self {
            meta,
            value: Value::Null,
        }
    }

    #[must_use]
    pub const fn uuid(&self) -> Option<Uuid> {
        match self.value {
            Value::Uuid(id) => Some(id),
            _ => None,
        }
    }
}

impl Default for UuidField {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for UuidField {
    scalar_field_common!();

    fn kind(&self) -> FieldKind {
        FieldKind::Uuid
    }

    fn set_value(&mut self, raw: Value) {
        let parsed = raw.as_text().and_then(|s| Uuid::parse_str(s.trim()).ok());
        self.value = parsed.map_or(raw, Value::Uuid);
    }

    fn native(&self) -> Value {
        match &self.value {
            Value::Uuid(id) => Value::Text(id.hyphenated().to_string()),
            other => Value::Text(other.to_text()),
        }
    }

    fn domain(&self) -> Value {
        self.value.clone()
    }
}

///
/// UrlField
///
/// With a base, relative values are joined onto it; the base always ends in
/// `/`. Absolute URLs and values already under the base are kept as given,
/// so a rendered value can be assigned back unchanged.
///

#[derive(Clone, Debug)]
pub struct UrlField {
    meta: FieldMeta,
    value: Value,
    base: Option<String>,
}

impl UrlField {
    #[must_use]
    pub fn new() -> Self {
        let mut meta = FieldMeta::default();
        meta.push_validator(IsUrl);

        Self {
            meta,
            value: Value::Null,
            base: None,
        }
    }

    #[must_use]
    pub fn base(mut self, base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.is_empty() && !base.ends_with('/') {
            base.push('/');
        }
        self.base = (!base.is_empty()).then_some(base);

        self
    }

    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.meta.push_validator(MaxLength::new(max));
        self
    }

    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base.as_deref()
    }
}

impl Default for UrlField {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for UrlField {
    scalar_field_common!();

    fn kind(&self) -> FieldKind {
        FieldKind::Url
    }

    fn set_value(&mut self, raw: Value) {
        self.value = match &self.base {
            Some(base) if !raw.is_empty() => {
                let text = raw.to_text();
                if text.starts_with(base.as_str()) || Url::parse(&text).is_ok() {
                    Value::Text(text)
                } else {
                    Value::Text(format!("{base}{text}"))
                }
            }
            _ => raw,
        };
    }

    fn native(&self) -> Value {
        Value::Text(self.value.to_text())
    }

    fn domain(&self) -> Value {
        Value::Text(self.value.to_text())
    }
}

impl_field_builder!(StringField, UuidField, UrlField);
