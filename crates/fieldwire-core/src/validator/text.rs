use crate::{error::Violation, types::Uuid, validator::Validator, value::Value};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern compiles")
});

const URL_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

///
/// IsInteger
///

#[derive(Clone, Copy, Debug, Default)]
pub struct IsInteger;

impl Validator for IsInteger {
    fn validate(&self, value: &Value) -> Result<(), Violation> {
        value
            .as_i64()
            .map(|_| ())
            .ok_or_else(|| Violation::format("Enter a whole number."))
    }
}

///
/// IsFloat
///

#[derive(Clone, Copy, Debug, Default)]
pub struct IsFloat;

impl Validator for IsFloat {
    fn validate(&self, value: &Value) -> Result<(), Violation> {
        value
            .as_f64()
            .map(|_| ())
            .ok_or_else(|| Violation::format("Enter a number."))
    }
}

///
/// IsDecimal
///

#[derive(Clone, Copy, Debug, Default)]
pub struct IsDecimal;

impl Validator for IsDecimal {
    fn validate(&self, value: &Value) -> Result<(), Violation> {
        value
            .as_decimal()
            .map(|_| ())
            .ok_or_else(|| Violation::format("Enter a number."))
    }
}

///
/// IsString
/// Any scalar renders as text; lists do not.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct IsString;

impl Validator for IsString {
    fn validate(&self, value: &Value) -> Result<(), Violation> {
        match value {
            Value::List(_) => Err(Violation::format("Enter a valid string.")),
            _ => Ok(()),
        }
    }
}

///
/// IsEmail
///

#[derive(Clone, Copy, Debug, Default)]
pub struct IsEmail;

impl Validator for IsEmail {
    fn validate(&self, value: &Value) -> Result<(), Violation> {
        match value.as_text() {
            Some(s) if EMAIL_RE.is_match(s) => Ok(()),
            _ => Err(Violation::format("Enter a valid email address.")),
        }
    }
}

///
/// IsUuid
///

#[derive(Clone, Copy, Debug, Default)]
pub struct IsUuid;

impl Validator for IsUuid {
    fn validate(&self, value: &Value) -> Result<(), Violation> {
        match value {
            Value::Uuid(_) => Ok(()),
            Value::Text(s) if Uuid::parse_str(s.trim()).is_ok() => Ok(()),
            _ => Err(Violation::format("Enter a valid UUID.")),
        }
    }
}

///
/// IsUrl
///

#[derive(Clone, Copy, Debug, Default)]
pub struct IsUrl;

impl Validator for IsUrl {
    fn validate(&self, value: &Value) -> Result<(), Violation> {
        let valid = value
            .as_text()
            .and_then(|s| Url::parse(s).ok())
            .is_some_and(|url| URL_SCHEMES.contains(&url.scheme()) && url.has_host());

        if valid {
            Ok(())
        } else {
            Err(Violation::format("Enter a valid URL."))
        }
    }
}

///
/// TESTS
///
