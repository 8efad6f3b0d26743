//! Input validation helpers
//!
//! Text length limits plus [`FieldReader`], which walks a JSON write body
//! and collects `field → [messages]` errors the way clients expect them.

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::{Map, Value};
use shared::error::FieldErrors;
use validator::ValidateEmail;

use crate::utils::links::{Links, Resource};
use crate::utils::time::parse_datetime;

// ── Text length limits ──────────────────────────────────────────────

/// Employee names
pub const MAX_NAME_LEN: usize = 255;

/// Department names
pub const MAX_DEPARTMENT_NAME_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Appointment titles
pub const MAX_TITLE_LEN: usize = 255;

/// Free-form descriptions
pub const MAX_DESCRIPTION_LEN: usize = 10_000;

// ── Messages ────────────────────────────────────────────────────────

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_BLANK: &str = "This field may not be blank.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";
pub const INVALID_DATE: &str = "Enter a valid date.";
pub const INVALID_DATETIME: &str = "Datetime has wrong format. Use one of these formats instead: YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z].";
pub const OBJECT_MISSING: &str = "Invalid hyperlink - Object does not exist.";

/// Which write is being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// POST
    Create,
    /// PUT: every required field must be sent
    Replace,
    /// PATCH: only fields present are validated
    Partial,
}

#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    required: bool,
    allow_blank: bool,
    max_len: usize,
}

impl TextRule {
    pub const fn required(max_len: usize) -> Self {
        Self {
            required: true,
            allow_blank: false,
            max_len,
        }
    }

    pub const fn optional(max_len: usize) -> Self {
        Self {
            required: false,
            allow_blank: true,
            max_len,
        }
    }
}

/// Collects errors for every field instead of stopping at the first one
pub struct FieldReader<'a> {
    data: &'a Map<String, Value>,
    mode: WriteMode,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    pub fn new(body: &'a Value, mode: WriteMode) -> Result<Self, FieldErrors> {
        match body {
            Value::Object(data) => Ok(Self {
                data,
                mode,
                errors: FieldErrors::new(),
            }),
            other => Err(FieldErrors::single(
                FieldErrors::NON_FIELD,
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    type_name(other)
                ),
            )),
        }
    }

    fn take(&mut self, field: &str, required: bool) -> Option<&'a Value> {
        let value = self.data.get(field);
        if value.is_none() && required && self.mode != WriteMode::Partial {
            self.errors.add(field, REQUIRED);
        }
        value
    }

    pub fn text(&mut self, field: &str, rule: TextRule) -> Option<String> {
        let text = match self.take(field, rule.required)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Null => {
                self.errors.add(field, NOT_NULL);
                return None;
            }
            _ => {
                self.errors.add(field, NOT_A_STRING);
                return None;
            }
        };
        if text.is_empty() && !rule.allow_blank {
            self.errors.add(field, NOT_BLANK);
            return None;
        }
        if text.chars().count() > rule.max_len {
            self.errors.add(
                field,
                format!("Ensure this field has no more than {} characters.", rule.max_len),
            );
            return None;
        }
        Some(text)
    }

    pub fn email(&mut self, field: &str, rule: TextRule) -> Option<String> {
        let email = self.text(field, rule)?;
        if !email.is_empty() && !email.validate_email() {
            self.errors.add(field, INVALID_EMAIL);
            return None;
        }
        Some(email)
    }

    pub fn choice<T>(
        &mut self,
        field: &str,
        required: bool,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let value = self.take(field, required)?;
        let raw = match value {
            Value::Null => {
                self.errors.add(field, NOT_NULL);
                return None;
            }
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let parsed = parse(&raw);
        if parsed.is_none() {
            self.errors.add(field, format!("\"{raw}\" is not a valid choice."));
        }
        parsed
    }

    pub fn datetime(
        &mut self,
        field: &str,
        required: bool,
        offset: FixedOffset,
    ) -> Option<DateTime<Utc>> {
        let parsed = match self.take(field, required)? {
            Value::String(s) => parse_datetime(s, offset),
            Value::Null => {
                self.errors.add(field, NOT_NULL);
                return None;
            }
            _ => None,
        };
        if parsed.is_none() {
            self.errors.add(field, INVALID_DATETIME);
        }
        parsed
    }

    /// `Some(None)` is an explicit null on a nullable relation
    pub fn hyperlink(
        &mut self,
        field: &str,
        required: bool,
        links: &Links,
        resource: Resource,
    ) -> Option<Option<i64>> {
        match self.take(field, required)? {
            Value::Null => Some(None),
            value => self.resolve(field, value, links, resource).map(Some),
        }
    }

    pub fn hyperlinks(&mut self, field: &str, links: &Links, resource: Resource) -> Option<Vec<i64>> {
        let items = match self.take(field, false)? {
            Value::Array(items) => items,
            Value::Null => {
                self.errors.add(field, NOT_NULL);
                return None;
            }
            other => {
                self.errors.add(
                    field,
                    format!(
                        "Expected a list of items but got type \"{}\".",
                        type_name(other)
                    ),
                );
                return None;
            }
        };

        let before = self.errors.get(field).map_or(0, <[String]>::len);
        let ids: Vec<i64> = items
            .iter()
            .filter_map(|item| match item {
                Value::Null => {
                    self.errors.add(field, NOT_NULL);
                    None
                }
                value => self.resolve(field, value, links, resource),
            })
            .collect();
        let after = self.errors.get(field).map_or(0, <[String]>::len);
        (before == after).then_some(ids)
    }

    fn resolve(&mut self, field: &str, value: &Value, links: &Links, resource: Resource) -> Option<i64> {
        let Value::String(href) = value else {
            self.errors.add(
                field,
                format!(
                    "Incorrect type. Expected URL string, received {}.",
                    type_name(value)
                ),
            );
            return None;
        };
        match links.resolve(resource, href) {
            Ok(id) => Some(id),
            Err(message) => {
                self.errors.add(field, message);
                None
            }
        }
    }

    pub fn finish(self) -> Result<(), FieldErrors> {
        self.errors.into_result()
    }
}

/// JSON type names as clients see them in messages
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
