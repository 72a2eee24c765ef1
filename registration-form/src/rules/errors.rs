use ::std::collections::BTreeMap;
use ::std::fmt;
use serde::{Serialize, Serializer};
use thiserror::Error;
use common_types::Field::FormField;

use crate::Constants::{PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH};
use super::input::password_char_count;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidFormat,
    TooShort,
    TooLong,
    Mismatch,
    Required,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_email() -> Self {
        Self::new(ErrorKind::InvalidFormat, "Invalid email")
    }

    /// Length error for a password that failed the length rule. Anything that
    /// is not too long is reported as too short.
    pub fn password_length(password: &str) -> Self {
        if password_char_count(password) > PASSWORD_MAX_LENGTH {
            Self::new(ErrorKind::TooLong, format!("String must contain at most {PASSWORD_MAX_LENGTH} character(s)"))
        } else {
            Self::new(ErrorKind::TooShort, format!("String must contain at least {PASSWORD_MIN_LENGTH} character(s)"))
        }
    }

    pub fn password_mismatch() -> Self {
        Self::new(ErrorKind::Mismatch, "Passwords do not match!")
    }

    pub fn company_name_required() -> Self {
        Self::new(ErrorKind::Required, "Company name is required!")
    }

    pub fn required() -> Self {
        Self::new(ErrorKind::Required, "Required")
    }
}

// Rendered as the bare message, which is all the form displays
impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message)
    }
}

/// Field-scoped validation failures, in form order. A field maps to one or
/// more messages, never to an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FormField, Vec<FieldError>>);

impl FieldErrors {
    pub fn push(&mut self, field: FormField, error: FieldError) {
        self.0.entry(field).or_default().push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: FormField) -> &[FieldError] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn messages(&self, field: FormField) -> Vec<&str> {
        self.get(field).iter().map(|error| error.message.as_str()).collect()
    }

    pub fn kinds(&self, field: FormField) -> Vec<ErrorKind> {
        self.get(field).iter().map(|error| error.kind).collect()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &FieldError)> {
        self.0.iter().flat_map(|(field, errors)| errors.iter().map(move |error| (*field, error)))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {error}")?;
            first = false;
        }
        Ok(())
    }
}

impl ::std::error::Error for FieldErrors {}
