use std::{collections::BTreeMap, fmt};

use catalog_types::CalendarDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    #[error("value is required")]
    Required,
    #[error("length is {actual}, maximum allowed is {max}")]
    TooLong { max: usize, actual: usize },
    #[error("{value:?} is not a valid date")]
    InvalidDate { value: String },
}

/// Errors of all invalid fields, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl FromIterator<(&'static str, FieldError)> for ValidationErrors {
    fn from_iter<T: IntoIterator<Item = (&'static str, FieldError)>>(iter: T) -> Self {
        ValidationErrors(iter.into_iter().collect())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (field, error)) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Field name and check for that field, `None` means field is valid
pub type FieldValidator<T> = (&'static str, fn(&T) -> Option<FieldError>);

/// Runs all validators, never stops on first failure
pub fn validate_fields<T>(value: &T, validators: &[FieldValidator<T>]) -> Result<(), ValidationErrors> {
    validators
        .iter()
        .filter_map(|(field, check)| check(value).map(|e| (*field, e)))
        .collect::<ValidationErrors>()
        .into_result()
}

pub fn required_text(value: Option<&str>, max_len: usize) -> Option<FieldError> {
    match value {
        None | Some("") => Some(FieldError::Required),
        Some(s) => {
            let actual = s.chars().count();
            (actual > max_len).then_some(FieldError::TooLong {
                max: max_len,
                actual,
            })
        }
    }
}

pub fn optional_date(value: Option<&CalendarDate>) -> Option<FieldError> {
    match value {
        Some(CalendarDate::Invalid(raw)) => Some(FieldError::InvalidDate { value: raw.clone() }),
        _ => None,
    }
}
