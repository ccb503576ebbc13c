//! Filters in document store form - map of field name to exact value or predicate
//!
//! JSON representation: `{"first_name": "John", "date_of_death": {"$exists": true}}`

use std::{collections::BTreeMap, str::FromStr};

use catalog_types::CalendarDate;
use serde::{Deserialize, Deserializer, Serialize};
use time::Date;

/// Value compared with a field.
///
/// Being untagged, any text in `YYYY-MM-DD` form deserializes as `Date`, even for text fields
/// like `first_name`. Store resolves the type per field, see [`FieldValue::into_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Date(Date),
    Text(String),
    Null,
}

impl FieldValue {
    /// Value as text, dates are formatted back to `YYYY-MM-DD`
    pub fn into_text(self) -> FieldValue {
        match self {
            FieldValue::Date(date) => FieldValue::Text(CalendarDate::Valid(date).to_string()),
            other => other,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Date> for FieldValue {
    fn from(value: Date) -> Self {
        FieldValue::Date(value)
    }
}

impl From<CalendarDate> for FieldValue {
    fn from(value: CalendarDate) -> Self {
        match value {
            CalendarDate::Valid(date) => FieldValue::Date(date),
            CalendarDate::Invalid(raw) => FieldValue::Text(raw),
        }
    }
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<FieldValue>, D::Error> {
    FieldValue::deserialize(deserializer).map(Some)
}

/// Operators applied to one field, all given operators must match.
///
/// Operand `null` is kept as `Some(FieldValue::Null)`, absent operator is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Predicate {
    #[serde(rename = "$exists", default, skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    #[serde(rename = "$ne", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub ne: Option<FieldValue>,
    #[serde(rename = "$gt", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub gt: Option<FieldValue>,
    #[serde(rename = "$gte", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub gte: Option<FieldValue>,
    #[serde(rename = "$lt", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub lt: Option<FieldValue>,
    #[serde(rename = "$lte", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub lte: Option<FieldValue>,
}

impl Predicate {
    pub fn exists(exists: bool) -> Self {
        Predicate {
            exists: Some(exists),
            ..Default::default()
        }
    }

    /// `gte <= field < lt`
    pub fn range(gte: impl Into<FieldValue>, lt: impl Into<FieldValue>) -> Self {
        Predicate {
            gte: Some(gte.into()),
            lt: Some(lt.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exists.is_none()
            && self.ne.is_none()
            && self.gt.is_none()
            && self.gte.is_none()
            && self.lt.is_none()
            && self.lte.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Predicate(Predicate),
    Exact(FieldValue),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldFilterMap(BTreeMap<String, FilterValue>);

impl FieldFilterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: FilterValue) -> Self {
        self.0.insert(field.into(), value);
        self
    }

    pub fn equals(self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.with(field, FilterValue::Exact(value.into()))
    }

    pub fn exists(self, field: impl Into<String>, exists: bool) -> Self {
        self.with(field, FilterValue::Predicate(Predicate::exists(exists)))
    }

    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, FilterValue)> for FieldFilterMap {
    fn from_iter<T: IntoIterator<Item = (String, FilterValue)>>(iter: T) -> Self {
        FieldFilterMap(iter.into_iter().collect())
    }
}

impl FromStr for FieldFilterMap {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}
