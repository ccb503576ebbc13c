use catalog_types::CalendarDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    error::StoreResult,
    filter::FieldFilterMap,
    store::DocumentStore,
    validation::{
        FieldError, FieldValidator, ValidationErrors, optional_date, required_text, validate_fields,
    },
};

pub const MAX_NAME_LENGTH: usize = 100;

pub const FIRST_NAME: &str = "first_name";
pub const FAMILY_NAME: &str = "family_name";
pub const DATE_OF_BIRTH: &str = "date_of_birth";
pub const DATE_OF_DEATH: &str = "date_of_death";

/// Fields of author record, as known to the store
pub const FIELDS: [&str; 4] = [FIRST_NAME, FAMILY_NAME, DATE_OF_BIRTH, DATE_OF_DEATH];

const VALIDATORS: &[FieldValidator<AuthorRecord>] = &[
    (FIRST_NAME, check_first_name),
    (FAMILY_NAME, check_family_name),
    (DATE_OF_BIRTH, check_date_of_birth),
    (DATE_OF_DEATH, check_date_of_death),
];

fn check_first_name(author: &AuthorRecord) -> Option<FieldError> {
    required_text(author.first_name.as_deref(), MAX_NAME_LENGTH)
}

fn check_family_name(author: &AuthorRecord) -> Option<FieldError> {
    required_text(author.family_name.as_deref(), MAX_NAME_LENGTH)
}

fn check_date_of_birth(author: &AuthorRecord) -> Option<FieldError> {
    optional_date(author.date_of_birth.as_ref())
}

fn check_date_of_death(author: &AuthorRecord) -> Option<FieldError> {
    optional_date(author.date_of_death.as_ref())
}

/// Author as entered, any field can be missing until validated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<CalendarDate>,
    #[serde(default)]
    pub date_of_death: Option<CalendarDate>,
}

impl AuthorRecord {
    pub fn new(first_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        AuthorRecord {
            first_name: Some(first_name.into()),
            family_name: Some(family_name.into()),
            ..Default::default()
        }
    }

    pub fn with_dates(mut self, born: Option<CalendarDate>, died: Option<CalendarDate>) -> Self {
        self.date_of_birth = born;
        self.date_of_death = died;
        self
    }

    /// Checks every field, returns errors for all invalid ones
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(self, VALIDATORS)
    }

    /// "family_name, first_name" or empty string if any of them is missing
    pub fn name(&self) -> String {
        match (self.first_name.as_deref(), self.family_name.as_deref()) {
            (Some(first), Some(family)) if !first.is_empty() && !family.is_empty() => {
                format!("{family}, {first}")
            }
            _ => String::new(),
        }
    }

    /// "birth_year - death_year", missing or invalid date gives empty year
    pub fn lifespan(&self) -> String {
        fn year(date: Option<&CalendarDate>) -> String {
            date.and_then(CalendarDate::year)
                .map(|y| format!("{y:04}"))
                .unwrap_or_default()
        }
        format!(
            "{} - {}",
            year(self.date_of_birth.as_ref()),
            year(self.date_of_death.as_ref())
        )
    }

    /// Counts authors in the store, no filter means all authors.
    ///
    /// Filter is handed to the store unchanged and store errors are returned as they are.
    #[instrument(skip(store))]
    pub async fn get_author_count<S: DocumentStore>(
        store: &S,
        filter: Option<FieldFilterMap>,
    ) -> StoreResult<u64> {
        let count = store.count_documents(filter.unwrap_or_default()).await?;
        debug!("Found {count} authors");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use fake::{
        Fake,
        faker::name::en::{FirstName, LastName},
    };
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    use super::*;

    fn date(s: &str) -> Option<CalendarDate> {
        Some(CalendarDate::parse(s))
    }

    fn john_doe() -> AuthorRecord {
        AuthorRecord::new("John", "Doe").with_dates(date("1990-01-01"), date("2020-01-01"))
    }

    #[derive(Debug, Clone)]
    struct ValidAuthor(AuthorRecord);

    impl Arbitrary for ValidAuthor {
        fn arbitrary(g: &mut Gen) -> Self {
            let first: String = FirstName().fake();
            let family: String = LastName().fake();
            let born = bool::arbitrary(g).then(|| CalendarDate::parse("1958-10-10"));
            let died = bool::arbitrary(g).then(|| CalendarDate::parse("2020-01-01"));
            ValidAuthor(AuthorRecord::new(first, family).with_dates(born, died))
        }
    }

    #[quickcheck]
    fn test_generated_author_is_valid(author: ValidAuthor) -> bool {
        author.0.validate().is_ok() && !author.0.name().is_empty()
    }

    #[test]
    fn test_valid_author() {
        assert!(john_doe().validate().is_ok());
        let author = AuthorRecord::new("J", "D");
        assert!(author.validate().is_ok());
        let author = AuthorRecord::new("a".repeat(100), "b".repeat(100));
        assert!(author.validate().is_ok());
    }

    #[test]
    fn test_first_name_missing() {
        let mut author = john_doe();
        author.first_name = None;
        let errors = author.validate().unwrap_err();
        assert_eq!(errors.get(FIRST_NAME), Some(&FieldError::Required));
        assert_eq!(errors.len(), 1);

        author.first_name = Some(String::new());
        let errors = author.validate().unwrap_err();
        assert!(errors.contains(FIRST_NAME));
    }

    #[test]
    fn test_first_name_too_long() {
        let mut author = john_doe();
        author.first_name = Some("a".repeat(101));
        let errors = author.validate().unwrap_err();
        assert_eq!(
            errors.get(FIRST_NAME),
            Some(&FieldError::TooLong {
                max: 100,
                actual: 101
            })
        );
    }

    #[test]
    fn test_family_name_missing() {
        let mut author = john_doe();
        author.family_name = None;
        let errors = author.validate().unwrap_err();
        assert_eq!(errors.get(FAMILY_NAME), Some(&FieldError::Required));
    }

    #[test]
    fn test_family_name_too_long() {
        let mut author = john_doe();
        author.family_name = Some("a".repeat(101));
        let errors = author.validate().unwrap_err();
        assert!(errors.contains(FAMILY_NAME));
        assert!(!errors.contains(FIRST_NAME));
    }

    #[test]
    fn test_all_errors_reported() {
        let author = AuthorRecord {
            date_of_birth: date("2020-27-12"),
            date_of_death: date("2020-12-32"),
            ..Default::default()
        };
        let errors = author.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        for field in FIELDS {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_invalid_date_of_birth() {
        let author =
            AuthorRecord::new("John", "Doe").with_dates(date("2020-27-12"), date("2020-12-27"));
        let errors = author.validate().unwrap_err();
        assert_eq!(
            errors.get(DATE_OF_BIRTH),
            Some(&FieldError::InvalidDate {
                value: "2020-27-12".to_string()
            })
        );
        assert!(!errors.contains(DATE_OF_DEATH));
    }

    #[test]
    fn test_invalid_date_of_death() {
        let author =
            AuthorRecord::new("John", "Doe").with_dates(date("1990-01-01"), date("2020-27-12"));
        let errors = author.validate().unwrap_err();
        assert!(errors.contains(DATE_OF_DEATH));
        assert!(!errors.contains(DATE_OF_BIRTH));
    }

    #[test]
    fn test_death_before_birth_is_valid() {
        let author =
            AuthorRecord::new("John", "Doe").with_dates(date("2020-01-01"), date("1990-01-01"));
        assert!(author.validate().is_ok());
    }

    #[test]
    fn test_name() {
        let mut author = john_doe();
        assert_eq!(author.name(), "Doe, John");

        author.first_name = Some(String::new());
        assert_eq!(author.name(), "");

        let mut author = john_doe();
        author.family_name = Some(String::new());
        assert_eq!(author.name(), "");

        let author = AuthorRecord {
            date_of_birth: date("1990-01-01"),
            date_of_death: date("2020-01-01"),
            ..Default::default()
        };
        assert_eq!(author.name(), "");
    }

    #[test]
    fn test_name_follows_changes() {
        let mut author = john_doe();
        assert_eq!(author.name(), "Doe, John");
        author.first_name = Some("Jane".to_string());
        assert_eq!(author.name(), "Doe, Jane");
        author.first_name = Some("a".repeat(101));
        assert!(author.validate().is_err());
        assert_eq!(author.name(), format!("Doe, {}", "a".repeat(101)));
    }

    #[test]
    fn test_lifespan() {
        let author = AuthorRecord::new("John", "Doe");
        assert_eq!(author.lifespan(), " - ");

        let author = author.with_dates(date("1990-01-09"), date("2020-12-27"));
        assert_eq!(author.lifespan(), "1990 - 2020");

        let author = AuthorRecord::new("John", "Doe").with_dates(date("1990-01-09"), None);
        assert_eq!(author.lifespan(), "1990 - ");

        let author = AuthorRecord::new("John", "Doe").with_dates(None, date("2020-12-27"));
        assert_eq!(author.lifespan(), " - 2020");
    }

    #[test]
    fn test_lifespan_invalid_date() {
        let author =
            AuthorRecord::new("John", "Doe").with_dates(date("2020-27-12"), date("2020-12-27"));
        assert_eq!(author.lifespan(), " - 2020");
    }

    #[test]
    fn test_deserialize_partial() {
        let author: AuthorRecord =
            serde_json::from_str(r#"{"family_name": "Doe", "date_of_death": "2020-27-12"}"#)
                .unwrap();
        assert_eq!(author.first_name, None);
        assert_eq!(author.lifespan(), " - ");
        let errors = author.validate().unwrap_err();
        assert!(errors.contains(FIRST_NAME));
        assert!(errors.contains(DATE_OF_DEATH));
        assert!(!errors.contains(FAMILY_NAME));
    }
}
