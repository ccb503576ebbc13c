use catalog_types::CalendarDate;
use futures::{StreamExt as _, TryStreamExt as _};
use serde::{Deserialize, Serialize};
use sqlx::Pool;
use tracing::debug;

use crate::{
    ChosenDB,
    author::{AuthorRecord, FAMILY_NAME, FIELDS, FIRST_NAME},
    error::{Result, StoreError, StoreResult},
    filter::{FieldFilterMap, FieldValue, FilterValue},
    store::DocumentStore,
};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS author (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    family_name TEXT NOT NULL,
    date_of_birth DATE,
    date_of_death DATE
)"#;

#[derive(Debug, sqlx::FromRow)]
struct AuthorRow {
    id: i64,
    first_name: String,
    family_name: String,
    date_of_birth: Option<time::Date>,
    date_of_death: Option<time::Date>,
}

/// Stored author with its id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    #[serde(flatten)]
    pub record: AuthorRecord,
}

impl From<AuthorRow> for Author {
    fn from(value: AuthorRow) -> Self {
        Self {
            id: value.id,
            record: AuthorRecord {
                first_name: Some(value.first_name),
                family_name: Some(value.family_name),
                date_of_birth: value.date_of_birth.map(CalendarDate::from),
                date_of_death: value.date_of_death.map(CalendarDate::from),
            },
        }
    }
}

const TEXT_FIELDS: [&str; 2] = [FIRST_NAME, FAMILY_NAME];

/// Translates filter to SQL condition, returns condition and values to bind in order
fn where_clause(filter: &FieldFilterMap) -> StoreResult<(String, Vec<FieldValue>)> {
    let mut conditions = Vec::with_capacity(filter.len());
    let mut binds = Vec::new();
    for (field, value) in filter.iter() {
        // field names go to SQL, so only known columns are accepted
        if !FIELDS.contains(&field.as_str()) {
            return Err(StoreError::InvalidFilterField(field.clone()));
        }
        let is_text = TEXT_FIELDS.contains(&field.as_str());
        let mut compare = |op: &str, v: &FieldValue| {
            let v = if is_text { v.clone().into_text() } else { v.clone() };
            binds.push(v);
            format!("{field} {op} ?")
        };
        match value {
            FilterValue::Exact(FieldValue::Null) => conditions.push(format!("{field} IS NULL")),
            FilterValue::Exact(v) => conditions.push(compare("=", v)),
            FilterValue::Predicate(predicate) => {
                if predicate.is_empty() {
                    return Err(StoreError::InvalidFilter(format!(
                        "no operator given for field {field}"
                    )));
                }
                match predicate.exists {
                    Some(true) => conditions.push(format!("{field} IS NOT NULL")),
                    Some(false) => conditions.push(format!("{field} IS NULL")),
                    None => {}
                }
                let operators = [
                    ("IS NOT", &predicate.ne),
                    (">", &predicate.gt),
                    (">=", &predicate.gte),
                    ("<", &predicate.lt),
                    ("<=", &predicate.lte),
                ];
                for (op, operand) in operators {
                    if let Some(v) = operand {
                        conditions.push(compare(op, v));
                    }
                }
            }
        }
    }
    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };
    Ok((clause, binds))
}

pub type AuthorStore = AuthorStoreImpl<Pool<ChosenDB>>;

pub struct AuthorStoreImpl<E> {
    executor: E,
}

impl<'c, E> AuthorStoreImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn ensure_table(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.executor).await?;
        Ok(())
    }

    /// Validates record before storing it, so only valid authors get to the store
    pub async fn insert(&self, record: &AuthorRecord) -> Result<Author> {
        record.validate()?;
        let result = sqlx::query(
            "INSERT INTO author (first_name, family_name, date_of_birth, date_of_death) VALUES (?, ?, ?, ?)",
        )
        .bind(&record.first_name)
        .bind(&record.family_name)
        .bind(record.date_of_birth.as_ref().and_then(CalendarDate::date))
        .bind(record.date_of_death.as_ref().and_then(CalendarDate::date))
        .execute(&self.executor)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Created author {id}");
        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> Result<Author> {
        let record: Author = sqlx::query_as::<_, AuthorRow>("SELECT * FROM author WHERE id = ?")
            .bind(id)
            .fetch_one(&self.executor)
            .await?
            .into();
        Ok(record)
    }

    pub async fn list(&self, limit: usize) -> Result<Vec<Author>> {
        let records = sqlx::query_as::<_, AuthorRow>(
            "SELECT * FROM author ORDER BY family_name, first_name",
        )
        .fetch(&self.executor)
        .take(limit)
        .map_ok(Author::from)
        .try_collect::<Vec<_>>()
        .await?;
        Ok(records)
    }

    pub async fn count(&self, filter: &FieldFilterMap) -> StoreResult<u64> {
        let (clause, binds) = where_clause(filter)?;
        let sql = format!("SELECT count(*) FROM author{clause}");
        debug!("Count query: {sql}");
        let mut query = sqlx::query_scalar::<_, u64>(&sql);
        for value in binds {
            query = match value {
                FieldValue::Text(s) => query.bind(s),
                FieldValue::Date(d) => query.bind(d),
                FieldValue::Null => query.bind(None::<String>),
            };
        }
        let count = query.fetch_one(&self.executor).await?;
        Ok(count)
    }
}

impl DocumentStore for AuthorStore {
    async fn count_documents(&self, filter: FieldFilterMap) -> StoreResult<u64> {
        self.count(&filter).await
    }
}
