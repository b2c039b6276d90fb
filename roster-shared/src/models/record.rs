/// Record model and database operations
///
/// This module provides the Record model (a user profile) and the queries
/// behind every Store operation. Each function runs exactly one statement
/// against the pool.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE usuarios (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     nombre TEXT NOT NULL,
///     email TEXT NOT NULL UNIQUE,
///     telefono TEXT,
///     edad INTEGER,
///     ciudad TEXT,
///     genero TEXT,
///     notificaciones INTEGER DEFAULT 1
/// );
/// ```
///
/// Column names are part of the on-disk contract, so queries alias them to
/// the field names of `Record`.
///
/// # Example
///
/// ```no_run
/// use roster_shared::models::record::{NewRecord, Record};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let id = Record::create(&pool, NewRecord::new("Ana", "ana@example.com")).await?;
///
/// if let Some(record) = Record::find_by_id(&pool, id).await? {
///     println!("Created {}", record.name);
/// }
/// # Ok(())
/// # }
/// ```

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A persisted user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    /// Store-assigned id, never reused and never changed
    pub id: i64,

    /// Display name (required)
    pub name: String,

    /// Email address (required, unique across records)
    pub email: String,

    /// Optional phone number
    pub phone: Option<String>,

    /// Optional age, no range enforced
    pub age: Option<i64>,

    /// Optional city
    pub city: Option<String>,

    /// Optional gender
    pub gender: Option<String>,

    /// Whether the user wants notifications
    pub notifications_enabled: bool,
}

/// Input for creating a new record
///
/// A record without an id has not been saved yet; the store assigns the id
/// on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    /// Display name (required, must not be blank)
    pub name: String,

    /// Email address (required, must not be blank)
    pub email: String,

    /// Optional phone number
    #[serde(default)]
    pub phone: Option<String>,

    /// Optional age
    #[serde(default)]
    pub age: Option<i64>,

    /// Optional city
    #[serde(default)]
    pub city: Option<String>,

    /// Optional gender
    #[serde(default)]
    pub gender: Option<String>,

    /// Defaults to true when omitted
    #[serde(default = "default_notifications")]
    pub notifications_enabled: bool,
}

fn default_notifications() -> bool {
    true
}

impl NewRecord {
    /// Creates input with only the required fields set
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            age: None,
            city: None,
            gender: None,
            notifications_enabled: true,
        }
    }

    /// Sets the city
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Sets the phone number
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the age
    pub fn age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    /// Sets the gender
    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Sets the notification preference
    pub fn notifications(mut self, enabled: bool) -> Self {
        self.notifications_enabled = enabled;
        self
    }

    /// Attaches a store-assigned id
    pub fn with_id(self, id: i64) -> Record {
        Record {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            age: self.age,
            city: self.city,
            gender: self.gender,
            notifications_enabled: self.notifications_enabled,
        }
    }
}

/// Rejects blank names and emails before they reach the database
///
/// The NOT NULL columns catch missing values but not empty strings.
fn check_required(name: &str, email: &str) -> StoreResult<()> {
    if name.trim().is_empty() {
        return Err(StoreError::ConstraintViolation("name is required".to_string()));
    }
    if email.trim().is_empty() {
        return Err(StoreError::ConstraintViolation("email is required".to_string()));
    }
    Ok(())
}

impl Record {
    /// Inserts a new record and returns its id
    ///
    /// # Errors
    ///
    /// - `ConstraintViolation` if name or email is blank, or the email exists
    /// - `StorageFailure` on any other database error
    pub async fn create(pool: &SqlitePool, data: NewRecord) -> StoreResult<i64> {
        check_required(&data.name, &data.email)?;

        let result = sqlx::query(
            r#"
            INSERT INTO usuarios (nombre, email, telefono, edad, ciudad, genero, notificaciones)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.age)
        .bind(data.city)
        .bind(data.gender)
        .bind(data.notifications_enabled)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Finds a record by id
    ///
    /// Returns None if no row has this id.
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> StoreResult<Option<Self>> {
        let record = sqlx::query_as::<_, Record>(
            r#"
            SELECT id, nombre AS name, email, telefono AS phone, edad AS age,
                   ciudad AS city, genero AS gender,
                   COALESCE(notificaciones, 1) AS notifications_enabled
            FROM usuarios
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Lists every record ordered by name, then id
    pub async fn list_by_name(pool: &SqlitePool) -> StoreResult<Vec<Self>> {
        let records = sqlx::query_as::<_, Record>(
            r#"
            SELECT id, nombre AS name, email, telefono AS phone, edad AS age,
                   ciudad AS city, genero AS gender,
                   COALESCE(notificaciones, 1) AS notifications_enabled
            FROM usuarios
            ORDER BY nombre ASC, id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Overwrites every field of the row with `record.id`
    ///
    /// Returns true if a row matched, false if the id does not exist.
    ///
    /// # Errors
    ///
    /// - `ConstraintViolation` if name or email is blank, or the email
    ///   belongs to another record
    /// - `StorageFailure` on any other database error
    pub async fn update(pool: &SqlitePool, record: &Record) -> StoreResult<bool> {
        check_required(&record.name, &record.email)?;

        let result = sqlx::query(
            r#"
            UPDATE usuarios
            SET nombre = ?2, email = ?3, telefono = ?4, edad = ?5,
                ciudad = ?6, genero = ?7, notificaciones = ?8
            WHERE id = ?1
            "#,
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(record.age)
        .bind(&record.city)
        .bind(&record.gender)
        .bind(record.notifications_enabled)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a record by id
    ///
    /// Returns true if a row was deleted, false if the id does not exist.
    pub async fn delete(pool: &SqlitePool, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Finds records whose name contains `fragment`, ignoring case
    ///
    /// Matching runs on the ordered rows with Unicode case folding, since
    /// SQLite's LIKE folds ASCII letters only. Every character of `fragment`
    /// is taken literally.
    pub async fn search_by_name(pool: &SqlitePool, fragment: &str) -> StoreResult<Vec<Self>> {
        let needle = fragment.to_lowercase();
        let records = Self::list_by_name(pool)
            .await?
            .into_iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .collect();

        Ok(records)
    }

    /// Counts all records
    pub async fn count(pool: &SqlitePool) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM usuarios")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = NewRecord::new("Ana", "ana@example.com");
        assert_eq!(record.name, "Ana");
        assert!(record.phone.is_none());
        assert!(record.age.is_none());
        assert!(record.notifications_enabled);
    }

    #[test]
    fn test_new_record_deserialize_defaults_notifications_on() {
        let record: NewRecord =
            serde_json::from_str(r#"{"name":"Ana","email":"ana@example.com"}"#).unwrap();
        assert!(record.notifications_enabled);
        assert!(record.city.is_none());
    }

    #[test]
    fn test_with_id_keeps_fields() {
        let record = NewRecord::new("Ana", "ana@example.com")
            .city("Lima")
            .age(30)
            .notifications(false)
            .with_id(3);
        assert_eq!(record.id, 3);
        assert_eq!(record.city.as_deref(), Some("Lima"));
        assert_eq!(record.age, Some(30));
        assert!(!record.notifications_enabled);
    }

    #[test]
    fn test_check_required_rejects_blank_fields() {
        assert!(check_required("Ana", "ana@example.com").is_ok());
        assert!(matches!(
            check_required("  ", "ana@example.com"),
            Err(StoreError::ConstraintViolation(_))
        ));
        assert!(matches!(
            check_required("Ana", ""),
            Err(StoreError::ConstraintViolation(_))
        ));
    }

    // Integration tests against a real database file are in tests/store_tests.rs
}
