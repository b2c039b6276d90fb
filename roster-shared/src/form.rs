/// Record form validation
///
/// A `RecordForm` holds raw user input, with every field as it was typed.
/// `into_new_record` trims it, validates it and turns it into a `NewRecord`.
/// All failing fields are reported together, not just the first one.
///
/// The store checks only that name and email are present. The stricter
/// form rules live here.
///
/// # Example
///
/// ```
/// use roster_shared::form::RecordForm;
///
/// let form = RecordForm {
///     name: "Ana".into(),
///     email: "ana@example.com".into(),
///     phone: "5551234567".into(),
///     age: "31".into(),
///     city: Some("Lima".into()),
///     gender: Some("Female".into()),
///     notifications_enabled: true,
///     accepted_terms: true,
/// };
///
/// let record = form.into_new_record().unwrap();
/// assert_eq!(record.age, Some(31));
/// ```

use crate::models::record::NewRecord;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Raw input from the record form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        contains(pattern = "@", message = "Invalid email")
    )]
    pub email: String,

    #[validate(length(equal = 10, message = "Phone must have 10 digits"))]
    pub phone: String,

    /// Parsed as an integer
    pub age: String,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default = "enabled")]
    pub notifications_enabled: bool,

    #[serde(default)]
    pub accepted_terms: bool,
}

fn enabled() -> bool {
    true
}

/// One failing form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Form validation failure listing every failing field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Form validation failed: {} errors", .0.len())]
pub struct FormError(pub Vec<FieldError>);

impl FormError {
    /// Whether `field` failed
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

fn trimmed_choice(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RecordForm {
    /// Validates the form and builds the record to insert
    pub fn into_new_record(self) -> Result<NewRecord, FormError> {
        let form = RecordForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            age: self.age.trim().to_string(),
            city: trimmed_choice(self.city),
            gender: trimmed_choice(self.gender),
            ..self
        };

        let mut errors: Vec<FieldError> = match form.validate() {
            Ok(()) => Vec::new(),
            Err(e) => e
                .field_errors()
                .iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| FieldError {
                        field: field.to_string(),
                        message: error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| "Validation failed".to_string()),
                    })
                })
                .collect(),
        };

        let age = if form.age.is_empty() {
            errors.push(FieldError::new("age", "Age is required"));
            None
        } else {
            match form.age.parse::<i64>() {
                Ok(age) => Some(age),
                Err(_) => {
                    errors.push(FieldError::new("age", "Age must be a valid number"));
                    None
                }
            }
        };

        if form.city.is_none() {
            errors.push(FieldError::new("city", "Select a city"));
        }
        if form.gender.is_none() {
            errors.push(FieldError::new("gender", "Select a gender"));
        }
        if !form.accepted_terms {
            errors.push(FieldError::new(
                "accepted_terms",
                "You must accept the terms and conditions",
            ));
        }

        if !errors.is_empty() {
            errors.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
            return Err(FormError(errors));
        }

        Ok(NewRecord {
            name: form.name,
            email: form.email,
            phone: Some(form.phone),
            age,
            city: form.city,
            gender: form.gender,
            notifications_enabled: form.notifications_enabled,
        })
    }
}
