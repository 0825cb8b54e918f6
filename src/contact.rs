//! # Contact Form Validation
//!
//! Client-side rules for the contact form and a simulated submission. There is no backend:
//! a valid form "sends" after a fixed delay and the data is only logged.
//!
//! ## Rules
//! | Field     | Required | Length      | Pattern                         |
//! |-----------|----------|-------------|---------------------------------|
//! | `name`    | yes      | ≥ 2         | letters and spaces              |
//! | `email`   | yes      |             | `something@domain.tld`          |
//! | `phone`   | no       |             | optional `+`, then 1–16 digits  |
//! | `message` | yes      | 10 to 1000  |                                 |
//!
//! Values are trimmed first and lengths count characters. Empty optional fields pass.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Longest accepted message, also the counter's starting value.
pub const MESSAGE_MAX_CHARS: usize = 1000;

/// Remaining-character count below which the counter is highlighted.
pub const LOW_REMAINING_THRESHOLD: i64 = 50;

/// Simulated network time for a submission.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(2000);

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("name pattern is valid"));
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+]?[1-9][\d]{0,15}$").expect("phone pattern is valid"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Phone, Field::Message];

    /// Form control name, also used for the `<name>-error` element id.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Message => "message",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Message => "Message",
        }
    }

    fn rule(self) -> FieldRule {
        match self {
            Field::Name => FieldRule {
                required: true,
                min_chars: Some(2),
                max_chars: None,
                pattern: Some(&NAME_PATTERN),
                message: "Please enter a valid name (letters and spaces only)",
            },
            Field::Email => FieldRule {
                required: true,
                min_chars: None,
                max_chars: None,
                pattern: Some(&EMAIL_PATTERN),
                message: "Please enter a valid email address",
            },
            Field::Phone => FieldRule {
                required: false,
                min_chars: None,
                max_chars: None,
                pattern: Some(&PHONE_PATTERN),
                message: "Please enter a valid phone number",
            },
            Field::Message => FieldRule {
                required: true,
                min_chars: Some(10),
                max_chars: Some(MESSAGE_MAX_CHARS),
                pattern: None,
                message: "Message must be between 10 and 1000 characters",
            },
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct FieldRule {
    required: bool,
    min_chars: Option<usize>,
    max_chars: Option<usize>,
    pattern: Option<&'static LazyLock<Regex>>,
    message: &'static str,
}

/// One failed field, with the message shown under it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// One or more fields failed validation
    #[error("Please correct the errors above")]
    Invalid(Vec<FieldError>),
}

/// Raw form values as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Message => &self.message,
        }
    }
}

/// Accepted submission, with trimmed values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

/// Check one field value against its rule.
///
/// Checks run in order (required, minimum length, maximum length, pattern) and the first
/// failure wins.
pub fn validate_field(field: Field, raw: &str) -> Result<(), FieldError> {
    let rule = field.rule();
    let value = raw.trim();
    let fail = |message: String| Err(FieldError { field, message });

    if value.is_empty() {
        return if rule.required {
            fail(format!("{} is required", field.label()))
        } else {
            Ok(())
        };
    }

    let chars = value.chars().count();
    if let Some(min) = rule.min_chars {
        if chars < min {
            return fail(format!("{} must be at least {} characters", field.label(), min));
        }
    }
    if let Some(max) = rule.max_chars {
        if chars > max {
            return fail(format!("{} must be less than {} characters", field.label(), max));
        }
    }
    if let Some(pattern) = rule.pattern {
        if !pattern.is_match(value) {
            return fail(rule.message.to_string());
        }
    }

    Ok(())
}

/// Validate every field, collecting all failures in field order.
pub fn validate_form(form: &ContactForm) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = Field::ALL
        .iter()
        .filter_map(|field| validate_field(*field, form.value(*field)).err())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Strip characters the name field does not accept while typing.
pub fn sanitize_name(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect()
}

/// Strip characters the phone field does not accept while typing.
pub fn sanitize_phone(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')') || c.is_whitespace())
        .collect()
}

/// Characters left before the message limit. Negative when over.
pub fn remaining_chars(message: &str) -> i64 {
    MESSAGE_MAX_CHARS as i64 - message.chars().count() as i64
}

/// Whether the remaining-character counter should be highlighted.
pub fn counter_is_low(message: &str) -> bool {
    remaining_chars(message) < LOW_REMAINING_THRESHOLD
}

/// Validate and "send" the form.
///
/// Waits [`SUBMIT_DELAY`] to stand in for the network round trip, then logs the data.
///
/// # Errors
/// [`ContactError::Invalid`] with every failing field; nothing is sent.
pub async fn submit(form: &ContactForm) -> Result<Submission, ContactError> {
    validate_form(form).map_err(ContactError::Invalid)?;

    tokio::time::sleep(SUBMIT_DELAY).await;

    let phone = form.phone.trim();
    let submission = Submission {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: (!phone.is_empty()).then(|| phone.to_string()),
        message: form.message.trim().to_string(),
    };
    info!(
        name = %submission.name,
        email = %submission.email,
        phone = ?submission.phone,
        message_chars = submission.message.chars().count(),
        "contact form submitted"
    );
    Ok(submission)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Sarah Johnson".to_string(),
            email: "sarah@techcorp.com".to_string(),
            phone: String::new(),
            message: "We need executive protection next month.".to_string(),
        }
    }

    #[test]
    fn test_required_fields() {
        let err = validate_field(Field::Name, "   ").unwrap_err();
        assert_eq!(err.message, "Name is required");
        assert!(validate_field(Field::Phone, "").is_ok());
    }

    #[test]
    fn test_length_checks_come_before_pattern() {
        let err = validate_field(Field::Name, "A").unwrap_err();
        assert_eq!(err.message, "Name must be at least 2 characters");

        let err = validate_field(Field::Message, "too short").unwrap_err();
        assert_eq!(err.message, "Message must be at least 10 characters");

        let long = "x".repeat(MESSAGE_MAX_CHARS + 1);
        let err = validate_field(Field::Message, &long).unwrap_err();
        assert_eq!(err.message, "Message must be less than 1000 characters");
        assert!(validate_field(Field::Message, &"x".repeat(MESSAGE_MAX_CHARS)).is_ok());
    }

    #[test]
    fn test_patterns() {
        assert!(validate_field(Field::Name, "Jo Anne").is_ok());
        assert_eq!(
            validate_field(Field::Name, "R2-D2").unwrap_err().message,
            "Please enter a valid name (letters and spaces only)"
        );

        assert!(validate_field(Field::Email, "a@b.co").is_ok());
        assert!(validate_field(Field::Email, "a@b").is_err());
        assert!(validate_field(Field::Email, "a b@c.d").is_err());

        assert!(validate_field(Field::Phone, "+15551234567").is_ok());
        assert!(validate_field(Field::Phone, "0555").is_err());
        assert!(validate_field(Field::Phone, "555-1234").is_err());
        assert!(validate_field(Field::Phone, "12345678901234567").is_err());
    }

    #[test]
    fn test_form_collects_all_errors() {
        let form = ContactForm {
            name: String::new(),
            email: "nope".to_string(),
            phone: "abc".to_string(),
            message: "hi".to_string(),
        };
        let errors = validate_form(&form).unwrap_err();
        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![Field::Name, Field::Email, Field::Phone, Field::Message]
        );
    }

    #[test]
    fn test_sanitizers() {
        assert_eq!(sanitize_name("Jo3hn O'Neil"), "John ONeil");
        assert_eq!(sanitize_phone("+1 (555) 123-4567 ext"), "+1 (555) 123-4567 ");
    }

    #[test]
    fn test_character_counter() {
        assert_eq!(remaining_chars(""), 1000);
        assert!(!counter_is_low(&"x".repeat(950)));
        assert!(counter_is_low(&"x".repeat(951)));
        assert_eq!(remaining_chars(&"x".repeat(1002)), -2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_waits_then_returns_trimmed_data() {
        let mut form = valid_form();
        form.name = "  Sarah Johnson ".to_string();

        let started = tokio::time::Instant::now();
        let submission = submit(&form).await.unwrap();

        assert!(started.elapsed() >= SUBMIT_DELAY);
        assert_eq!(submission.name, "Sarah Johnson");
        assert_eq!(submission.phone, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_rejects_invalid_form_immediately() {
        let mut form = valid_form();
        form.email = "missing-at.example.com".to_string();

        let started = tokio::time::Instant::now();
        let err = submit(&form).await.unwrap_err();

        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(err.to_string(), "Please correct the errors above");
        let ContactError::Invalid(errors) = err;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::Email);
    }
}
