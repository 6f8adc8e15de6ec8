#![forbid(unsafe_code)]

//! Contact form validation.
//!
//! Validation is synchronous and total: every submit re-checks all three
//! fields from scratch and produces one outcome per field. A field either
//! passes (its inline error, if any, is cleared) or fails with a
//! [`FieldError`] rendered directly under it. Only a fully valid submission
//! is "sent", which here means a local confirmation and a form reset. No
//! request ever leaves the page.

use std::sync::OnceLock;

use regex::Regex;

use crate::mutation::Mutation;

/// `local@domain.tld`: no whitespace or `@` in either part, and a dot
/// somewhere inside the domain.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Compiled [`EMAIL_PATTERN`]. The `expect` can only fire if the constant
/// itself is malformed, which `email_pattern_compiles` rules out.
fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"))
}

/// Whether `email` (already trimmed) has the `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// The three required contact fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    /// All fields, in form order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Message => "Message",
        }
    }
}

/// Why a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Empty after trimming.
    Required,
    /// Present but malformed (email only).
    Format,
}

impl FieldError {
    /// Inline message shown under `field`.
    #[must_use]
    pub fn message(self, field: Field) -> String {
        match self {
            Self::Required => format!("{} is required", field.label()),
            Self::Format => "Please enter a valid email address".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Trimmed field values read at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    #[must_use]
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.trim().to_owned(),
            email: email.trim().to_owned(),
            message: message.trim().to_owned(),
        }
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    /// Check every field.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let check = |field: Field| -> Option<FieldError> {
            let value = self.value(field);
            if value.is_empty() {
                Some(FieldError::Required)
            } else if field == Field::Email && !is_valid_email(value) {
                Some(FieldError::Format)
            } else {
                None
            }
        };
        ValidationReport {
            outcomes: Field::ALL.map(|field| (field, check(field))),
        }
    }

    /// Text of the confirmation shown after a valid submission.
    #[must_use]
    pub fn confirmation(&self) -> String {
        format!(
            "Thank you, {}! Your message has been sent successfully. \
             I'll get back to you soon at {}.",
            self.name, self.email
        )
    }
}

/// Per-field outcome of one validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
    outcomes: [(Field, Option<FieldError>); 3],
}

impl ValidationReport {
    #[must_use]
    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.outcomes
            .iter()
            .find(|(f, _)| *f == field)
            .and_then(|(_, err)| *err)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(|(_, err)| err.is_none())
    }

    pub fn errors(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|(field, err)| err.map(|e| (*field, e)))
    }
}

/// Validate a submission and plan the resulting DOM changes.
#[must_use]
pub fn plan_submit(submission: &ContactSubmission) -> (ValidationReport, Vec<Mutation>) {
    let report = submission.validate();
    let mut mutations: Vec<Mutation> = Field::ALL
        .iter()
        .map(|&field| match report.error(field) {
            Some(err) => Mutation::ShowFieldError {
                field,
                message: err.message(field),
            },
            None => Mutation::ClearFieldError { field },
        })
        .collect();
    if report.is_valid() {
        mutations.push(Mutation::Notify(submission.confirmation()));
        mutations.push(Mutation::ResetForm);
    }
    (report, mutations)
}
