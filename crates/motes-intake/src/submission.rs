//! Submission records and the form they come from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{IntakeError, Result};

/// A stored enquiry.
///
/// Serialized with the key names existing `clients.json` files use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Unix time in milliseconds, unique within a store.
    pub id: u64,
    /// Empty when an older entry was stored without one.
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "phoneNum", default, skip_serializing_if = "Option::is_none")]
    pub phone_num: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(rename = "projectName", default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Raw form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionForm {
    pub username: String,
    pub email: String,
    pub phone_num: Option<String>,
    pub service: Option<String>,
    pub project_name: Option<String>,
    pub budget: Option<String>,
    pub intro: Option<String>,
}

impl SubmissionForm {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Check the required fields.
    ///
    /// `username` must not be blank and `email` needs text on both sides of
    /// an `@`.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(IntakeError::MissingField("username"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(IntakeError::MissingField("email"));
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(IntakeError::InvalidEmail(email.to_string())),
        }
    }

    /// Validate and turn the form into a record with the given id and time.
    pub fn into_submission(self, id: u64, submitted_at: DateTime<Utc>) -> Result<Submission> {
        self.validate()?;
        Ok(Submission {
            id,
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_num: optional(self.phone_num),
            service: optional(self.service),
            project_name: optional(self.project_name),
            budget: optional(self.budget),
            intro: optional(self.intro),
            submitted_at,
        })
    }
}

/// Destination for validated submissions.
pub trait SubmissionSink {
    /// Validate `form`, store it, and return the stored record.
    fn submit(&mut self, form: SubmissionForm) -> Result<Submission>;
}

/// Trim an optional field, treating blank as absent.
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
