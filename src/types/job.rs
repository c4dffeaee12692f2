// src/types/job.rs
use serde::{Deserialize, Serialize};

use super::profile::ProfileId;

pub const DEFAULT_RECIPIENT: &str = "Hiring Manager";

/// Job-specific fields collected in the second stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDetails {
    pub hr_email: String,
    pub company: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    pub recipient_name: String,

    // Company address, used on the cover letter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_city_state_zip: Option<String>,

    // Enrichment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_skills: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_achievements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_interest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_qualities: Option<String>,
}

impl Default for JobDetails {
    fn default() -> Self {
        Self {
            hr_email: String::new(),
            company: String::new(),
            role: String::new(),
            job_description: None,
            recipient_name: DEFAULT_RECIPIENT.to_string(),
            company_address: None,
            company_city_state_zip: None,
            previous_company: None,
            key_skills: None,
            specific_achievements: None,
            company_interest: None,
            personal_qualities: None,
        }
    }
}

impl JobDetails {
    pub fn new(
        hr_email: impl Into<String>,
        company: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            hr_email: hr_email.into(),
            company: company.into(),
            role: role.into(),
            ..Default::default()
        }
    }

    /// Subject line used when the user leaves it blank.
    pub fn default_subject(&self) -> String {
        format!("Application for {} at {}", self.role.trim(), self.company.trim())
    }
}

/// Body of the email and cover-letter generation calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobApplicationRequest {
    pub profile_id: ProfileId,
    #[serde(flatten)]
    pub details: JobDetails,
}

impl JobApplicationRequest {
    pub fn new(profile_id: ProfileId, details: JobDetails) -> Self {
        Self {
            profile_id,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_flattens_job_fields() {
        let mut details = JobDetails::new("hr@x.com", "X", "Eng");
        details.key_skills = Some("Rust".into());
        let request = JobApplicationRequest::new(ProfileId::new("42"), details);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["profile_id"], "42");
        assert_eq!(value["hr_email"], "hr@x.com");
        assert_eq!(value["recipient_name"], DEFAULT_RECIPIENT);
        assert_eq!(value["key_skills"], "Rust");
        assert!(value.get("job_description").is_none());
    }

    #[test]
    fn test_missing_toml_keys_take_defaults() {
        let details: JobDetails = toml::from_str(
            r#"
            hr_email = "hr@x.com"
            company = "X"
            role = "Eng"
            "#,
        )
        .unwrap();
        assert_eq!(details.recipient_name, DEFAULT_RECIPIENT);
        assert_eq!(details.default_subject(), "Application for Eng at X");
    }
}
