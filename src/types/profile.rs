// src/types/profile.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque identifier the remote service assigns to a created profile.
///
/// The service emits it as a JSON number today; strings are accepted too so
/// the client does not care which one it gets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProfileId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Ok(ProfileId(text)),
            Raw::Number(number) => Ok(ProfileId(number.to_string())),
        }
    }
}

/// Resume attachment uploaded alongside the profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }
}

/// Raw profile form input. Field names match the multipart keys the service reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDraft {
    // Basic information
    pub name: String,
    pub location: String,
    pub phone_number: String,
    pub primary_email: String,

    // Contact links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leetcode_url: Option<String>,

    // Education
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_degree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_name: Option<String>,
    /// Required by the service; file loaders fill in the current year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,

    // Skills, comma separated
    pub programming_languages: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python_frameworks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontend_technologies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_development: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub databases: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_devops: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_platforms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub development_practices: Option<String>,

    // Free text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<String>,

    #[serde(skip)]
    pub resume_file: Option<ResumeFile>,
}

impl ProfileDraft {
    /// Text fields as (key, value) pairs sorted by key, skipping absent ones.
    pub fn text_fields(&self) -> Vec<(String, String)> {
        let value = match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => return Vec::new(),
        };

        value
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(text) => Some((key, text)),
                other => Some((key, other.to_string())),
            })
            .collect()
    }
}

/// Profile input retained by the session once the service has assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct RetainedProfile {
    pub id: ProfileId,
    pub draft: ProfileDraft,
}

/// Envelope returned by `GET /api/get-profile/{id}/`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    pub profile: ProfileRecord,
}

/// Profile as stored by the remote service.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRecord {
    pub id: ProfileId,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub primary_email: Option<String>,
    #[serde(default)]
    pub alternative_email: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub leetcode_url: Option<String>,
    #[serde(default)]
    pub education_degree: Option<String>,
    #[serde(default)]
    pub education_field: Option<String>,
    #[serde(default)]
    pub university_name: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<i32>,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub programming_languages: Option<String>,
    #[serde(default)]
    pub professional_experience: Option<String>,
    #[serde(default)]
    pub projects: Option<String>,
    #[serde(default)]
    pub has_resume: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
