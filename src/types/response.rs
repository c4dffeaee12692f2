use serde::{Deserialize, Serialize};

use super::profile::ProfileId;

// ===== Service Response Types =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfileResponse {
    pub profile_id: ProfileId,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedEmailResponse {
    pub email_text: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub request_id: Option<serde_json::Value>,
    /// Set when the service fell back to its template email.
    #[serde(default)]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendConfirmation {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub resume_attached: bool,
    #[serde(default)]
    pub cover_letter_attached: bool,
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl SendConfirmation {
    pub fn summary(&self) -> String {
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| "Email sent successfully".to_string());

        if self.attachments.is_empty() {
            message
        } else {
            format!("{} (attachments: {})", message, self.attachments.join(", "))
        }
    }
}
