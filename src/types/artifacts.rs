// src/types/artifacts.rs
use anyhow::Result;
use bytes::Bytes;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::job::JobDetails;
use super::profile::ProfileId;
use crate::core::service_client::Document;
use crate::utils;

/// Generated cover letter, held in memory until the session is reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverLetter {
    pub file_name: String,
    pub content: Bytes,
}

impl CoverLetter {
    /// Wrap a downloaded document, naming it after the application when the
    /// service did not supply a usable file name.
    pub fn from_document(document: Document, applicant: &str, job: &JobDetails) -> Self {
        let file_name = document
            .file_name
            .as_deref()
            .and_then(utils::safe_file_name)
            .unwrap_or_else(|| utils::cover_letter_file_name(applicant, &job.company, &job.role));

        Self {
            file_name,
            content: document.content,
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Write the PDF into `dir` and return the full path. The file always
    /// lands directly inside `dir`.
    pub async fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        let file_name =
            utils::safe_file_name(&self.file_name).unwrap_or_else(|| "cover_letter.pdf".to_string());
        let path = dir.join(file_name);
        utils::write_file_bytes(&path, &self.content).await?;
        Ok(path)
    }
}

/// Output of the job-details stage. The cover letter is best-effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifacts {
    pub email_text: String,
    pub cover_letter: Option<CoverLetter>,
}

impl GeneratedArtifacts {
    pub fn has_cover_letter(&self) -> bool {
        self.cover_letter.is_some()
    }
}

/// Subject and body as the user wants them sent, possibly edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Body of both send endpoints. Attachments are regenerated server side
/// from the profile and job fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendRequest {
    pub profile_id: ProfileId,
    pub subject: String,
    pub body: String,
    #[serde(flatten)]
    pub details: JobDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::service_client::disposition_file_name;

    #[test]
    fn test_cover_letter_prefers_server_file_name() {
        let job = JobDetails::new("hr@x.com", "X", "Eng");
        let document = Document {
            content: Bytes::from_static(b"%PDF-1.4"),
            content_type: "application/pdf".into(),
            file_name: Some("letter.pdf".into()),
        };
        let letter = CoverLetter::from_document(document, "Ada", &job);
        assert_eq!(letter.file_name, "letter.pdf");
        assert_eq!(letter.len(), 8);
    }

    #[test]
    fn test_cover_letter_derives_file_name() {
        let job = JobDetails::new("hr@x.com", "Tech Corp", "Senior Engineer");
        let document = Document {
            content: Bytes::from_static(b"%PDF-1.4"),
            content_type: "application/pdf".into(),
            file_name: None,
        };
        let letter = CoverLetter::from_document(document, "Ada Lovelace", &job);
        assert_eq!(
            letter.file_name,
            "cover_letter_ada_lovelace_tech_corp_senior_engineer.pdf"
        );
    }

    #[tokio::test]
    async fn test_save_to_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let letter = CoverLetter {
            file_name: "cover_letter.pdf".into(),
            content: Bytes::from_static(b"%PDF-1.4 test"),
        };

        let path = letter.save_to(dir.path()).await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.4 test");
    }

    #[test]
    fn test_cover_letter_ignores_directories_in_server_name() {
        let job = JobDetails::new("hr@x.com", "X", "Eng");
        let document = Document {
            content: Bytes::from_static(b"%PDF-1.4"),
            content_type: "application/pdf".into(),
            file_name: disposition_file_name(r#"attachment; filename="../escaped.pdf""#),
        };
        let letter = CoverLetter::from_document(document, "Ada", &job);
        assert_eq!(letter.file_name, "escaped.pdf");

        let document = Document {
            content: Bytes::from_static(b"%PDF-1.4"),
            content_type: "application/pdf".into(),
            file_name: Some("../".into()),
        };
        let letter = CoverLetter::from_document(document, "Ada", &job);
        assert_eq!(letter.file_name, "cover_letter_ada_x_eng.pdf");
    }

    #[tokio::test]
    async fn test_save_to_stays_inside_output_dir() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("out");
        let letter = CoverLetter {
            file_name: "../escaped.pdf".into(),
            content: Bytes::from_static(b"%PDF-1.4"),
        };

        let path = letter.save_to(&out).await.unwrap();
        assert_eq!(path, out.join("escaped.pdf"));
        assert!(path.exists());
        assert!(!root.path().join("escaped.pdf").exists());
    }

    #[test]
    fn test_send_request_carries_job_fields() {
        let request = SendRequest {
            profile_id: ProfileId::new("42"),
            subject: "Hi".into(),
            body: "Dear...".into(),
            details: JobDetails::new("hr@x.com", "X", "Eng"),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["subject"], "Hi");
        assert_eq!(value["hr_email"], "hr@x.com");
        assert_eq!(value["profile_id"], "42");
    }
}
