// src/workflow/validation.rs
//! Required-field checks run before any request leaves the client

use super::error::WorkflowError;
use crate::types::{EmailDraft, JobDetails, ProfileDraft};
use crate::utils;

fn missing_fields(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

fn require(fields: &[(&'static str, &str)]) -> Result<(), WorkflowError> {
    let missing = missing_fields(fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(WorkflowError::Validation { missing })
    }
}

pub fn validate_profile(draft: &ProfileDraft) -> Result<(), WorkflowError> {
    require(&[
        ("name", draft.name.as_str()),
        ("location", draft.location.as_str()),
        ("phone_number", draft.phone_number.as_str()),
        ("primary_email", draft.primary_email.as_str()),
        ("programming_languages", draft.programming_languages.as_str()),
    ])?;

    if let Some(resume) = &draft.resume_file {
        utils::validate_file_extension(&resume.file_name, utils::RESUME_EXTENSIONS)
            .map_err(|_| WorkflowError::UnsupportedResume(resume.file_name.clone()))?;
    }

    Ok(())
}

pub fn validate_job(details: &JobDetails) -> Result<(), WorkflowError> {
    require(&[
        ("hr_email", details.hr_email.as_str()),
        ("company", details.company.as_str()),
        ("role", details.role.as_str()),
    ])
}

pub fn validate_email(draft: &EmailDraft) -> Result<(), WorkflowError> {
    require(&[("body", draft.body.as_str())])
}
