// src/workflow/mod.rs
//! Three-stage application workflow: profile, job details, review and send.

pub mod error;
pub mod transitions;
pub mod validation;

use std::fmt;

pub use error::WorkflowError;

use crate::core::{ApiError, ServiceClient};
use crate::types::{
    EmailDraft, GeneratedArtifacts, HealthStatus, JobDetails, ProfileDraft, ProfileId,
    ProfileRecord, RetainedProfile, SendConfirmation,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    #[default]
    AwaitingProfile,
    AwaitingJobDetails,
    AwaitingSend,
}

impl Stage {
    /// 1-based step number shown to the user.
    pub fn number(self) -> u8 {
        match self {
            Stage::AwaitingProfile => 1,
            Stage::AwaitingJobDetails => 2,
            Stage::AwaitingSend => 3,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::AwaitingProfile => "awaiting profile",
            Stage::AwaitingJobDetails => "awaiting job details",
            Stage::AwaitingSend => "awaiting send",
        };
        f.write_str(label)
    }
}

/// Everything the workflow accumulates for one session.
#[derive(Debug, Default)]
pub struct Session {
    stage: Stage,
    profile: Option<RetainedProfile>,
    job: Option<JobDetails>,
    artifacts: Option<GeneratedArtifacts>,
    error: Option<String>,
    advisories: Vec<String>,
    confirmation: Option<SendConfirmation>,
    loading: bool,
}

impl Session {
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn profile(&self) -> Option<&RetainedProfile> {
        self.profile.as_ref()
    }

    pub fn profile_id(&self) -> Option<&ProfileId> {
        self.profile.as_ref().map(|profile| &profile.id)
    }

    /// Last submitted job details, kept to prefill the form after going back.
    pub fn job(&self) -> Option<&JobDetails> {
        self.job.as_ref()
    }

    pub fn artifacts(&self) -> Option<&GeneratedArtifacts> {
        self.artifacts.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Non-blocking warnings from the last transition.
    pub fn advisories(&self) -> &[String] {
        &self.advisories
    }

    pub fn confirmation(&self) -> Option<&SendConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Owns the session and the client, and routes each user action to its transition.
pub struct WorkflowCoordinator {
    client: ServiceClient,
    session: Session,
}

impl WorkflowCoordinator {
    pub fn new(client: ServiceClient) -> Self {
        Self {
            client,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn stage(&self) -> Stage {
        self.session.stage
    }

    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    pub async fn submit_profile(&mut self, draft: ProfileDraft) -> Result<ProfileId, WorkflowError> {
        transitions::submit_profile(&self.client, &mut self.session, draft).await
    }

    pub async fn submit_job_details(
        &mut self,
        details: JobDetails,
    ) -> Result<&GeneratedArtifacts, WorkflowError> {
        transitions::submit_job_details(&self.client, &mut self.session, details).await
    }

    pub async fn send_email(&mut self, draft: EmailDraft) -> Result<SendConfirmation, WorkflowError> {
        transitions::send_email(&self.client, &mut self.session, draft).await
    }

    pub fn back(&mut self) -> Stage {
        transitions::back(&mut self.session)
    }

    pub fn reset(&mut self) {
        transitions::reset(&mut self.session)
    }

    /// Health probe; does not touch the session.
    pub async fn check_health(&self) -> Result<HealthStatus, ApiError> {
        self.client.check_health().await
    }

    /// Fetch the stored record of the retained profile.
    pub async fn fetch_profile(&self) -> Result<ProfileRecord, WorkflowError> {
        let id = self.session.profile_id().ok_or(WorkflowError::MissingProfile)?;
        Ok(self.client.get_profile(id).await?)
    }
}
