// src/types/mod.rs
pub mod artifacts;
pub mod job;
pub mod profile;
pub mod response;

pub use artifacts::{CoverLetter, EmailDraft, GeneratedArtifacts, SendRequest};
pub use job::{JobApplicationRequest, JobDetails};
pub use profile::{ProfileDraft, ProfileEnvelope, ProfileId, ProfileRecord, ResumeFile, RetainedProfile};
pub use response::{CreateProfileResponse, GeneratedEmailResponse, HealthStatus, SendConfirmation};
