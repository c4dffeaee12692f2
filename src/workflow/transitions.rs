// src/workflow/transitions.rs
//! One handler per workflow transition. Each takes the session by mutable
//! reference and is the only code that changes it while it runs.

use tracing::{error, info, warn};

use super::error::WorkflowError;
use super::validation;
use super::{Session, Stage};
use crate::core::ServiceClient;
use crate::types::{
    CoverLetter, EmailDraft, GeneratedArtifacts, JobApplicationRequest, JobDetails, ProfileDraft,
    ProfileId, RetainedProfile, SendConfirmation, SendRequest,
};

/// Open a transition attempt: refuse while another is outstanding, then
/// clear the per-attempt slots.
fn begin(session: &mut Session) -> Result<(), WorkflowError> {
    if session.loading {
        return Err(WorkflowError::Busy);
    }
    session.error = None;
    session.advisories.clear();
    session.confirmation = None;
    Ok(())
}

/// Record a failed attempt in the session's error slot.
fn fail(session: &mut Session, err: WorkflowError) -> WorkflowError {
    error!("{} failed: {}", session.stage, err);
    session.loading = false;
    session.error = Some(err.to_string());
    err
}

fn expect_stage(session: &Session, expected: Stage, action: &'static str) -> Result<(), WorkflowError> {
    if session.stage == expected {
        Ok(())
    } else {
        Err(WorkflowError::InvalidStage {
            action,
            actual: session.stage,
        })
    }
}

fn retained_profile(session: &Session) -> Result<(ProfileId, String), WorkflowError> {
    session
        .profile
        .as_ref()
        .map(|profile| (profile.id.clone(), profile.draft.name.clone()))
        .ok_or(WorkflowError::MissingProfile)
}

/// `AwaitingProfile -> AwaitingJobDetails`
pub async fn submit_profile(
    client: &ServiceClient,
    session: &mut Session,
    draft: ProfileDraft,
) -> Result<ProfileId, WorkflowError> {
    begin(session)?;
    if let Err(err) = expect_stage(session, Stage::AwaitingProfile, "create a profile")
        .and_then(|_| validation::validate_profile(&draft))
    {
        return Err(fail(session, err));
    }

    session.loading = true;
    let created = match client.create_profile(&draft).await {
        Ok(created) => created,
        Err(err) => return Err(fail(session, err.into())),
    };

    info!("Profile {} created for {}", created.profile_id, draft.name);

    let id = created.profile_id;
    session.profile = Some(RetainedProfile {
        id: id.clone(),
        draft,
    });
    // artifacts from an earlier cycle belong to the previous profile
    session.artifacts = None;
    session.stage = Stage::AwaitingJobDetails;
    session.loading = false;
    Ok(id)
}

/// `AwaitingJobDetails -> AwaitingSend`
///
/// Email generation must succeed. Cover-letter generation runs after it and
/// is best-effort: its failure becomes an advisory and the transition still
/// completes without a cover letter.
pub async fn submit_job_details<'a>(
    client: &ServiceClient,
    session: &'a mut Session,
    details: JobDetails,
) -> Result<&'a GeneratedArtifacts, WorkflowError> {
    begin(session)?;
    let (profile_id, applicant) = match expect_stage(
        session,
        Stage::AwaitingJobDetails,
        "generate an application",
    )
    .and_then(|_| retained_profile(session))
    .and_then(|retained| validation::validate_job(&details).map(|_| retained))
    {
        Ok(retained) => retained,
        Err(err) => return Err(fail(session, err)),
    };

    session.loading = true;
    session.job = Some(details.clone());
    let request = JobApplicationRequest::new(profile_id, details);

    let email = match client.generate_email(&request).await {
        Ok(email) => email,
        Err(err) => return Err(fail(session, err.into())),
    };
    if let Some(warning) = email.warning.filter(|w| !w.trim().is_empty()) {
        warn!("Email generation warning: {}", warning);
        session.advisories.push(warning);
    }

    let cover_letter = match client.generate_cover_letter(&request).await {
        Ok(document) => Some(CoverLetter::from_document(
            document,
            &applicant,
            &request.details,
        )),
        Err(err) => {
            warn!("Cover letter generation failed: {}", err);
            session
                .advisories
                .push(format!("Cover letter generation failed: {}", err));
            None
        }
    };

    info!(
        "Application for {} at {} generated (cover letter: {})",
        request.details.role,
        request.details.company,
        cover_letter.is_some()
    );

    session.stage = Stage::AwaitingSend;
    session.loading = false;
    let artifacts = session.artifacts.insert(GeneratedArtifacts {
        email_text: email.email_text,
        cover_letter,
    });
    Ok(&*artifacts)
}

/// Terminal send action. Stays in `AwaitingSend` whatever the outcome.
pub async fn send_email(
    client: &ServiceClient,
    session: &mut Session,
    draft: EmailDraft,
) -> Result<SendConfirmation, WorkflowError> {
    begin(session)?;
    let prepared = expect_stage(session, Stage::AwaitingSend, "send an email")
        .and_then(|_| retained_profile(session))
        .and_then(|(profile_id, _)| {
            validation::validate_email(&draft)?;
            let details = session.job.clone().ok_or(WorkflowError::InvalidStage {
                action: "send an email",
                actual: session.stage,
            })?;
            Ok((profile_id, details))
        });
    let (profile_id, details) = match prepared {
        Ok(prepared) => prepared,
        Err(err) => return Err(fail(session, err)),
    };

    let subject = if draft.subject.trim().is_empty() {
        details.default_subject()
    } else {
        draft.subject
    };
    let with_cover_letter = session
        .artifacts
        .as_ref()
        .is_some_and(GeneratedArtifacts::has_cover_letter);

    let request = SendRequest {
        profile_id,
        subject,
        body: draft.body,
        details,
    };

    session.loading = true;
    let sent = if with_cover_letter {
        client.send_email_with_resume_and_cover_letter(&request).await
    } else {
        client.send_email_with_resume(&request).await
    };

    match sent {
        Ok(confirmation) => {
            info!(
                "Email sent to {} ({})",
                request.details.hr_email,
                confirmation.summary()
            );
            session.confirmation = Some(confirmation.clone());
            session.loading = false;
            Ok(confirmation)
        }
        Err(err) => Err(fail(session, err.into())),
    }
}

/// Step back one stage without touching the network.
pub fn back(session: &mut Session) -> Stage {
    match session.stage {
        Stage::AwaitingProfile => {}
        Stage::AwaitingJobDetails => {
            session.stage = Stage::AwaitingProfile;
        }
        Stage::AwaitingSend => {
            // regenerated on the next submit
            session.artifacts = None;
            session.stage = Stage::AwaitingJobDetails;
        }
    }
    session.error = None;
    session.advisories.clear();
    session.confirmation = None;
    session.stage
}

/// Discard everything and return to the first stage.
pub fn reset(session: &mut Session) {
    if session.artifacts.as_ref().is_some_and(GeneratedArtifacts::has_cover_letter) {
        info!("Releasing generated cover letter");
    }
    *session = Session::default();
}
