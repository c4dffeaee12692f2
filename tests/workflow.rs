use jobmailer_client::types::{EmailDraft, JobDetails, ProfileDraft};
use jobmailer_client::{ServiceClient, Stage, WorkflowCoordinator, WorkflowError};
use mockito::{Matcher, Server, ServerGuard};

fn profile() -> ProfileDraft {
    ProfileDraft {
        name: "A".into(),
        location: "B".into(),
        phone_number: "1".into(),
        primary_email: "a@b.com".into(),
        programming_languages: "Go".into(),
        ..Default::default()
    }
}

fn job() -> JobDetails {
    JobDetails::new("hr@x.com", "X", "Eng")
}

fn coordinator(server: &ServerGuard) -> WorkflowCoordinator {
    WorkflowCoordinator::new(ServiceClient::new(server.url()).unwrap())
}

async fn mock_json(server: &mut ServerGuard, path: &str, status: usize, body: &str) -> mockito::Mock {
    server
        .mock("POST", path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

async fn mock_pdf(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/api/generate-cover-letter-pdf/")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body(b"%PDF-1.4 letter".to_vec())
        .create_async()
        .await
}

#[tokio::test]
async fn profile_success_advances_and_retains_id() {
    let mut server = Server::new_async().await;
    let mock = mock_json(
        &mut server,
        "/api/create-profile/",
        200,
        r#"{"status": "success", "profile_id": "42"}"#,
    )
    .await;

    let mut coordinator = coordinator(&server);
    let id = coordinator.submit_profile(profile()).await.unwrap();

    assert_eq!(id.as_str(), "42");
    assert_eq!(coordinator.stage(), Stage::AwaitingJobDetails);
    assert_eq!(coordinator.stage().number(), 2);
    let retained = coordinator.session().profile().unwrap();
    assert_eq!(retained.id.as_str(), "42");
    assert_eq!(retained.draft.name, "A");
    assert!(!coordinator.session().is_loading());
    mock.assert_async().await;
}

#[tokio::test]
async fn profile_remote_failure_stays_and_reports() {
    let mut server = Server::new_async().await;
    let _m = mock_json(
        &mut server,
        "/api/create-profile/",
        400,
        r#"{"error": "Missing required fields: name, location, phone_number, primary_email"}"#,
    )
    .await;

    let mut coordinator = coordinator(&server);
    let err = coordinator.submit_profile(profile()).await.unwrap_err();

    assert!(matches!(err, WorkflowError::Api(_)));
    assert_eq!(coordinator.stage(), Stage::AwaitingProfile);
    assert_eq!(
        coordinator.session().error(),
        Some("Missing required fields: name, location, phone_number, primary_email")
    );
    assert!(coordinator.session().profile().is_none());
    assert!(!coordinator.session().is_loading());
}

#[tokio::test]
async fn profile_network_failure_stays_and_reports() {
    let mut coordinator = WorkflowCoordinator::new(ServiceClient::new("http://127.0.0.1:1").unwrap());
    coordinator.submit_profile(profile()).await.unwrap_err();

    assert_eq!(coordinator.stage(), Stage::AwaitingProfile);
    assert!(coordinator.session().error().is_some());
    assert!(!coordinator.session().is_loading());
}

#[tokio::test]
async fn cover_letter_failure_does_not_block_email() {
    let mut server = Server::new_async().await;
    let _m = mock_json(&mut server, "/api/create-profile/", 200, r#"{"profile_id": "42"}"#).await;
    let email = server
        .mock("POST", "/api/generate-email-enhanced/")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "profile_id": "42",
            "hr_email": "hr@x.com",
            "company": "X",
            "role": "Eng",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "success", "email_text": "Dear..."}"#)
        .create_async()
        .await;
    let _m = mock_json(
        &mut server,
        "/api/generate-cover-letter-pdf/",
        500,
        r#"{"error": "PDF rendering failed"}"#,
    )
    .await;

    let mut coordinator = coordinator(&server);
    coordinator.submit_profile(profile()).await.unwrap();
    let artifacts = coordinator.submit_job_details(job()).await.unwrap();

    assert_eq!(artifacts.email_text, "Dear...");
    assert!(artifacts.cover_letter.is_none());
    assert_eq!(coordinator.stage(), Stage::AwaitingSend);
    assert_eq!(coordinator.stage().number(), 3);
    assert!(coordinator.session().error().is_none());
    assert_eq!(
        coordinator.session().advisories(),
        ["Cover letter generation failed: PDF rendering failed".to_string()]
    );
    email.assert_async().await;
}

#[tokio::test]
async fn email_failure_blocks_regardless_of_cover_letter() {
    let mut server = Server::new_async().await;
    let _m = mock_json(&mut server, "/api/create-profile/", 200, r#"{"profile_id": 42}"#).await;
    let _m = mock_json(
        &mut server,
        "/api/generate-email-enhanced/",
        404,
        r#"{"error": "User profile not found"}"#,
    )
    .await;
    let letter = server
        .mock("POST", "/api/generate-cover-letter-pdf/")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body(b"%PDF-1.4".to_vec())
        .expect(0)
        .create_async()
        .await;

    let mut coordinator = coordinator(&server);
    coordinator.submit_profile(profile()).await.unwrap();
    let err = coordinator.submit_job_details(job()).await.unwrap_err();

    assert_eq!(err.to_string(), "User profile not found");
    assert_eq!(coordinator.stage(), Stage::AwaitingJobDetails);
    assert_eq!(coordinator.session().error(), Some("User profile not found"));
    assert!(coordinator.session().artifacts().is_none());
    assert!(!coordinator.session().is_loading());
    letter.assert_async().await;
}

#[tokio::test]
async fn full_cycle_then_send_and_reset() {
    let mut server = Server::new_async().await;
    let _m = mock_json(&mut server, "/api/create-profile/", 200, r#"{"profile_id": "42"}"#).await;
    let _m = mock_json(
        &mut server,
        "/api/generate-email-enhanced/",
        200,
        r#"{"email_text": "Dear..."}"#,
    )
    .await;
    let _m = mock_pdf(&mut server).await;
    let send = server
        .mock("POST", "/api/send-email-with-resume-and-cover-letter/")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "profile_id": "42",
            "subject": "Edited subject",
            "body": "Edited body",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "sent", "message": "Email sent successfully", "resume_attached": true}"#)
        .create_async()
        .await;

    let mut coordinator = coordinator(&server);
    coordinator.submit_profile(profile()).await.unwrap();
    let artifacts = coordinator.submit_job_details(job()).await.unwrap();
    let letter = artifacts.cover_letter.as_ref().unwrap();
    assert_eq!(letter.content.as_ref(), b"%PDF-1.4 letter");
    assert_eq!(letter.file_name, "cover_letter_a_x_eng.pdf");

    let confirmation = coordinator
        .send_email(EmailDraft::new("Edited subject", "Edited body"))
        .await
        .unwrap();
    assert_eq!(confirmation.summary(), "Email sent successfully");
    assert!(!coordinator.session().is_loading());
    assert!(coordinator.session().error().is_none());
    assert_eq!(coordinator.stage(), Stage::AwaitingSend);
    send.assert_async().await;

    coordinator.reset();
    let session = coordinator.session();
    assert_eq!(session.stage(), Stage::AwaitingProfile);
    assert!(session.profile().is_none());
    assert!(session.job().is_none());
    assert!(session.artifacts().is_none());
    assert!(session.error().is_none());
    assert!(session.confirmation().is_none());
}

#[tokio::test]
async fn send_failure_stays_for_retry() {
    let mut server = Server::new_async().await;
    let _m = mock_json(&mut server, "/api/create-profile/", 200, r#"{"profile_id": "42"}"#).await;
    let _m = mock_json(
        &mut server,
        "/api/generate-email-enhanced/",
        200,
        r#"{"email_text": "Dear..."}"#,
    )
    .await;
    let _m = mock_pdf(&mut server).await;
    let _m = server
        .mock("POST", "/api/send-email-with-resume-and-cover-letter/")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Failed to send email: SMTP unavailable"}"#)
        .create_async()
        .await;

    let mut coordinator = coordinator(&server);
    coordinator.submit_profile(profile()).await.unwrap();
    coordinator.submit_job_details(job()).await.unwrap();
    coordinator
        .send_email(EmailDraft::new("Hi", "Dear..."))
        .await
        .unwrap_err();

    assert_eq!(coordinator.stage(), Stage::AwaitingSend);
    assert_eq!(
        coordinator.session().error(),
        Some("Failed to send email: SMTP unavailable")
    );
    assert!(coordinator.session().artifacts().is_some());
    assert!(!coordinator.session().is_loading());
}

#[tokio::test]
async fn reset_from_error_state() {
    let mut server = Server::new_async().await;
    let _m = mock_json(&mut server, "/api/create-profile/", 503, "").await;

    let mut coordinator = coordinator(&server);
    coordinator.submit_profile(profile()).await.unwrap_err();
    assert_eq!(
        coordinator.session().error(),
        Some("HTTP 503: Service Unavailable")
    );

    coordinator.reset();
    assert_eq!(coordinator.stage(), Stage::AwaitingProfile);
    assert!(coordinator.session().error().is_none());
}

#[tokio::test]
async fn fetch_profile_uses_retained_id() {
    let mut server = Server::new_async().await;
    let _m = mock_json(&mut server, "/api/create-profile/", 200, r#"{"profile_id": 42}"#).await;
    let _m = server
        .mock("GET", "/api/get-profile/42/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "success", "profile": {"id": 42, "name": "A", "has_resume": false}}"#)
        .create_async()
        .await;

    let mut coordinator = coordinator(&server);
    assert_eq!(
        coordinator.fetch_profile().await.unwrap_err(),
        WorkflowError::MissingProfile
    );

    coordinator.submit_profile(profile()).await.unwrap();
    let record = coordinator.fetch_profile().await.unwrap();
    assert_eq!(record.name, "A");
    assert!(!record.has_resume);
}

#[tokio::test]
async fn reset_from_job_details_stage() {
    let mut server = Server::new_async().await;
    let _m = mock_json(&mut server, "/api/create-profile/", 200, r#"{"profile_id": "42"}"#).await;
    let _m = mock_json(
        &mut server,
        "/api/generate-email-enhanced/",
        500,
        r#"{"error": "Generation failed"}"#,
    )
    .await;

    let mut coordinator = coordinator(&server);
    coordinator.submit_profile(profile()).await.unwrap();
    coordinator.submit_job_details(job()).await.unwrap_err();
    assert_eq!(coordinator.stage(), Stage::AwaitingJobDetails);
    assert!(coordinator.session().job().is_some());
    assert!(coordinator.session().error().is_some());

    coordinator.reset();
    let session = coordinator.session();
    assert_eq!(session.stage(), Stage::AwaitingProfile);
    assert!(session.profile().is_none());
    assert!(session.job().is_none());
    assert!(session.artifacts().is_none());
    assert!(session.error().is_none());
    assert!(session.advisories().is_empty());
    assert!(!session.is_loading());
}
