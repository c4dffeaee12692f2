// src/core/service_client.rs
//! HTTP client for the job mailer service. One fixed base address, JSON by
//! default, PDF documents decoded as raw bytes, every failure normalized.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::error::ApiError;
use crate::types::{
    CreateProfileResponse, GeneratedEmailResponse, HealthStatus, JobApplicationRequest,
    ProfileDraft, ProfileEnvelope, ProfileId, ProfileRecord, SendConfirmation, SendRequest,
};
use crate::utils;

pub const DEFAULT_BASE_URL: &str = "https://jobmailer-dezw.onrender.com";

pub const HEALTH_ENDPOINT: &str = "/api/health/";
pub const CREATE_PROFILE_ENDPOINT: &str = "/api/create-profile/";
pub const GET_PROFILE_ENDPOINT: &str = "/api/get-profile/";
pub const GENERATE_EMAIL_ENDPOINT: &str = "/api/generate-email-enhanced/";
pub const GENERATE_COVER_LETTER_ENDPOINT: &str = "/api/generate-cover-letter-pdf/";
pub const SEND_WITH_RESUME_ENDPOINT: &str = "/api/send-email-with-resume/";
pub const SEND_WITH_RESUME_AND_COVER_LETTER_ENDPOINT: &str =
    "/api/send-email-with-resume-and-cover-letter/";

const JSON_MEDIA_TYPE: &str = "application/json";
const PDF_MEDIA_TYPE: &str = "application/pdf";
const ACCEPT_ANY_PAYLOAD: &str = "application/json, application/pdf";

/// How a successful response body is decoded, decided from its declared media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Json,
    Document,
}

impl ResponseKind {
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(value) if value.to_ascii_lowercase().contains(PDF_MEDIA_TYPE) => {
                ResponseKind::Document
            }
            _ => ResponseKind::Json,
        }
    }
}

/// Binary document returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub content: Bytes,
    pub content_type: String,
    pub file_name: Option<String>,
}

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Document(Document),
}

impl Payload {
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Payload::Json(value) => Ok(serde_json::from_value(value)?),
            Payload::Document(document) => Err(ApiError::Decode(format!(
                "expected JSON, received {}",
                document.content_type
            ))),
        }
    }

    pub fn into_document(self) -> Result<Document, ApiError> {
        match self {
            Payload::Document(document) => Ok(document),
            Payload::Json(_) => Err(ApiError::Decode(
                "expected a PDF document, received JSON".to_string(),
            )),
        }
    }
}

#[derive(Debug)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Form),
}

/// Method, headers and body of a single call.
#[derive(Debug)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: RequestBody,
    /// When off, the default JSON headers are not applied at all.
    pub default_headers: bool,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            default_headers: true,
        }
    }

    pub fn post_json<T: Serialize>(payload: &T) -> Result<Self, ApiError> {
        Ok(Self {
            method: Method::POST,
            headers: HeaderMap::new(),
            body: RequestBody::Json(serde_json::to_value(payload)?),
            default_headers: true,
        })
    }

    /// Multipart submission. The JSON content type is suppressed so the
    /// transport writes `multipart/form-data` with its own boundary.
    pub fn post_multipart(form: Form) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_ANY_PAYLOAD));

        Self {
            method: Method::POST,
            headers,
            body: RequestBody::Multipart(form),
            default_headers: false,
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_ANY_PAYLOAD));
    headers
}

/// Pull `filename` out of a `Content-Disposition` header value.
pub fn disposition_file_name(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client for the given base address
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Perform one call and decode the response according to its media type.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Payload, ApiError> {
        let url = self.url(endpoint);

        let mut headers = if options.default_headers {
            default_headers()
        } else {
            HeaderMap::new()
        };
        headers.extend(options.headers);

        info!("Calling {} {}", options.method, url);

        let mut builder = self.client.request(options.method.clone(), &url).headers(headers);
        builder = match options.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(serde_json::to_vec(&value)?),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        debug!("Response status from {}: {}", url, status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status, &error_text);
            warn!("Service error from {}: {}", url, err);
            return Err(err);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(disposition_file_name);

        match ResponseKind::from_content_type(content_type.as_deref()) {
            ResponseKind::Document => {
                let content = response.bytes().await.map_err(ApiError::from)?;
                debug!("Received {} byte document from {}", content.len(), url);
                Ok(Payload::Document(Document {
                    content,
                    content_type: content_type.unwrap_or_else(|| PDF_MEDIA_TYPE.to_string()),
                    file_name,
                }))
            }
            ResponseKind::Json => {
                let body = response.bytes().await.map_err(ApiError::from)?;
                let value = serde_json::from_slice::<Value>(&body)?;
                Ok(Payload::Json(value))
            }
        }
    }

    /// GET the service health payload
    pub async fn check_health(&self) -> Result<HealthStatus, ApiError> {
        self.request(HEALTH_ENDPOINT, RequestOptions::get())
            .await?
            .into_json()
    }

    /// Create (or update) a profile from form input, uploading the resume if present
    pub async fn create_profile(&self, draft: &ProfileDraft) -> Result<CreateProfileResponse, ApiError> {
        let form = profile_form(draft)?;
        self.request(CREATE_PROFILE_ENDPOINT, RequestOptions::post_multipart(form))
            .await?
            .into_json()
    }

    pub async fn get_profile(&self, profile_id: &ProfileId) -> Result<ProfileRecord, ApiError> {
        let endpoint = format!("{}{}/", GET_PROFILE_ENDPOINT, profile_id);
        let envelope: ProfileEnvelope = self
            .request(&endpoint, RequestOptions::get())
            .await?
            .into_json()?;
        Ok(envelope.profile)
    }

    pub async fn generate_email(
        &self,
        request: &JobApplicationRequest,
    ) -> Result<GeneratedEmailResponse, ApiError> {
        self.request(GENERATE_EMAIL_ENDPOINT, RequestOptions::post_json(request)?)
            .await?
            .into_json()
    }

    pub async fn generate_cover_letter(
        &self,
        request: &JobApplicationRequest,
    ) -> Result<Document, ApiError> {
        let options = RequestOptions::post_json(request)?
            .header(ACCEPT, HeaderValue::from_static(PDF_MEDIA_TYPE));
        self.request(GENERATE_COVER_LETTER_ENDPOINT, options)
            .await?
            .into_document()
    }

    pub async fn send_email_with_resume(
        &self,
        request: &SendRequest,
    ) -> Result<SendConfirmation, ApiError> {
        self.request(SEND_WITH_RESUME_ENDPOINT, RequestOptions::post_json(request)?)
            .await?
            .into_json()
    }

    pub async fn send_email_with_resume_and_cover_letter(
        &self,
        request: &SendRequest,
    ) -> Result<SendConfirmation, ApiError> {
        self.request(
            SEND_WITH_RESUME_AND_COVER_LETTER_ENDPOINT,
            RequestOptions::post_json(request)?,
        )
        .await?
        .into_json()
    }
}

/// Multipart body for profile creation: every present field as text, the resume as a file part.
fn profile_form(draft: &ProfileDraft) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for (key, value) in draft.text_fields() {
        form = form.text(key, value);
    }

    if let Some(resume) = &draft.resume_file {
        let mime = utils::resume_content_type(&resume.file_name).unwrap_or("application/octet-stream");
        let part = Part::bytes(resume.content.clone())
            .file_name(resume.file_name.clone())
            .mime_str(mime)
            .map_err(|e| ApiError::Transport(format!("Failed to create multipart: {}", e)))?;
        form = form.part("resume_file", part);
    }

    Ok(form)
}
