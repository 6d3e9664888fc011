//! API Seams
//!
//! Traits implemented by the native reqwest client and the browser client,
//! plus the response envelope and endpoint paths both of them use.
//!
//! The traits are `?Send` because browser futures are not `Send`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::{
    AuthResponse, Credentials, Enquiry, EnquiryStatus, Registration, ResultRecord, StudentRecord,
    UserProfile,
};

/// Key under which the session token is persisted
pub const TOKEN_KEY: &str = "token";

/// `{ success, data?, message? }` wrapper used by every records endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Lookup semantics: `success: false` or no data means "not found"
    pub fn into_found(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }

    /// Write semantics: `success: false` is a rejection
    pub fn into_ack(self) -> ApiResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "Request was not successful".to_string()),
            ))
        }
    }
}

/// Authentication endpoints
#[async_trait(?Send)]
pub trait AuthApi {
    /// `POST /auth/login`
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse>;

    /// `POST /auth/register`
    async fn register(&self, registration: &Registration) -> ApiResult<AuthResponse>;

    /// `GET /auth/profile`, validating `token` server-side
    async fn profile(&self, token: &str) -> ApiResult<UserProfile>;
}

/// Records endpoints
///
/// Lookups return `Ok(None)` for a miss (404 or `success: false`).
#[async_trait(?Send)]
pub trait RecordsApi {
    /// `GET /student/search/{query}`
    async fn search_student(&self, query: &str) -> ApiResult<Option<StudentRecord>>;

    /// `PATCH /student/{email}`
    async fn update_student(&self, email: &str, record: &StudentRecord) -> ApiResult<()>;

    /// `GET /result/student/{rollNumber}`
    async fn fetch_result(&self, roll_number: &str) -> ApiResult<Option<ResultRecord>>;

    /// `POST /result`
    async fn create_result(&self, record: &ResultRecord) -> ApiResult<()>;

    /// `PUT /result/{rollNumber}`
    async fn update_result(&self, roll_number: &str, record: &ResultRecord) -> ApiResult<()>;

    /// `GET /enquiry`
    async fn list_enquiries(&self) -> ApiResult<Vec<Enquiry>>;

    /// `PATCH /enquiry/{id}`
    async fn set_enquiry_status(&self, id: &str, status: EnquiryStatus) -> ApiResult<()>;
}

/// Endpoint paths, relative to the API base URL
pub mod paths {
    pub const LOGIN: &str = "/auth/login";
    pub const REGISTER: &str = "/auth/register";
    pub const PROFILE: &str = "/auth/profile";
    pub const RESULT: &str = "/result";
    pub const ENQUIRY: &str = "/enquiry";

    pub fn student_search(query: &str) -> String {
        format!("/student/search/{}", urlencoding::encode(query.trim()))
    }

    pub fn student(email: &str) -> String {
        format!("/student/{}", urlencoding::encode(email))
    }

    pub fn result_by_student(roll_number: &str) -> String {
        format!("/result/student/{}", urlencoding::encode(roll_number.trim()))
    }

    pub fn result(roll_number: &str) -> String {
        format!("/result/{}", urlencoding::encode(roll_number))
    }

    pub fn enquiry(id: &str) -> String {
        format!("/enquiry/{}", urlencoding::encode(id))
    }
}

/// Join a base URL and an endpoint path
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Error for a non-success HTTP status, preferring the envelope's message
pub fn status_error(status: u16, body: &str) -> ApiError {
    if status == 401 || status == 403 {
        return ApiError::Unauthorized;
    }
    let message = serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| body.trim().to_string());
    ApiError::Status { status, message }
}

/// Body of `PATCH /enquiry/{id}`
#[derive(Debug, Serialize)]
pub struct EnquiryStatusUpdate {
    pub status: EnquiryStatus,
}

/// Profile responses come either bare or wrapped in an envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProfileBody {
    Bare(UserProfile),
    Wrapped(Envelope<UserProfile>),
}

impl ProfileBody {
    pub fn into_profile(self) -> ApiResult<UserProfile> {
        match self {
            ProfileBody::Bare(user) => Ok(user),
            ProfileBody::Wrapped(envelope) => envelope
                .into_found()
                .ok_or_else(|| ApiError::Rejected("Invalid token".to_string())),
        }
    }
}
