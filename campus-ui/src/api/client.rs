//! HTTP API Client
//!
//! gloo-net implementation of the records and auth APIs.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use campus_records::api::{
    endpoint, paths, status_error, AuthApi, Envelope, EnquiryStatusUpdate, ProfileBody, RecordsApi,
};
use campus_records::models::{
    AuthResponse, Credentials, Enquiry, EnquiryStatus, Registration, ResultRecord, StudentRecord,
    UserProfile,
};
use campus_records::{ApiError, ApiResult, StorageError};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

const API_URL_KEY: &str = "campus_api_url";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = local_storage()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    normalize_base(&url)
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) -> Result<(), StorageError> {
    local_storage()
        .ok_or(StorageError::Unavailable)?
        .set_item(API_URL_KEY, &normalize_base(url))
        .map_err(|_| StorageError::Io("localStorage.setItem failed".to_string()))
}

fn normalize_base(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        url.to_string()
    }
}

pub(crate) fn console_warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

/// Records API client for the browser
#[derive(Debug, Clone)]
pub struct BrowserApi {
    base: String,
    token: Option<String>,
}

impl BrowserApi {
    pub fn new(base: String, token: Option<String>) -> Self {
        Self { base, token }
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base, path)
    }

    fn authorized(&self, builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token.or(self.token.as_deref()) {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> ApiResult<Response> {
        builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    async fn send_json<B: Serialize + ?Sized>(builder: RequestBuilder, body: &B) -> ApiResult<Response> {
        builder
            .json(body)
            .map_err(|e| ApiError::Transport(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn failure(response: Response) -> ApiError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let error = status_error(status, &text);
        console_warn(&format!("Request failed: {}", error));
        error
    }

    async fn lookup<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Option<T>> {
        let response = Self::send(self.authorized(Request::get(&self.url(path)), None)).await?;
        if response.status() == 404 {
            return Ok(None);
        }
        if !response.ok() {
            return Err(Self::failure(response).await);
        }
        let envelope: Envelope<T> = Self::decode(response).await?;
        Ok(envelope.into_found())
    }

    async fn write<B: Serialize + ?Sized>(&self, builder: RequestBuilder, body: &B) -> ApiResult<()> {
        let response = Self::send_json(self.authorized(builder, None), body).await?;
        if !response.ok() {
            return Err(Self::failure(response).await);
        }
        let envelope: Envelope<serde_json::Value> = Self::decode(response).await?;
        envelope.into_ack()
    }

    async fn authenticate<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<AuthResponse> {
        let response = Self::send_json(Request::post(&self.url(path)), body).await?;
        if !response.ok() {
            return Err(Self::failure(response).await);
        }
        Self::decode(response).await
    }
}

#[async_trait(?Send)]
impl AuthApi for BrowserApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        self.authenticate(paths::LOGIN, credentials).await
    }

    async fn register(&self, registration: &Registration) -> ApiResult<AuthResponse> {
        self.authenticate(paths::REGISTER, registration).await
    }

    async fn profile(&self, token: &str) -> ApiResult<UserProfile> {
        let request = self.authorized(Request::get(&self.url(paths::PROFILE)), Some(token));
        let response = Self::send(request).await?;
        if !response.ok() {
            return Err(Self::failure(response).await);
        }
        let body: ProfileBody = Self::decode(response).await?;
        body.into_profile()
    }
}

#[async_trait(?Send)]
impl RecordsApi for BrowserApi {
    async fn search_student(&self, query: &str) -> ApiResult<Option<StudentRecord>> {
        self.lookup(&paths::student_search(query)).await
    }

    async fn update_student(&self, email: &str, record: &StudentRecord) -> ApiResult<()> {
        self.write(Request::patch(&self.url(&paths::student(email))), record)
            .await
    }

    async fn fetch_result(&self, roll_number: &str) -> ApiResult<Option<ResultRecord>> {
        self.lookup(&paths::result_by_student(roll_number)).await
    }

    async fn create_result(&self, record: &ResultRecord) -> ApiResult<()> {
        self.write(Request::post(&self.url(paths::RESULT)), record).await
    }

    async fn update_result(&self, roll_number: &str, record: &ResultRecord) -> ApiResult<()> {
        self.write(Request::put(&self.url(&paths::result(roll_number))), record)
            .await
    }

    async fn list_enquiries(&self) -> ApiResult<Vec<Enquiry>> {
        Ok(self.lookup(paths::ENQUIRY).await?.unwrap_or_default())
    }

    async fn set_enquiry_status(&self, id: &str, status: EnquiryStatus) -> ApiResult<()> {
        self.write(
            Request::patch(&self.url(&paths::enquiry(id))),
            &EnquiryStatusUpdate { status },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("http://10.0.0.5/api/ "), "http://10.0.0.5/api");
        assert_eq!(normalize_base("  "), DEFAULT_API_BASE);
    }

    #[test]
    fn test_urls() {
        let api = BrowserApi::new(DEFAULT_API_BASE.to_string(), None);
        assert_eq!(
            api.url(&paths::student_search("9876543210")),
            "http://localhost:8080/api/student/search/9876543210"
        );
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn api_base_round_trips_through_local_storage() {
        set_api_base(" http://10.0.0.5:8080/api/ ").unwrap();
        assert_eq!(get_api_base(), "http://10.0.0.5:8080/api");

        set_api_base("").unwrap();
        assert_eq!(get_api_base(), DEFAULT_API_BASE);
    }
}
