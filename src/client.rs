//! Records API HTTP Client
//!
//! reqwest implementation of [`AuthApi`] and [`RecordsApi`] used by the CLI.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::api::{
    endpoint, paths, status_error, AuthApi, Envelope, EnquiryStatusUpdate, ProfileBody, RecordsApi,
};
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AuthResponse, Credentials, Enquiry, EnquiryStatus, Registration, ResultRecord, StudentRecord,
    UserProfile,
};

/// Records API client
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a bearer token to every following request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token.or(self.token.as_deref()) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Transport("Request timed out".to_string())
            } else if e.is_connect() {
                ApiError::Transport(format!("Cannot reach {}", self.base_url))
            } else {
                ApiError::Transport(e.to_string())
            }
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Turn a non-success response into an error
    async fn failure(response: Response) -> ApiError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        status_error(status.as_u16(), &text)
    }

    /// GET a lookup endpoint; 404 and `success: false` are misses
    async fn lookup<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Option<T>> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.send(self.authorized(self.client.get(&url), None)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        let envelope: Envelope<T> = Self::decode(response).await?;
        Ok(envelope.into_found())
    }

    /// Send a write and expect an acknowledging envelope
    async fn write<B: Serialize + ?Sized>(&self, request: RequestBuilder, body: &B) -> ApiResult<()> {
        let response = self.send(self.authorized(request, None).json(body)).await?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        let envelope: Envelope<serde_json::Value> = Self::decode(response).await?;
        envelope.into_ack()
    }

    async fn authenticate<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<AuthResponse> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self.send(self.client.post(&url).json(body)).await?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        Self::decode(response).await
    }
}

#[async_trait(?Send)]
impl AuthApi for HttpClient {
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        self.authenticate(paths::LOGIN, credentials).await
    }

    async fn register(&self, registration: &Registration) -> ApiResult<AuthResponse> {
        self.authenticate(paths::REGISTER, registration).await
    }

    async fn profile(&self, token: &str) -> ApiResult<UserProfile> {
        let url = self.url(paths::PROFILE);
        let response = self
            .send(self.authorized(self.client.get(&url), Some(token)))
            .await?;
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        let body: ProfileBody = Self::decode(response).await?;
        body.into_profile()
    }
}

#[async_trait(?Send)]
impl RecordsApi for HttpClient {
    async fn search_student(&self, query: &str) -> ApiResult<Option<StudentRecord>> {
        self.lookup(&paths::student_search(query)).await
    }

    async fn update_student(&self, email: &str, record: &StudentRecord) -> ApiResult<()> {
        let url = self.url(&paths::student(email));
        tracing::debug!(%url, "PATCH");
        self.write(self.client.patch(&url), record).await
    }

    async fn fetch_result(&self, roll_number: &str) -> ApiResult<Option<ResultRecord>> {
        self.lookup(&paths::result_by_student(roll_number)).await
    }

    async fn create_result(&self, record: &ResultRecord) -> ApiResult<()> {
        let url = self.url(paths::RESULT);
        tracing::debug!(%url, "POST");
        self.write(self.client.post(&url), record).await
    }

    async fn update_result(&self, roll_number: &str, record: &ResultRecord) -> ApiResult<()> {
        let url = self.url(&paths::result(roll_number));
        tracing::debug!(%url, "PUT");
        self.write(self.client.put(&url), record).await
    }

    async fn list_enquiries(&self) -> ApiResult<Vec<Enquiry>> {
        Ok(self.lookup(paths::ENQUIRY).await?.unwrap_or_default())
    }

    async fn set_enquiry_status(&self, id: &str, status: EnquiryStatus) -> ApiResult<()> {
        let url = self.url(&paths::enquiry(id));
        tracing::debug!(%url, "PATCH");
        self.write(self.client.patch(&url), &EnquiryStatusUpdate { status })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn reply(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
    }

    /// Serve `replies` one connection at a time; yields the request heads it saw
    async fn canned_server(replies: Vec<String>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let mut heads = Vec::new();
            for reply in replies {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&buf[..n]);
                }
                heads.push(String::from_utf8_lossy(&head).to_lowercase());
                socket.write_all(reply.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
            heads
        });
        (format!("http://{}/api", addr), handle)
    }

    fn client_for(base_url: String) -> HttpClient {
        let config = ApiConfig {
            base_url,
            request_timeout_secs: 5,
        };
        HttpClient::new(&config).unwrap()
    }

    #[test]
    fn test_client_from_config() {
        let config = ApiConfig {
            base_url: "http://localhost:8080/api/".to_string(),
            request_timeout_secs: 5,
        };
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(
            client.url(&paths::result("STU123")),
            "http://localhost:8080/api/result/STU123"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
        };
        let client = HttpClient::new(&config).unwrap();
        let err = client.fetch_result("STU123").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_lookup_misses_and_rejected_token() {
        let (base_url, server) = canned_server(vec![
            reply("404 Not Found", r#"{"success":false,"message":"Result not found"}"#),
            reply("200 OK", r#"{"success":false,"message":"No such student"}"#),
            reply("401 Unauthorized", r#"{"success":false,"message":"Token expired"}"#),
        ])
        .await;
        let client = client_for(base_url).with_token(Some("tok-1".to_string()));

        let missing = client.fetch_result("STU404").await.unwrap();
        assert!(missing.is_none());

        let unknown = client.search_student("nobody@college.edu").await.unwrap();
        assert!(unknown.is_none());

        let err = client.profile("stale").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized), "{:?}", err);

        let heads = server.await.unwrap();
        assert!(heads[0].starts_with("get /api/result/student/stu404 "));
        assert!(heads[0].contains("authorization: bearer tok-1"));
        assert!(heads[1].starts_with("get /api/student/search/nobody%40college.edu "));
        assert!(heads[2].starts_with("get /api/auth/profile "));
        assert!(heads[2].contains("authorization: bearer stale"));
    }

    #[tokio::test]
    async fn test_rejected_write_carries_server_message() {
        let (base_url, server) = canned_server(vec![reply(
            "500 Internal Server Error",
            r#"{"success":false,"message":"Database offline"}"#,
        )])
        .await;
        let client = client_for(base_url);

        let err = client
            .set_enquiry_status("e1", EnquiryStatus::Resolved)
            .await
            .unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Database offline");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let heads = server.await.unwrap();
        assert!(heads[0].starts_with("patch /api/enquiry/e1 "));
    }
}
