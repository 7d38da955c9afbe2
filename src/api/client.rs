use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{
    ApiResponse, CreateJobRequest, HealthResponse, ProcessAudioRequest, ProcessAudioResponse,
    ServiceHealth,
};
use crate::job::Job;

pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";
pub const DEFAULT_PROCESSING_BASE: &str = "http://localhost:8000";

/// Base addresses of the two HTTP surfaces the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Control-plane API that manages job records.
    pub api_base: String,
    /// Backend that performs the transcription work.
    pub processing_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            processing_base: DEFAULT_PROCESSING_BASE.to_string(),
        }
    }
}

/// Typed job operations on top of the raw transport. Implemented by
/// [`ApiClient`]; tests substitute their own backend.
#[allow(async_fn_in_trait)]
pub trait JobApi {
    async fn create_job(&self, req: &CreateJobRequest) -> Result<Job, ApiError>;

    async fn get_job(&self, id: &str) -> Result<Job, ApiError>;
}

/// Minimal JSON client: no retries, no caching, no timeout.
///
/// Every call is independent and only borrows `&self`, so one instance can
/// serve concurrent callers. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(Client::new(), config)
    }

    /// Use a preconfigured `reqwest::Client` (proxy, TLS roots, caller-imposed timeout).
    pub fn with_http_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET `api_base + path`, decoded as `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.config.api_base);
        self.send(self.client.request(Method::GET, &url)).await
    }

    /// POST `body` as JSON to `api_base + path`, decoded as `T`.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.config.api_base);
        self.send(self.client.request(Method::POST, &url).json(body)).await
    }

    /// Calls the processing service: POST with a JSON body when `body` is
    /// given, GET otherwise.
    pub async fn call_processing_service<T, B>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.config.processing_base);
        let request = match body {
            Some(body) => self.client.request(Method::POST, &url).json(body),
            None => self
                .client
                .request(Method::GET, &url)
                .header("content-type", "application/json"),
        };
        self.send(request).await
    }

    /// Control-plane health surface.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get("/health").await
    }

    /// Detailed health of the processing service.
    pub async fn service_health(&self) -> Result<ServiceHealth, ApiError> {
        self.call_processing_service::<_, ()>("/health", None).await
    }

    /// Hands a source straight to the processing service.
    pub async fn process_audio(
        &self,
        req: &ProcessAudioRequest,
    ) -> Result<ProcessAudioResponse, ApiError> {
        self.call_processing_service("/process-audio", Some(req)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = request.build()?;
        log::debug!("{} {}", request.method(), request.url());

        let response = self.client.execute(request).await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Transport {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.json::<T>().await?;
        Ok(body)
    }
}

impl JobApi for ApiClient {
    async fn create_job(&self, req: &CreateJobRequest) -> Result<Job, ApiError> {
        self.post::<ApiResponse<Job>, _>("/jobs", req)
            .await?
            .into_result()
    }

    async fn get_job(&self, id: &str) -> Result<Job, ApiError> {
        self.get::<ApiResponse<Job>>(&format!("/jobs/{id}"))
            .await?
            .into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::JobOptions;
    use crate::job::JobStatus;
    use serde_json::{Value, json};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(ClientConfig {
            api_base: format!("{}/api", server.uri()),
            processing_base: server.uri(),
        })
    }

    fn job_json(status: &str) -> Value {
        json!({
            "id": "job-1",
            "youtubeUrl": "https://youtu.be/abc",
            "status": status,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:01Z"
        })
    }

    #[test]
    fn default_config_points_at_local_services() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, "http://localhost:3000/api");
        assert_eq!(config.processing_base, "http://localhost:8000");
    }

    #[tokio::test]
    async fn get_decodes_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/thing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"a": 1})))
            .mount(&server)
            .await;

        let value: Value = client_for(&server).get("/thing").await.unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[tokio::test]
    async fn get_fails_with_transport_error_on_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server).get::<Value>("/thing").await.unwrap_err();
        match err {
            ApiError::Transport {
                status,
                status_text,
            } => {
                assert_eq!(status, 500);
                assert_eq!(status_text, "Internal Server Error");
            }
            other => panic!("expected Transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/echo"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"x": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"a": 1})))
            .mount(&server)
            .await;

        let value: Value = client_for(&server)
            .post("/echo", &json!({"x": 1}))
            .await
            .unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[tokio::test]
    async fn post_fails_with_transport_error_on_500() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .post::<Value, _>("/echo", &json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(matches!(err, ApiError::Transport { .. }));
    }

    #[tokio::test]
    async fn processing_service_without_body_is_a_read() {
        let server = MockServer::start().await;
        Mock::given(path("/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"a": 1})))
            .mount(&server)
            .await;

        let value: Value = client_for(&server)
            .call_processing_service::<_, ()>("/status", None)
            .await
            .unwrap();
        assert_eq!(value, json!({"a": 1}));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method.as_str(), "GET");
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn processing_service_with_body_is_a_write() {
        let server = MockServer::start().await;
        Mock::given(path("/process-audio"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"a": 1})))
            .mount(&server)
            .await;

        let value: Value = client_for(&server)
            .call_processing_service("/process-audio", Some(&json!({"x": 1})))
            .await
            .unwrap();
        assert_eq!(value, json!({"a": 1}));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].method.as_str(), "POST");
        let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(sent, json!({"x": 1}));
    }

    #[tokio::test]
    async fn processing_service_fails_with_transport_error_on_500() {
        let server = MockServer::start().await;
        Mock::given(path("/process-audio"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .call_processing_service::<Value, _>("/process-audio", Some(&json!({"x": 1})))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn client_errors_are_not_distinguished_from_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).get::<Value>("/missing").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { status: 404, .. }));
        // No retry.
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn malformed_json_is_a_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).get::<Value>("/thing").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn connection_refused_is_a_network_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let uri = format!("http://127.0.0.1:{port}");

        let client = ApiClient::new(ClientConfig {
            api_base: uri.clone(),
            processing_base: uri,
        });
        let err = client.get::<Value>("/thing").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn create_job_posts_request_and_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/jobs"))
            .and(body_json(json!({
                "youtubeUrl": "https://youtu.be/abc",
                "options": {"outputFormat": "midi"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": job_json("pending"),
                "timestamp": "2024-05-01T10:00:01Z"
            })))
            .mount(&server)
            .await;

        let req = CreateJobRequest::new(
            "https://youtu.be/abc",
            JobOptions {
                output_format: Some(crate::api::OutputFormat::Midi),
                ..Default::default()
            },
        );
        let job = client_for(&server).create_job(&req).await.unwrap();
        assert_eq!(job.id(), "job-1");
        assert_eq!(job.status(), JobStatus::Pending);
    }

    #[tokio::test]
    async fn get_job_surfaces_envelope_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/jobs/job-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": "Job not found",
                "timestamp": "2024-05-01T10:00:01Z"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).get_job("job-9").await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(msg) if msg == "Job not found"));
    }

    #[tokio::test]
    async fn get_job_rejects_inconsistent_payload_as_network_error() {
        let server = MockServer::start().await;
        let mut job = job_json("completed");
        job["error"] = json!("should not be here");
        Mock::given(method("GET"))
            .and(path("/api/jobs/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": job,
                "timestamp": "t"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).get_job("job-1").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn health_not_implemented_write_maps_to_501() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/health"))
            .respond_with(
                ResponseTemplate::new(501)
                    .set_body_json(json!({"error": "Method not implemented yet"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "service": "SolfaMe Web API",
                "version": "1.0.0",
                "timestamp": "2024-05-01T10:00:00Z"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let health = client.health().await.unwrap();
        assert_eq!(health.status, "ok");

        let err = client.post::<Value, _>("/health", &json!({})).await.unwrap_err();
        assert_eq!(err.status(), Some(501));
    }

    #[tokio::test]
    async fn process_audio_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-audio"))
            .and(body_json(json!({"youtube_url": "youtu.be/abc", "options": {}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Audio processing not implemented yet",
                "youtube_url": "youtu.be/abc",
                "status": "pending"
            })))
            .mount(&server)
            .await;

        let resp = client_for(&server)
            .process_audio(&ProcessAudioRequest {
                youtube_url: "youtu.be/abc".into(),
                options: Default::default(),
            })
            .await
            .unwrap();
        assert_eq!(resp.status, "pending");
    }
}
