//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making JSON and
//! multipart HTTP requests against them.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use anyhow::Result;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use social_api::{create_app, create_app_state};
use social_common::AppConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{AuthResponse, ErrorResponse, RegisterRequest};

/// API prefix every non-health route lives under
pub const API: &str = "/api/v1";

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let port = get_test_port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        // Create app state
        let state = create_app_state(config).await?;

        // Build application
        let app = create_app(state);

        // Bind to port
        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Create HTTP client
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {}", token))
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::bearer(self.client.get(self.url(path)), token).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::bearer(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a bodiless POST request with auth token
    pub async fn post_empty_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::bearer(self.client.post(self.url(path)), token).send().await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::bearer(self.client.patch(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with auth token
    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(Self::bearer(self.client.put(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(Self::bearer(self.client.delete(self.url(path)), token).send().await?)
    }

    /// Make a multipart POST request with auth token
    pub async fn post_form_auth(&self, path: &str, token: &str, form: Form) -> Result<Response> {
        Ok(Self::bearer(self.client.post(self.url(path)), token)
            .multipart(form)
            .send()
            .await?)
    }

    /// Make a multipart PUT request with auth token
    pub async fn put_form_auth(&self, path: &str, token: &str, form: Form) -> Result<Response> {
        Ok(Self::bearer(self.client.put(self.url(path)), token)
            .multipart(form)
            .send()
            .await?)
    }

    /// Make a multipart PATCH request with auth token
    pub async fn patch_form_auth(&self, path: &str, token: &str, form: Form) -> Result<Response> {
        Ok(Self::bearer(self.client.patch(self.url(path)), token)
            .multipart(form)
            .send()
            .await?)
    }

    /// Register a fresh user and return the request with its tokens
    pub async fn register(&self) -> Result<(RegisterRequest, AuthResponse)> {
        let request = RegisterRequest::unique();
        let response = self.post(&format!("{API}/auth/register"), &request).await?;
        let auth = assert_json(response, StatusCode::CREATED).await?;
        Ok((request, auth))
    }
}

/// Multipart form with a `content` field and files under `field`
pub fn content_form(content: &str, field: &str, files: &[(&str, &str)]) -> Form {
    files.iter().fold(
        Form::new().text("content", content.to_string()),
        |form, (name, data)| {
            form.part(
                field.to_string(),
                Part::bytes(data.as_bytes().to_vec()).file_name((*name).to_string()),
            )
        },
    )
}

/// Create a test configuration
///
/// Uploads go to a per-process temporary directory and rate limits are
/// raised so parallel tests do not trip them.
pub fn test_config() -> Result<AppConfig> {
    // Load from environment or use defaults
    dotenvy::dotenv().ok();

    let mut config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    config.database.run_migrations = true;
    config.rate_limit.requests_per_second = 1000;
    config.rate_limit.burst = 1000;
    config.storage.upload_dir = std::env::temp_dir()
        .join(format!("social-uploads-{}", std::process::id()))
        .to_string_lossy()
        .into_owned();

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Assert an error status and return the error code from the body
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: ErrorResponse = assert_json(response, expected_status).await?;
    Ok(body.error.code)
}
