use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::client::EvalService;
use crate::core::ClientError;
use crate::data::{Example, Feedback, Run};

pub const API_URL_VAR: &str = "METAEVAL_API_URL";
pub const API_KEY_VAR: &str = "METAEVAL_API_KEY";

/// HTTP client for the remote eval service.
///
/// Credentials come from the environment ([`API_URL_VAR`], [`API_KEY_VAR`]);
/// the key is sent as an `x-api-key` header on every request.
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = std::env::var(API_URL_VAR).map_err(|_| ClientError::MissingEnv {
            name: API_URL_VAR.to_string(),
        })?;
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| ClientError::MissingEnv {
            name: API_KEY_VAR.to_string(),
        })?;
        Ok(Self::new(base_url, api_key.into()))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Network {
                endpoint: endpoint.to_string(),
                source,
            })?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|source| ClientError::Decode { source })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let endpoint = self.endpoint(path);
        let response = self
            .http
            .get(&endpoint)
            .header("x-api-key", self.api_key.expose_secret())
            .query(query)
            .send()
            .await
            .map_err(|source| ClientError::Network {
                endpoint: endpoint.clone(),
                source,
            })?;
        Self::decode(&endpoint, response).await
    }

    async fn send_json<B: Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ClientError> {
        let endpoint = self.endpoint(path);
        let response = self
            .http
            .request(method, &endpoint)
            .header("x-api-key", self.api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Network {
                endpoint: endpoint.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[derive(Serialize)]
struct FeedbackQuery<'a> {
    run_ids: &'a [Uuid],
}

#[async_trait]
impl EvalService for RemoteClient {
    async fn list_examples(&self, dataset_name: &str) -> Result<Vec<Example>, ClientError> {
        match self.get("/examples", &[("dataset", dataset_name)]).await {
            Err(ClientError::Status { status: 404, .. }) => Err(ClientError::DatasetNotFound {
                name: dataset_name.to_string(),
            }),
            other => other,
        }
    }

    async fn create_run(&self, run: &Run) -> Result<(), ClientError> {
        self.send_json(reqwest::Method::POST, "/runs", run).await?;
        Ok(())
    }

    async fn update_run(&self, run: &Run) -> Result<(), ClientError> {
        let path = format!("/runs/{}", run.id);
        self.send_json(reqwest::Method::PATCH, &path, run).await?;
        Ok(())
    }

    async fn list_runs(&self, project_name: &str) -> Result<Vec<Run>, ClientError> {
        self.get("/runs", &[("session", project_name)]).await
    }

    async fn create_feedback(&self, feedback: &Feedback) -> Result<(), ClientError> {
        self.send_json(reqwest::Method::POST, "/feedback", feedback)
            .await?;
        Ok(())
    }

    async fn list_feedback(&self, run_ids: &[Uuid]) -> Result<Vec<Feedback>, ClientError> {
        // Run-id lists can outgrow a query string, so this is a POST query.
        let endpoint = self.endpoint("/feedback/query");
        let response = self
            .send_json(
                reqwest::Method::POST,
                "/feedback/query",
                &FeedbackQuery { run_ids },
            )
            .await?;
        Self::decode(&endpoint, response).await
    }
}
