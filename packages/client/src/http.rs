//! `reqwest` implementation of [`GorodApi`].

use gorod_aggregation::{BoundaryFeature, DEFAULT_NAME_PROPERTY, parse_boundaries_str};
use gorod_api_models::{ApiResponse, CategoryCounts, LoginRequest, PeriodCounts, Statement};
use gorod_district_models::DistrictCounts;
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError, GorodApi};

/// HTTP client for the backend. Keeps cookies between requests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { config, client })
    }

    /// Settings the client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.config.api_url(path);
        log::debug!("GET {url}");
        let resp = self.client.get(&url).send().await?;
        decode(resp).await
    }
}

/// Reads the body and decodes it as `T`, or turns a non-success status
/// into [`ClientError::Status`] using the error envelope when present.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(status_error(status, body));
    }

    Ok(serde_json::from_str(&body)?)
}

fn status_error(status: reqwest::StatusCode, body: String) -> ClientError {
    let message = serde_json::from_str::<ApiResponse>(&body)
        .ok()
        .and_then(|r| r.error)
        .unwrap_or(body);
    ClientError::Status {
        status: status.as_u16(),
        message,
    }
}

#[async_trait::async_trait]
impl GorodApi for ApiClient {
    async fn district_counts(&self) -> Result<DistrictCounts, ClientError> {
        self.get_json("/analitic/district").await
    }

    async fn period_counts(&self) -> Result<PeriodCounts, ClientError> {
        self.get_json("/analitic/period").await
    }

    async fn category_counts(&self, district_id: u8) -> Result<CategoryCounts, ClientError> {
        self.get_json(&format!("/analitic/categories/{district_id}"))
            .await
    }

    async fn boundaries(&self) -> Result<Vec<BoundaryFeature>, ClientError> {
        let url = self.config.public_url(&self.config.boundaries_path);
        log::debug!("GET {url}");
        let text = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(parse_boundaries_str(&text, DEFAULT_NAME_PROPERTY)?)
    }

    async fn list_statements(&self) -> Result<Vec<Statement>, ClientError> {
        let url = self.config.api_url("/statement");
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            log::warn!("Statement list refused with {}", resp.status());
            return Err(ClientError::NotAuthenticated);
        }
        Ok(resp.json().await?)
    }

    async fn create_statement(&self, statement: &Statement) -> Result<Vec<Statement>, ClientError> {
        let url = self.config.api_url("/statement");
        let resp = self
            .client
            .post(&url)
            .json(&[statement])
            .send()
            .await?;
        decode(resp).await
    }

    async fn accept(&self, statement: &Statement) -> Result<Vec<Statement>, ClientError> {
        let url = self.config.api_url(&format!("/statement/{}", statement.id));
        let approved = statement.clone().approved();
        let resp = self
            .client
            .patch(&url)
            .json(&[approved])
            .send()
            .await?;
        decode(resp).await
    }

    async fn reject(&self, id: u64) -> Result<(), ClientError> {
        let url = self.config.api_url(&format!("/statement/{id}"));
        let resp = self.client.delete(&url).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(status_error(status, resp.text().await?))
    }

    async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let url = self.config.api_url("/auth/login");
        let resp = self
            .client
            .post(&url)
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ClientError::LoginRejected(
                "Несуществующий пользователь".to_string(),
            ));
        }

        let envelope: ApiResponse = resp.json().await?;
        if envelope.is_ok() {
            log::info!("Logged in as {username}");
            Ok(())
        } else {
            Err(ClientError::LoginRejected(
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_cleanly() {
        let config = ClientConfig {
            base_url: "http://localhost:8888/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(
            config.api_url("/analitic/district"),
            "http://localhost:8888/api/analitic/district"
        );
        assert_eq!(
            config.public_url(&config.boundaries_path),
            "http://localhost:8888/districts.geojson"
        );
    }

    #[test]
    fn client_builds_with_cookie_store() {
        let client = ApiClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.config().base_url, crate::DEFAULT_API_URL);
    }
}
