//! reqwest-based implementation of the [`ProgressApi`](crate::ProgressApi) trait.

use crate::{ClientError, Config, ProgressApi};
use async_trait::async_trait;
use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};

/// Client for the fittrack progress REST API.
#[derive(Clone, Debug)]
pub struct ReqwestProgressClient {
    base_url: String,
    user_id: String,
    api_token: SecretString,
    client: reqwest::Client,
}

impl ReqwestProgressClient {
    pub fn new(base_url: &str, user_id: impl Into<String>, api_token: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.into(),
            api_token,
            client,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.base_url,
            config.user_id.clone(),
            config.api_token.clone(),
        )
    }

    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(self.api_token.expose_secret())
    }

    fn post_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .bearer_auth(self.api_token.expose_secret())
    }

    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::error_from_response(resp).await);
        }
        Ok(resp.json::<T>().await?)
    }

    async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from_response(resp).await);
        }
        Ok(())
    }

    async fn error_from_response(resp: reqwest::Response) -> ClientError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();
        tracing::debug!(status, "progress api request failed");
        ClientError::from_status(status, body_snippet)
    }
}

#[async_trait]
impl ProgressApi for ReqwestProgressClient {
    async fn get_progress_records(
        &self,
        oldest: NaiveDate,
        newest: NaiveDate,
    ) -> Result<serde_json::Value, ClientError> {
        let url = format!("{}/api/v1/progress/{}/records", self.base_url, self.user_id);
        let request = self
            .get_request(&url)
            .query(&[("oldest", oldest.to_string()), ("newest", newest.to_string())]);
        self.execute_json(request).await
    }

    async fn get_workout_days(&self, year: i32, month: u32) -> Result<Vec<String>, ClientError> {
        #[derive(serde::Deserialize)]
        struct WorkoutDaysPayload {
            #[serde(default)]
            workout_days: Vec<String>,
        }

        let url = format!("{}/api/v1/workout/{}", self.base_url, self.user_id);
        let request = self
            .get_request(&url)
            .query(&[("year", year.to_string()), ("month", month.to_string())]);
        let payload: WorkoutDaysPayload = self.execute_json(request).await?;
        Ok(payload.workout_days)
    }

    async fn record_workout(
        &self,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> Result<(), ClientError> {
        let url = format!("{}/api/v1/workout", self.base_url);
        let body = serde_json::json!({
            "user_id": self.user_id,
            "date": date.to_string(),
            "notes": notes,
        });
        self.execute_empty(self.post_request(&url).json(&body)).await
    }
}
