//! Remote per-user document store client.
//!
//! The summary document lives at `users/{user_id}`; per-word documents
//! live at `users/{user_id}/learnedWords/{english}` and are written and
//! deleted one at a time. The collection as a whole is never rewritten.

use async_trait::async_trait;
use tracing::instrument;

use kelime_core::model::ProgressRecord;
use kelime_core::store::{ProgressStore, StoreError, WordChange};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the per-user REST document store backing authenticated
/// sessions.
pub struct RemoteStore {
    base_url: String,
    api_token: String,
    user_id: String,
    client: reqwest::Client,
}

impl RemoteStore {
    pub fn new(base_url: &str, api_token: &str, user_id: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            user_id: user_id.to_string(),
            client,
        }
    }

    fn summary_url(&self) -> String {
        format!("{}/users/{}", self.base_url, self.user_id)
    }

    fn word_url(&self, english: &str) -> String {
        format!(
            "{}/users/{}/learnedWords/{}",
            self.base_url, self.user_id, english
        )
    }

    fn map_send_error(e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Timeout(DEFAULT_TIMEOUT_SECS)
        } else {
            StoreError::Network(e.to_string())
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Unauthorized(body));
        }
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api { status, message });
        }
        Ok(response)
    }

    async fn put_summary(&self, record: &ProgressRecord) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.summary_url())
            .bearer_auth(&self.api_token)
            .json(record)
            .send()
            .await
            .map_err(Self::map_send_error)?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for RemoteStore {
    fn name(&self) -> &str {
        "remote"
    }

    #[instrument(skip(self), fields(user = %self.user_id))]
    async fn hydrate(&self) -> Result<ProgressRecord, StoreError> {
        let response = self
            .client
            .get(self.summary_url())
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        if response.status().as_u16() == 404 {
            // First session for this user: create the default document.
            let record = ProgressRecord::default();
            self.put_summary(&record).await?;
            return Ok(record);
        }

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    #[instrument(skip(self, record, change), fields(user = %self.user_id))]
    async fn persist(
        &self,
        record: &ProgressRecord,
        change: Option<&WordChange>,
    ) -> Result<(), StoreError> {
        self.put_summary(record).await?;

        match change {
            Some(WordChange::Learned(doc)) => {
                let response = self
                    .client
                    .put(self.word_url(&doc.word))
                    .bearer_auth(&self.api_token)
                    .json(doc)
                    .send()
                    .await
                    .map_err(Self::map_send_error)?;
                Self::check_status(response).await?;
            }
            Some(WordChange::Unlearned { english }) => {
                let response = self
                    .client
                    .delete(self.word_url(english))
                    .bearer_auth(&self.api_token)
                    .send()
                    .await
                    .map_err(Self::map_send_error)?;
                // Deleting an absent document is not a failure.
                if response.status().as_u16() != 404 {
                    Self::check_status(response).await?;
                }
            }
            None => {}
        }

        Ok(())
    }
}
