use client_logging::client_debug;
use url::Url;

use crate::types::{map_reqwest_error, ClientError, ClientSettings, FailureKind};
use crate::wire::{AskRequest, AskResponse};

/// The answering service the conversation talks to.
#[async_trait::async_trait]
pub trait AnswerService: Send + Sync {
    async fn ask(&self, question: &str) -> Result<String, ClientError>;
}

/// Reqwest-backed [`AnswerService`] speaking the canonical ask contract.
///
/// `session_id` and `user_id` are ephemeral tokens minted per instance and
/// sent with every question.
#[derive(Debug, Clone)]
pub struct HttpAnswerService {
    client: reqwest::Client,
    endpoint: Url,
    session_id: String,
    user_id: String,
}

impl HttpAnswerService {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let endpoint = base
            .join("agno_ask")
            .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            session_id: uuid::Uuid::new_v4().to_string(),
            user_id: uuid::Uuid::new_v4().to_string(),
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

#[async_trait::async_trait]
impl AnswerService for HttpAnswerService {
    async fn ask(&self, question: &str) -> Result<String, ClientError> {
        let request = AskRequest {
            question: question.to_string(),
            session_id: self.session_id.clone(),
            user_id: self.user_id.clone(),
        };
        client_debug!(
            "ask session={} question_len={}",
            self.session_id,
            question.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body: AskResponse = response
            .json()
            .await
            .map_err(|err| ClientError::new(FailureKind::MalformedResponse, err.to_string()))?;
        Ok(body.answer)
    }
}
