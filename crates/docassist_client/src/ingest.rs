use std::path::Path;

use client_logging::client_debug;
use reqwest::multipart;
use url::Url;

use crate::types::{map_reqwest_error, ClientError, ClientSettings, FailureKind};
use crate::wire::{IngestResponse, UrlIngestRequest};

/// Document-ingestion endpoints feeding the knowledge base.
///
/// Both operations resolve to the server's status text on success; a
/// `success: false` reply surfaces as `FailureKind::Rejected` with the
/// server-provided message.
#[async_trait::async_trait]
pub trait IngestService: Send + Sync {
    async fn upload_file(&self, path: &Path) -> Result<String, ClientError>;
    async fn upload_url(&self, url: &str) -> Result<String, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpIngestService {
    client: reqwest::Client,
    file_endpoint: Url,
    url_endpoint: Url,
}

impl HttpIngestService {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let join = |segment: &str| {
            base.join(segment)
                .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))
        };
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            file_endpoint: join("upload")?,
            url_endpoint: join("upload_url")?,
        })
    }

    async fn read_response(response: reqwest::Response) -> Result<String, ClientError> {
        let status = response.status();
        let body: Result<IngestResponse, _> = response.json().await;
        match body {
            Ok(IngestResponse { success: true, message }) => Ok(message),
            Ok(IngestResponse { success: false, message }) => {
                Err(ClientError::new(FailureKind::Rejected, message))
            }
            Err(_) if !status.is_success() => Err(ClientError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            )),
            Err(err) => Err(ClientError::new(
                FailureKind::MalformedResponse,
                err.to_string(),
            )),
        }
    }
}

#[async_trait::async_trait]
impl IngestService for HttpIngestService {
    async fn upload_file(&self, path: &Path) -> Result<String, ClientError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        client_debug!("upload_file name={file_name}");

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| ClientError::new(FailureKind::FileUnreadable, err.to_string()))?;
        let part = multipart::Part::bytes(bytes).file_name(file_name);
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.file_endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read_response(response).await
    }

    async fn upload_url(&self, url: &str) -> Result<String, ClientError> {
        client_debug!("upload_url url={url}");
        let response = self
            .client
            .post(self.url_endpoint.clone())
            .json(&UrlIngestRequest {
                url: url.to_string(),
            })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read_response(response).await
    }
}
