use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{ApiError, StatusUpdate, UploadReceipt};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub upload_route: String,
    pub status_route: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            upload_route: "/api/upload".to_string(),
            status_route: "/api/status".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientSettings {
    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, self.upload_route)
    }

    pub fn status_url(&self, job_id: &str) -> String {
        format!("{}{}/{job_id}", self.base_url, self.status_route)
    }
}

#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    /// POSTs the file as a multipart body under the `file` field.
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadReceipt, ApiError>;

    /// Fetches current status for one job.
    async fn fetch_status(&self, job_id: &str) -> Result<StatusUpdate, ApiError>;
}

/// Wire shape of the upload response; `job_id` is validated before the
/// public receipt is constructed.
#[derive(Debug, Deserialize)]
struct UploadReceiptWire {
    #[serde(default)]
    job_id: Option<String>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpApiClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl HttpApiClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl ApiClient for HttpApiClient {
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadReceipt, ApiError> {
        let part = Part::bytes(bytes).file_name(filename.to_owned());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.settings.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UploadHttp(status.as_u16()));
        }

        let wire: UploadReceiptWire = response
            .json()
            .await
            .map_err(|err| ApiError::InvalidBody(err.to_string()))?;
        match wire.job_id {
            Some(job_id) if !job_id.is_empty() => Ok(UploadReceipt {
                job_id,
                filename: wire.filename,
                status: wire.status,
            }),
            // The HTTP layer said success but the body is unusable.
            _ => Err(ApiError::MissingJobId),
        }
    }

    async fn fetch_status(&self, job_id: &str) -> Result<StatusUpdate, ApiError> {
        let response = self
            .client
            .get(self.settings.status_url(job_id))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::PollHttp(status.as_u16()));
        }

        response
            .json::<StatusUpdate>()
            .await
            .map_err(|err| ApiError::InvalidBody(err.to_string()))
    }
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(err.to_string())
    }
}
