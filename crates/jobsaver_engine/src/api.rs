use std::time::Duration;

use base64::Engine;
use futures_util::StreamExt;
use jobsaver_core::{JobSubmission, SheetValidation};
use jobsaver_logging::{saver_debug, saver_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use url::Url;

use crate::{ApiError, ApiFailureKind};

/// Environment variable overriding [`ApiSettings::base_url`].
pub const API_URL_ENV: &str = "JOB_SAVER_API_URL";

const DEV_API_URL: &str = "http://localhost:3000/api";
const PROD_API_URL: &str = "https://job-saver-api.vercel.app/api";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        let base_url = if cfg!(debug_assertions) {
            DEV_API_URL
        } else {
            PROD_API_URL
        };
        Self {
            base_url: base_url.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_response_bytes: 1024 * 1024,
        }
    }
}

impl ApiSettings {
    /// Defaults, with the base URL taken from `JOB_SAVER_API_URL` when set.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                settings.base_url = url.trim().to_string();
            }
        }
        settings
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Successful API answer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiReply {
    pub message: Option<String>,
}

#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    /// `GET {api}/job?d=<base64 JSON>`. Used from page context, where
    /// body-bearing requests are not reliable.
    async fn save_job_via_query(&self, job: &JobSubmission) -> Result<ApiReply, ApiError>;

    /// `POST {api}/job` with a JSON body.
    async fn save_job(&self, job: &JobSubmission) -> Result<ApiReply, ApiError>;

    /// `POST {api}/validate` with `{url}`.
    async fn validate_sheet(&self, sheet_url: &str) -> Result<SheetValidation, ApiError>;
}

#[derive(Debug, Default, Deserialize)]
struct ResponseBody {
    message: Option<String>,
    error: Option<String>,
    #[serde(rename = "sheetId")]
    sheet_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    settings: ApiSettings,
}

impl ReqwestApiClient {
    pub fn new(settings: ApiSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, ApiError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailureKind::Network, err.to_string()))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.settings.base_url.trim_end_matches('/');
        Url::parse(&format!("{base}/{path}"))
            .map_err(|err| ApiError::new(ApiFailureKind::InvalidUrl, err.to_string()))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<ResponseBody, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_response_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_response_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }

        // Success is decided by status alone; a body without JSON just
        // carries no message.
        let body: ResponseBody = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(err) => {
                saver_debug!("API response body is not JSON ({} bytes): {}", bytes.len(), err);
                ResponseBody::default()
            }
        };

        if !status.is_success() {
            saver_warn!("API answered {}: {:?}", status, body.error);
            return Err(
                ApiError::new(ApiFailureKind::HttpStatus(status.as_u16()), status.to_string())
                    .with_server_message(body.error),
            );
        }
        Ok(body)
    }

    fn too_large(&self, actual: Option<u64>) -> ApiError {
        ApiError::new(
            ApiFailureKind::TooLarge {
                max_bytes: self.settings.max_response_bytes,
                actual,
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl ApiClient for ReqwestApiClient {
    async fn save_job_via_query(&self, job: &JobSubmission) -> Result<ApiReply, ApiError> {
        let json = serde_json::to_string(job)
            .map_err(|err| ApiError::new(ApiFailureKind::Decode, err.to_string()))?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(json);

        let mut url = self.endpoint("job")?;
        url.query_pairs_mut().append_pair("d", &encoded);

        let request = self
            .build_client()?
            .get(url)
            .header(ACCEPT, "application/json, *.*")
            .header(CONTENT_TYPE, "application/json; charset=utf-8");
        let body = self.send(request).await?;
        Ok(ApiReply {
            message: body.message,
        })
    }

    async fn save_job(&self, job: &JobSubmission) -> Result<ApiReply, ApiError> {
        let json = serde_json::to_string(job)
            .map_err(|err| ApiError::new(ApiFailureKind::Decode, err.to_string()))?;
        let request = self
            .build_client()?
            .post(self.endpoint("job")?)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(json);
        let body = self.send(request).await?;
        Ok(ApiReply {
            message: body.message,
        })
    }

    async fn validate_sheet(&self, sheet_url: &str) -> Result<SheetValidation, ApiError> {
        let json = serde_json::json!({ "url": sheet_url }).to_string();
        let request = self
            .build_client()?
            .post(self.endpoint("validate")?)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(json);
        let body = self.send(request).await?;

        match (body.sheet_id, body.error) {
            (Some(sheet_id), None) => Ok(SheetValidation {
                sheet_id,
                message: body.message.unwrap_or_default(),
            }),
            (_, Some(error)) => Err(ApiError::new(ApiFailureKind::Rejected, "validation rejected")
                .with_server_message(Some(error))),
            (None, None) => Err(ApiError::new(
                ApiFailureKind::Decode,
                "validation response has no sheetId",
            )),
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailureKind::Timeout, err.to_string());
    }
    ApiError::new(ApiFailureKind::Network, err.to_string())
}
