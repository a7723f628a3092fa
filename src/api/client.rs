use crate::api::query::ReportQuery;
use crate::api::response::{ResultTable, extract_records};
use crate::error::{ApiError, AppError, ResponseError, TransportError};
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://apiv2.ahrefs.com/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("ahr-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct AhrefsClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl AhrefsClient {
    /// Client against the production endpoint. The token comes in
    /// explicitly; the client never reads the environment.
    pub fn new(token: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    /// Client against an alternative endpoint. Tests point this at a
    /// local mock server.
    pub fn with_base_url(
        base_url: &str,
        token: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url).map_err(|e| TransportError::Init {
            message: format!("Invalid base URL: {}", e),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Init {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(AhrefsClient {
            client,
            base_url,
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full request URL for a query. Pure assembly; used by dry runs and
    /// tests as well as by `download`.
    pub fn build_url(&self, query: &ReportQuery) -> Url {
        query.to_url(&self.base_url, &self.token)
    }

    /// One GET round trip. Transport failures and non-2xx statuses come
    /// back as `TransportError` with the body left unparsed; a 2xx body is
    /// parsed and checked for the API's own error indicator, which wins
    /// even on HTTP 200.
    pub async fn download(&self, query: &ReportQuery) -> Result<Value, AppError> {
        let url = self.build_url(query);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    timeout_secs: DEFAULT_TIMEOUT_SECS,
                }
            } else {
                TransportError::Network {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TransportError::Http {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let tree: Value = response.json().await.map_err(|e| ResponseError::Parse {
            message: e.to_string(),
        })?;

        if let Some(api_error) = api_error_from_body(&tree) {
            return Err(api_error.into());
        }

        Ok(tree)
    }

    /// Downloads one report and flattens its records.
    pub async fn fetch(&self, query: &ReportQuery) -> Result<ResultTable, AppError> {
        let tree = self.download(query).await?;
        let records = extract_records(&tree, query.report())?;
        Ok(ResultTable::from_records(&records))
    }
}

/// The API reports its own failures inside a successful response as an
/// `error` message with an optional numeric `code`.
fn api_error_from_body(tree: &Value) -> Option<ApiError> {
    let message = match tree.get("error")? {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    let code = tree.get("code").and_then(Value::as_i64);
    Some(ApiError { code, message })
}
