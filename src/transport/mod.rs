//! REST data source: the response envelope and the reqwest-backed fetcher.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ConsoleConfig;
use crate::errors::FetchError;
use crate::models::pagination::Page;
use crate::models::query::PageRequest;

/// Asynchronous supplier of one page of records for a list view.
///
/// Implemented by [`HttpSource`] for the real backend and by in-memory fakes
/// in tests. The returned future must be `Send` so the controller can run it
/// as a spawned task.
pub trait ListSource<T>: Send + Sync {
    fn fetch_page(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<Page<T>, FetchError>> + Send;
}

/// JSON envelope wrapping every list response.
///
/// The backend reports its own status in `code`; only `200` is success,
/// regardless of the HTTP status line.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: u16,
    #[serde(default)]
    message: String,
    data: Option<Page<T>>,
}

/// Decode an envelope body, enforcing the `code == 200` success contract.
pub(crate) fn decode_page<T: DeserializeOwned>(body: &str) -> Result<Page<T>, FetchError> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    if envelope.code != 200 {
        return Err(FetchError::Api {
            code: envelope.code,
            message: envelope.message,
        });
    }
    envelope.data.ok_or(FetchError::Api {
        code: 200,
        message: "success envelope carried no data".to_string(),
    })
}

fn transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(err)
    }
}

/// [`ListSource`] over one REST list endpoint.
///
/// Issues `GET {base_url}/{path}?page=..&limit=..&<filters>` and decodes the
/// standard envelope. One source per endpoint; clone freely, the underlying
/// client is shared.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    endpoint: String,
}

impl HttpSource {
    /// Build a source for `path` under the configured API base URL, with the
    /// configured request timeout applied at the client level.
    pub fn new(config: &ConsoleConfig, path: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()?;
        Self::with_client(client, &config.api_base_url, path)
    }

    /// Build a source with a caller-supplied client.
    pub fn with_client(client: Client, base_url: &str, path: &str) -> Result<Self, FetchError> {
        let endpoint = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        if reqwest::Url::parse(&endpoint).is_err() {
            return Err(FetchError::InvalidBaseUrl(endpoint));
        }
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl<T: DeserializeOwned> ListSource<T> for HttpSource {
    fn fetch_page(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<Page<T>, FetchError>> + Send {
        async move {
            let response = self
                .client
                .get(&self.endpoint)
                .query(&request.query_pairs())
                .send()
                .await
                .map_err(transport_error)?;

            let status = response.status();
            let body = response.text().await.map_err(transport_error)?;

            if !status.is_success() {
                // Prefer the envelope's own error if the body carries one.
                return match decode_page::<T>(&body) {
                    Err(err @ FetchError::Api { .. }) => Err(err),
                    _ => Err(FetchError::Api {
                        code: status.as_u16(),
                        message: format!("http status {status}"),
                    }),
                };
            }

            decode_page(&body)
        }
    }
}
