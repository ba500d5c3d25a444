//! Async HTTP client for the remote record collection.
//!
//! | Method   | Path                  | Used by   |
//! |----------|-----------------------|-----------|
//! | `GET`    | `/{collection}`       | List      |
//! | `POST`   | `/{collection}`       | Create    |
//! | `GET`    | `/{collection}/{id}`  | Read-one  |
//! | `PUT`    | `/{collection}/{id}`  | Update    |
//! | `DELETE` | `/{collection}/{id}`  | Delete    |
//!
//! Any transport error, non-2xx status, or undecodable body is an error; a
//! `404` on an item path is reported as absence.

use std::time::Duration;

use eventdesk_core::{
  record::{EventFields, Record, RecordId},
  store::RecordStore,
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Connection settings for the remote store.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url:   String,
  pub collection: String,
  pub timeout:    Duration,
}

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),

  #[error("invalid base URL {url:?}: {reason}")]
  BaseUrl { url: String, reason: String },

  #[error("{method} {path} failed: {source}")]
  Transport {
    method: Method,
    path:   String,
    source: reqwest::Error,
  },

  #[error("{method} {path} → {status}")]
  Status {
    method: Method,
    path:   String,
    status: StatusCode,
  },

  #[error("decoding response from {path}: {source}")]
  Decode {
    path:   String,
    source: reqwest::Error,
  },
}

impl ClientError {
  fn is_not_found(&self) -> bool {
    matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND)
  }
}

/// Async HTTP client implementing [`RecordStore`].
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
  base:   Url,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
    let base = Url::parse(&config.base_url).map_err(|e| ClientError::BaseUrl {
      url:    config.base_url.clone(),
      reason: e.to_string(),
    })?;
    if base.cannot_be_a_base() {
      return Err(ClientError::BaseUrl {
        url:    config.base_url.clone(),
        reason: "not a hierarchical URL".into(),
      });
    }
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(ClientError::Build)?;
    Ok(Self {
      client,
      config,
      base,
    })
  }

  pub fn config(&self) -> &ApiConfig { &self.config }

  /// The base URL with the collection path and then `id`, if given, appended
  /// as percent-encoded path segments. An id is always exactly one segment,
  /// whatever characters it contains.
  fn url(&self, id: Option<&RecordId>) -> Url {
    let mut url = self.base.clone();
    // `new` rejects cannot-be-a-base URLs, so segments are always available.
    if let Ok(mut segments) = url.path_segments_mut() {
      segments.pop_if_empty();
      segments.extend(self.config.collection.split('/').filter(|s| !s.is_empty()));
      if let Some(id) = id {
        segments.push(&id.to_string());
      }
    }
    url
  }

  fn request(&self, method: Method, url: &Url) -> RequestBuilder {
    self.client.request(method, url.clone())
  }

  /// Send `req` and fail on anything but a 2xx status.
  async fn send(
    &self,
    method: Method,
    path: &str,
    req: RequestBuilder,
  ) -> Result<Response, ClientError> {
    debug!(%method, path, "sending request");
    let resp = req.send().await.map_err(|source| ClientError::Transport {
      method: method.clone(),
      path: path.to_owned(),
      source,
    })?;

    let status = resp.status();
    if !status.is_success() {
      return Err(ClientError::Status {
        method,
        path: path.to_owned(),
        status,
      });
    }
    Ok(resp)
  }

  async fn decode<T: DeserializeOwned>(path: &str, resp: Response) -> Result<T, ClientError> {
    resp.json().await.map_err(|source| ClientError::Decode {
      path: path.to_owned(),
      source,
    })
  }
}

/// Turn a `404` into `Ok(None)`.
fn absent_on_404<T>(result: Result<T, ClientError>) -> Result<Option<T>, ClientError> {
  match result {
    Ok(v) => Ok(Some(v)),
    Err(e) if e.is_not_found() => Ok(None),
    Err(e) => Err(e),
  }
}

impl RecordStore for ApiClient {
  type Error = ClientError;

  /// `GET /{collection}`
  async fn list(&self) -> Result<Vec<Record>, ClientError> {
    let url = self.url(None);
    let resp = self
      .send(Method::GET, url.path(), self.request(Method::GET, &url))
      .await?;
    Self::decode(url.path(), resp).await
  }

  /// `POST /{collection}` with the five editable fields.
  async fn create(&self, fields: &EventFields) -> Result<Record, ClientError> {
    let url = self.url(None);
    let req = self.request(Method::POST, &url).json(fields);
    let resp = self.send(Method::POST, url.path(), req).await?;
    Self::decode(url.path(), resp).await
  }

  /// `GET /{collection}/{id}`
  async fn get(&self, id: &RecordId) -> Result<Option<Record>, ClientError> {
    let url = self.url(Some(id));
    let result: Result<Record, ClientError> = async {
      let resp = self
        .send(Method::GET, url.path(), self.request(Method::GET, &url))
        .await?;
      Self::decode(url.path(), resp).await
    }
    .await;
    absent_on_404(result)
  }

  /// `PUT /{collection}/{id}` with the whole record.
  async fn update(&self, id: &RecordId, record: &Record) -> Result<Option<Record>, ClientError> {
    let url = self.url(Some(id));
    let result: Result<Record, ClientError> = async {
      let req = self.request(Method::PUT, &url).json(record);
      let resp = self.send(Method::PUT, url.path(), req).await?;
      Self::decode(url.path(), resp).await
    }
    .await;
    absent_on_404(result)
  }

  /// `DELETE /{collection}/{id}`. The response body is not inspected.
  async fn delete(&self, id: &RecordId) -> Result<bool, ClientError> {
    let url = self.url(Some(id));
    let result = self
      .send(Method::DELETE, url.path(), self.request(Method::DELETE, &url))
      .await;
    Ok(absent_on_404(result)?.is_some())
  }
}
