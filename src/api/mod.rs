//! REST API Gateway
//!
//! Stateless bindings to the backend endpoints, organized by domain.
//! Every call goes through `ApiClient`, which attaches the bearer token and
//! turns non-success responses into `ApiError`.

mod auth;
mod profile;
mod todo;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config;
use crate::error::{decode_error, ApiError, ApiResult};

// Re-export all public items
pub use auth::*;
pub use profile::*;
pub use todo::*;

/// HTTP methods used with a request body
#[derive(Debug, Clone, Copy, PartialEq)]
enum Verb {
    Post,
    Put,
    Delete,
}

impl Verb {
    fn builder(self, url: &str) -> RequestBuilder {
        match self {
            Verb::Post => Request::post(url),
            Verb::Put => Request::put(url),
            Verb::Delete => Request::delete(url),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

/// Connection settings for one request batch; cheap to clone per call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: &'static str,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            base_url: config::api_base_url(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// GET with query parameters, decoding a JSON body
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&'static str, String)]) -> ApiResult<T> {
        tracing::debug!("GET {} {:?}", path, query);
        let builder = Request::get(&self.url(path)).query(query.iter().map(|(k, v)| (*k, v.as_str())));
        let response = self.authorize(builder).send().await.map_err(network_error)?;
        decode_json(path, response).await
    }

    /// JSON body in, JSON body out
    async fn send<B, T>(&self, verb: Verb, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self.dispatch(verb, path, Some(body)).await?;
        decode_json(path, response).await
    }

    /// Request whose response body is ignored
    async fn send_unit<B: Serialize>(&self, verb: Verb, path: &str, body: Option<&B>) -> ApiResult<()> {
        self.dispatch(verb, path, body).await.map(|_| ())
    }

    async fn dispatch<B: Serialize>(&self, verb: Verb, path: &str, body: Option<&B>) -> ApiResult<Response> {
        tracing::debug!("{} {}", verb.as_str(), path);
        let builder = self.authorize(verb.builder(&self.url(path)));
        let sent = match body {
            Some(body) => {
                let request = builder.json(body).map_err(|e| ApiError::Decode(e.to_string()))?;
                request.send().await
            }
            None => builder.send().await,
        };
        check_status(path, sent.map_err(network_error)?).await
    }
}

fn network_error(err: gloo_net::Error) -> ApiError {
    tracing::warn!("network failure: {}", err);
    ApiError::Network(err.to_string())
}

async fn check_status(path: &str, response: Response) -> ApiResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = decode_error(status, path, &body);
    tracing::warn!("{} failed with {}: {}", path, status, err);
    Err(err)
}

async fn decode_json<T: DeserializeOwned>(path: &str, response: Response) -> ApiResult<T> {
    let response = check_status(path, response).await?;
    response.json::<T>().await.map_err(|e| {
        tracing::error!("could not decode {} response: {}", path, e);
        ApiError::Decode(e.to_string())
    })
}
