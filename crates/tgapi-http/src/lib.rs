//! reqwest adapter for the `tgapi-core` transport port.
//!
//! Direct or forward-proxy connections, one client-wide deadline, and the
//! transport-level failure classes (invalid token, timeout).

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    StatusCode,
};
use tokio_util::sync::CancellationToken;

use tgapi_core::{
    config::Config,
    errors::{Error, RequestError},
    transport::{HttpRequest, HttpResponse, Method, Transport},
    Bot, Result, WebApiClient,
};

const APPLICATION_JSON: &str = "application/json";

/// `Transport` over `reqwest`.
///
/// Idle connections are not pooled, so nothing opened for a call outlives it.
/// Deliberately not `Debug`: the base URL embeds the bot token.
#[derive(Clone)]
pub struct ReqwestTransport {
    base: reqwest::Url,
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(cfg: &Config) -> Result<Self> {
        cfg.validate()?;

        let mut builder = reqwest::Client::builder()
            .timeout(cfg.request_timeout)
            .pool_max_idle_per_host(0);

        if let Some(proxy) = &cfg.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("invalid proxy {proxy:?}: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let http = builder
            .build()
            .map_err(|e| Error::External(format!("http client build failed: {e}")))?;

        Ok(Self {
            base: cfg.base_address()?,
            http,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = self.base.join(&request.path_and_query)?;

        let mut builder = self
            .http
            .request(reqwest_method(request.method), url)
            .header(ACCEPT, APPLICATION_JSON);
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, APPLICATION_JSON).body(body);
        }

        let resp = builder.send().await.map_err(classify)?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            // Keep reqwest's status error as the cause.
            return Err(match resp.error_for_status() {
                Err(e) => RequestError::invalid_token(e).into(),
                Ok(_) => RequestError::invalid_token("401 Unauthorized").into(),
            });
        }

        let body = resp.text().await.map_err(classify)?;
        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Put => reqwest::Method::PUT,
        Method::Post => reqwest::Method::POST,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn classify(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        RequestError::timed_out(e).into()
    } else if e.status() == Some(StatusCode::UNAUTHORIZED) {
        RequestError::invalid_token(e).into()
    } else {
        RequestError::network(e).into()
    }
}

/// Build a [`Bot`] over a fresh [`ReqwestTransport`].
pub fn connect(cfg: &Config) -> Result<Bot> {
    connect_with_cancellation(cfg, CancellationToken::new())
}

/// Like [`connect`], with a caller-owned cancellation token shared by every call.
pub fn connect_with_cancellation(cfg: &Config, cancel: CancellationToken) -> Result<Bot> {
    let transport = Arc::new(ReqwestTransport::new(cfg)?);
    tracing::info!(
        api_url = %cfg.api_url,
        proxy = cfg.proxy.is_some(),
        timeout_ms = cfg.request_timeout.as_millis() as u64,
        "bot api client ready"
    );
    Ok(Bot::new(WebApiClient::with_cancellation(transport, cancel)))
}
