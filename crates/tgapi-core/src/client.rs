use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio_util::sync::CancellationToken;

use crate::{
    envelope::ApiResponse,
    errors::{Error, RequestError},
    query::{build_path_with_query, QueryParams},
    transport::{HttpRequest, HttpResponse, Method, Transport},
    Result,
};

/// Pass as `body` when a call has none.
pub const NO_BODY: Option<&()> = None;

/// Generic request/response plumbing over a [`Transport`].
///
/// Each call is one independent round trip; the client holds no per-call state,
/// so a single instance can be shared across tasks.
///
/// Error policy:
/// - typed calls (`get`, `post`) turn `ok: false` into [`Error::Api`];
/// - `*_envelope` calls hand back the envelope as-is and substitute
///   [`ApiResponse::no_response`] for a 2xx body that is not an envelope;
/// - a `result` that does not fit the requested type is [`Error::Json`];
/// - unit calls (`put`, `post_unit`, `delete`) only fail on an `ok: false`
///   envelope or a non-2xx status.
#[derive(Clone)]
pub struct WebApiClient {
    transport: Arc<dyn Transport>,
    cancel: CancellationToken,
}

impl WebApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_cancellation(transport, CancellationToken::new())
    }

    /// `cancel` is owned by the caller; cancelling it aborts in-flight calls with
    /// [`Error::Cancelled`].
    pub fn with_cancellation(transport: Arc<dyn Transport>, cancel: CancellationToken) -> Self {
        Self { transport, cancel }
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    // ============== GET ==============

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&QueryParams>,
    ) -> Result<T> {
        let (envelope, status) = self.round_trip(Method::Get, path, params, NO_BODY).await?;
        unwrap_result(envelope, status)
    }

    pub async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&QueryParams>,
    ) -> Result<ApiResponse<T>> {
        self.send_envelope(Method::Get, path, params, NO_BODY).await
    }

    // ============== PUT ==============

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        params: Option<&QueryParams>,
        body: Option<&B>,
    ) -> Result<()> {
        self.send_unit(Method::Put, path, params, body).await
    }

    // ============== POST ==============

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        params: Option<&QueryParams>,
        body: Option<&B>,
    ) -> Result<T> {
        let (envelope, status) = self.round_trip(Method::Post, path, params, body).await?;
        unwrap_result(envelope, status)
    }

    pub async fn post_envelope<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        params: Option<&QueryParams>,
        body: Option<&B>,
    ) -> Result<ApiResponse<T>> {
        self.send_envelope(Method::Post, path, params, body).await
    }

    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        params: Option<&QueryParams>,
        body: Option<&B>,
    ) -> Result<()> {
        self.send_unit(Method::Post, path, params, body).await
    }

    // ============== DELETE ==============

    pub async fn delete<B: Serialize + ?Sized>(
        &self,
        path: &str,
        params: Option<&QueryParams>,
        body: Option<&B>,
    ) -> Result<()> {
        self.send_unit(Method::Delete, path, params, body).await
    }

    // ============== Core ==============

    /// Send any request and return the decoded envelope without judging `ok`.
    pub async fn send_envelope<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        params: Option<&QueryParams>,
        body: Option<&B>,
    ) -> Result<ApiResponse<T>> {
        let (envelope, _) = self.round_trip(method, path, params, body).await?;
        Ok(envelope)
    }

    async fn round_trip<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        params: Option<&QueryParams>,
        body: Option<&B>,
    ) -> Result<(ApiResponse<T>, u16)> {
        let resp = self.execute(method, path, params, body).await?;
        let envelope = decode_envelope(&resp)?;
        Ok((envelope, resp.status))
    }

    async fn send_unit<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        params: Option<&QueryParams>,
        body: Option<&B>,
    ) -> Result<()> {
        let resp = self.execute(method, path, params, body).await?;
        match serde_json::from_str::<ApiResponse<serde_json::Value>>(&resp.body) {
            Ok(envelope) if !envelope.ok => Err(envelope.to_error(resp.status)),
            Ok(_) => Ok(()),
            Err(_) if resp.is_success() => Ok(()),
            Err(_) => Err(RequestError::status(resp.status, &resp.body).into()),
        }
    }

    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        params: Option<&QueryParams>,
        body: Option<&B>,
    ) -> Result<HttpResponse> {
        if path.trim().is_empty() {
            return Err(Error::InvalidRequest("path must not be empty".to_string()));
        }
        // Either would escape the `/bot<token>/` base once joined.
        if path.starts_with('/') || path.contains("://") {
            return Err(Error::InvalidRequest(format!(
                "path must be relative to the bot base address: {path:?}"
            )));
        }

        let body = body.map(serde_json::to_string).transpose()?;
        let request = HttpRequest {
            method,
            path_and_query: build_path_with_query(path, params),
            body,
        };

        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        tracing::debug!(%method, path, "sending request");

        let sent = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!(%method, path, "request cancelled by caller");
                return Err(Error::Cancelled);
            }
            r = self.transport.send(request) => r,
        };

        match sent {
            Ok(resp) => {
                tracing::debug!(%method, path, status = resp.status, "response received");
                Ok(resp)
            }
            // A deadline that fires while the caller is cancelling is the caller's doing.
            Err(e) if e.is_timeout() && self.cancel.is_cancelled() => Err(Error::Cancelled),
            Err(e) => {
                tracing::warn!(%method, path, error = %e, "request failed");
                Err(e)
            }
        }
    }
}

/// Only a body that is not an envelope at all becomes [`ApiResponse::no_response`];
/// an envelope whose `result` does not fit `T` is a [`Error::Json`].
fn decode_envelope<T: DeserializeOwned>(resp: &HttpResponse) -> Result<ApiResponse<T>> {
    let raw = match serde_json::from_str::<ApiResponse<serde_json::Value>>(&resp.body) {
        Ok(raw) => raw,
        Err(e) if resp.is_success() => {
            tracing::warn!(status = resp.status, error = %e, "undecodable response body");
            return Ok(ApiResponse::no_response());
        }
        Err(_) => return Err(RequestError::status(resp.status, &resp.body).into()),
    };

    let ApiResponse {
        ok,
        message,
        error_code,
        parameters,
        result,
    } = raw;
    let result = match result {
        Some(v) if ok => Some(serde_json::from_value(v)?),
        // A failed call's payload is informational only.
        Some(v) => serde_json::from_value(v).ok(),
        None => None,
    };

    Ok(ApiResponse {
        ok,
        message,
        error_code,
        parameters,
        result,
    })
}

fn unwrap_result<T: DeserializeOwned>(envelope: ApiResponse<T>, status: u16) -> Result<T> {
    if !envelope.ok {
        return Err(envelope.to_error(status));
    }
    match envelope.result {
        Some(v) => Ok(v),
        // `()` and `Option<_>` payloads accept a missing result.
        None => serde_json::from_value(serde_json::Value::Null).map_err(|_| Error::Api {
            code: i64::from(status),
            message: "response has no result".to_string(),
            retry_after: None,
            migrate_to_chat_id: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{envelope::NO_RESPONSE_MESSAGE, errors::RequestErrorKind, types::User};
    use async_trait::async_trait;
    use serde_json::json;
    use std::{sync::Mutex, time::Duration};

    type Reply = Box<dyn Fn() -> Result<HttpResponse> + Send + Sync>;

    struct FakeTransport {
        seen: Mutex<Vec<HttpRequest>>,
        reply: Reply,
        delay: Option<Duration>,
    }

    impl FakeTransport {
        fn replying(status: u16, body: &str) -> Arc<Self> {
            let body = body.to_string();
            Self::with(Box::new(move || {
                Ok(HttpResponse {
                    status,
                    body: body.clone(),
                })
            }))
        }

        fn with(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
                reply,
                delay: None,
            })
        }

        fn slow(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
                reply: Box::new(|| {
                    Ok(HttpResponse {
                        status: 200,
                        body: r#"{"ok":true,"result":true}"#.to_string(),
                    })
                }),
                delay: Some(delay),
            })
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.seen.lock().unwrap().push(request);
            if let Some(d) = self.delay {
                tokio::time::sleep(d).await;
            }
            (self.reply)()
        }
    }

    fn client(t: &Arc<FakeTransport>) -> WebApiClient {
        WebApiClient::new(t.clone())
    }

    #[tokio::test]
    async fn get_unwraps_result() {
        let t = FakeTransport::replying(
            200,
            r#"{"ok":true,"result":{"id":1,"is_bot":true,"first_name":"bot","username":"tg_bot"}}"#,
        );
        let me: User = client(&t).get("getMe", None).await.unwrap();
        assert_eq!(me.username.as_deref(), Some("tg_bot"));

        let sent = t.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].path_and_query, "getMe");
        assert!(sent[0].body.is_none());
    }

    #[tokio::test]
    async fn query_and_body_are_built() {
        let t = FakeTransport::replying(200, r#"{"ok":true,"result":true}"#);
        let params = QueryParams::new().with("a", 1).with_flag("b");
        let ok: bool = client(&t)
            .post("setX", Some(&params), Some(&json!({ "chat_id": "@c" })))
            .await
            .unwrap();
        assert!(ok);

        let sent = &t.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.path_and_query, "setX?a=1&b");
        assert_eq!(sent.body.as_deref(), Some(r#"{"chat_id":"@c"}"#));
    }

    #[tokio::test]
    async fn missing_params_mapping_does_not_fault() {
        let t = FakeTransport::replying(200, r#"{"ok":true}"#);
        client(&t).put("setY", None, NO_BODY).await.unwrap();
        client(&t).delete("setY", None, NO_BODY).await.unwrap();
        let sent = t.requests();
        assert_eq!(sent[0].method, Method::Put);
        assert_eq!(sent[0].path_and_query, "setY");
        assert_eq!(sent[1].method, Method::Delete);
    }

    #[tokio::test]
    async fn garbage_body_becomes_no_response_envelope() {
        let t = FakeTransport::replying(200, "<html>bad gateway</html>");
        let env: ApiResponse<User> = client(&t).get_envelope("getMe", None).await.unwrap();
        assert!(!env.ok);
        assert_eq!(env.message.as_deref(), Some(NO_RESPONSE_MESSAGE));
        assert!(env.result.is_none());

        // Typed calls surface the same envelope as an api error.
        let err = client(&t).get::<User>("getMe", None).await.unwrap_err();
        assert!(matches!(err, Error::Api { ref message, .. } if message == NO_RESPONSE_MESSAGE));
    }

    #[tokio::test]
    async fn mismatched_result_is_a_decode_error_not_a_lost_reply() {
        let t = FakeTransport::replying(200, r#"{"ok":true,"result":{"message_id":5}}"#);

        let err = client(&t)
            .post_envelope::<User, _>("sendMessage", None, Some(&json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)), "{err:?}");

        let err = client(&t).get::<User>("getMe", None).await.unwrap_err();
        assert!(matches!(err, Error::Json(_)), "{err:?}");

        // The same envelope read loosely still reports success.
        let env: ApiResponse<serde_json::Value> = client(&t)
            .post_envelope("sendMessage", None, Some(&json!({})))
            .await
            .unwrap();
        assert!(env.ok);
        assert_eq!(env.result.unwrap()["message_id"], 5);
    }

    #[tokio::test]
    async fn ok_false_is_returned_by_envelope_calls_and_raised_by_typed_calls() {
        let body = r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#;
        let t = FakeTransport::replying(400, body);

        let env: ApiResponse<bool> = client(&t)
            .post_envelope("sendMessage", None, Some(&json!({})))
            .await
            .unwrap();
        assert!(!env.ok);
        assert_eq!(env.error_code, Some(400));

        let err = client(&t)
            .post::<bool, _>("sendMessage", None, Some(&json!({})))
            .await
            .unwrap_err();
        match err {
            Error::Api { code, message, .. } => {
                assert_eq!(code, 400);
                assert_eq!(message, "Bad Request: chat not found");
            }
            other => panic!("unexpected {other:?}"),
        }

        let err = client(&t).post_unit("x", None, NO_BODY).await.unwrap_err();
        assert!(matches!(err, Error::Api { code: 400, .. }));
    }

    #[tokio::test]
    async fn non_envelope_error_status_is_classified() {
        let t = FakeTransport::replying(502, "upstream down");
        let err = client(&t).get::<bool>("getMe", None).await.unwrap_err();
        assert_eq!(err.request_kind(), Some(RequestErrorKind::HttpStatus));
        let Error::Request(req) = err else { unreachable!() };
        assert_eq!(req.code, 502);

        let err = client(&t).delete("x", None, NO_BODY).await.unwrap_err();
        assert_eq!(err.request_kind(), Some(RequestErrorKind::HttpStatus));
    }

    #[tokio::test]
    async fn unit_calls_ignore_non_envelope_success_bodies() {
        let t = FakeTransport::replying(204, "");
        client(&t).put("x", None, Some(&json!({"a": 1}))).await.unwrap();
    }

    #[tokio::test]
    async fn missing_result_is_fine_for_unit_payloads_only() {
        let t = FakeTransport::replying(200, r#"{"ok":true}"#);
        client(&t).get::<()>("x", None).await.unwrap();
        assert_eq!(client(&t).get::<Option<User>>("x", None).await.unwrap(), None);
        let err = client(&t).get::<User>("x", None).await.unwrap_err();
        assert!(matches!(err, Error::Api { code: 200, .. }));
    }

    #[tokio::test]
    async fn empty_path_is_rejected_before_sending() {
        let t = FakeTransport::replying(200, r#"{"ok":true}"#);
        let err = client(&t).get::<()>("  ", None).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(t.requests().is_empty());
    }

    #[tokio::test]
    async fn paths_that_leave_the_bot_base_are_rejected() {
        let t = FakeTransport::replying(200, r#"{"ok":true,"result":true}"#);
        for path in ["/getMe", "https://evil.example/bot1:x/getMe", "//evil.example/getMe"] {
            let err = client(&t).get::<bool>(path, None).await.unwrap_err();
            assert!(matches!(err, Error::InvalidRequest(_)), "{path}: {err:?}");
        }
        assert!(t.requests().is_empty());

        client(&t).get::<bool>("getMe", None).await.unwrap();
        assert_eq!(t.requests().len(), 1);
    }

    #[tokio::test]
    async fn classified_failures_propagate() {
        let t = FakeTransport::with(Box::new(|| Err(RequestError::invalid_token("401").into())));
        let err = client(&t).get::<User>("getMe", None).await.unwrap_err();
        assert!(err.is_invalid_token());

        let t = FakeTransport::with(Box::new(|| Err(RequestError::timed_out("deadline").into())));
        let err = client(&t).get::<User>("getMe", None).await.unwrap_err();
        assert!(err.is_timeout());
        let Error::Request(req) = err else { unreachable!() };
        assert_eq!(req.code, 408);
    }

    #[tokio::test]
    async fn caller_cancel_wins_over_slow_transport() {
        let t = FakeTransport::slow(Duration::from_secs(30));
        let c = client(&t);
        let token = c.cancellation_token().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });

        let err = c.get::<bool>("getUpdates", None).await.unwrap_err();
        assert!(err.is_cancelled());
        assert!(!err.is_timeout());
    }

    #[tokio::test]
    async fn timeout_during_caller_cancel_reports_cancelled() {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let t = FakeTransport::with(Box::new(move || {
            token.cancel();
            Err(RequestError::timed_out("deadline").into())
        }));
        let c = WebApiClient::with_cancellation(t.clone(), cancel);
        let err = c.get::<bool>("getMe", None).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn already_cancelled_client_sends_nothing() {
        let t = FakeTransport::replying(200, r#"{"ok":true,"result":true}"#);
        let c = client(&t);
        c.cancellation_token().cancel();
        let err = c.get::<bool>("getMe", None).await.unwrap_err();
        assert!(err.is_cancelled());
        assert!(t.requests().is_empty());
    }
}
