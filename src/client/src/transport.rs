//! HTTP transport seam
//!
//! [`EventClient`](crate::EventClient) never talks to the network directly: it
//! hands a fully built [`TransportRequest`] to a [`Transport`] and inspects the
//! [`TransportResponse`] it gets back. `reqwest::Client` is the default
//! implementation. Anything that needs timeouts, extra headers, compression or
//! a different HTTP stack plugs in here.

use reqwest::Method;

/// A request as built by the client, before it reaches the wire
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl TransportRequest {
    pub fn post(body: String) -> Self {
        TransportRequest {
            method: Method::POST,
            headers: Vec::new(),
            body,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Case-insensitive header lookup
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Fetch-like capability: send one request, resolve to one response
#[allow(async_fn_in_trait)]
pub trait Transport {
    type Response: TransportResponse<Error = Self::Error>;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn fetch(
        &self,
        url: &str,
        request: TransportRequest,
    ) -> Result<Self::Response, Self::Error>;
}

#[allow(async_fn_in_trait)]
pub trait TransportResponse {
    type Error;

    /// True for 2XX statuses
    fn ok(&self) -> bool;

    fn status(&self) -> u16;

    fn status_text(&self) -> String;

    /// Read the whole body; consumes the response
    async fn text(self) -> Result<String, Self::Error>;
}

impl Transport for reqwest::Client {
    type Response = reqwest::Response;
    type Error = reqwest::Error;

    async fn fetch(
        &self,
        url: &str,
        request: TransportRequest,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut builder = self.request(request.method, url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        builder.body(request.body).send().await
    }
}

impl TransportResponse for reqwest::Response {
    type Error = reqwest::Error;

    fn ok(&self) -> bool {
        reqwest::Response::status(self).is_success()
    }

    fn status(&self) -> u16 {
        reqwest::Response::status(self).as_u16()
    }

    /// The reason phrase the server sent, or the canonical one when the
    /// server's phrase matched it (hyper only keeps non-canonical phrases)
    fn status_text(&self) -> String {
        if let Some(reason) = self.extensions().get::<hyper::ext::ReasonPhrase>() {
            return String::from_utf8_lossy(reason.as_bytes()).into_owned();
        }
        reqwest::Response::status(self)
            .canonical_reason()
            .unwrap_or_default()
            .to_string()
    }

    async fn text(self) -> Result<String, reqwest::Error> {
        reqwest::Response::text(self).await
    }
}
