use crate::error::ClientError;
use crate::event::Events;
use crate::transport::{Transport, TransportRequest, TransportResponse};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{debug, warn};

const CONTENT_TYPE: &str = "Content-Type";
const AUTHORIZATION: &str = "Authorization";
const APPLICATION_JSON: &str = "application/json";

/// Where events go and how to authenticate
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct ClientConfig {
    pub endpoint: String,
    pub token: String,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        ClientConfig {
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    fn validate<E>(&self) -> Result<(), ClientError<E>> {
        if self.endpoint.is_empty() {
            return Err(ClientError::Configuration("endpoint"));
        }
        if self.token.is_empty() {
            return Err(ClientError::Configuration("token"));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &"***")
            .finish()
    }
}

/// Sends events to a single ingestion endpoint
///
/// Holds no state besides its configuration, so one client can serve any
/// number of concurrent [`send`](EventClient::send) calls.
#[derive(Clone)]
pub struct EventClient<T = reqwest::Client> {
    endpoint: String,
    authorization: String,
    transport: T,
}

impl EventClient {
    /// Create a client backed by a fresh `reqwest::Client`
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate::<reqwest::Error>()?;
        Ok(Self::from_validated(config, reqwest::Client::new()))
    }
}

impl<T: Transport> EventClient<T> {
    /// Create a client that sends through `transport`
    pub fn with_transport(
        config: ClientConfig,
        transport: T,
    ) -> Result<Self, ClientError<T::Error>> {
        config.validate::<T::Error>()?;
        Ok(Self::from_validated(config, transport))
    }

    fn from_validated(config: ClientConfig, transport: T) -> Self {
        EventClient {
            authorization: format!("Bearer {}", config.token),
            endpoint: config.endpoint,
            transport,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one event or a batch as a single `POST`
    ///
    /// The body is always a JSON array. A 2XX response is handed back untouched;
    /// any other status becomes [`ClientError::Delivery`]. Transport failures
    /// are returned as they are in [`ClientError::Transport`].
    pub async fn send<'a>(
        &self,
        events: impl Into<Events<'a>>,
    ) -> Result<T::Response, ClientError<T::Error>> {
        let events = events.into();
        let body = serde_json::to_string(&events)?;

        let request = TransportRequest::post(body)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .header(AUTHORIZATION, self.authorization.as_str());

        debug!("Sending {} events to {}", events.len(), self.endpoint);
        let start_time = Instant::now();

        let response = self
            .transport
            .fetch(&self.endpoint, request)
            .await
            .map_err(|e| {
                debug!("Transport failed for {}: {}", self.endpoint, e);
                ClientError::Transport(e)
            })?;

        if response.ok() {
            debug!(
                "Sent {} events, status {}, elapsed: {:?}",
                events.len(),
                response.status(),
                start_time.elapsed()
            );
            return Ok(response);
        }

        let status = response.status();
        let status_text = response.status_text();
        let body = response.text().await.map_err(ClientError::Transport)?;

        warn!(
            "Endpoint {} rejected {} events with status {}, elapsed: {:?}",
            self.endpoint,
            events.len(),
            status,
            start_time.elapsed()
        );

        Err(ClientError::Delivery {
            status,
            status_text,
            body,
        })
    }
}

impl<T> fmt::Debug for EventClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
