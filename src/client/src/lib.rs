//! Client for delivering events to an HTTP ingestion endpoint
//!
//! Every call to [`EventClient::send`] issues exactly one `POST` whose body is a
//! JSON array of events, authenticated with a static bearer token. The client
//! does not retry, queue or batch across calls; callers that need those wrap
//! `send` themselves.
//!
//! # Example
//!
//! ```rust,no_run
//! # use ingest_client::{ClientConfig, Event, EventClient};
//! #
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let client = EventClient::new(ClientConfig::new(
//!     "https://api.example.com/events",
//!     "secret-token",
//! ))?;
//!
//! let signup = Event::new("signup")?.with_field("plan", "pro")?;
//! client.send(&signup).await?;
//!
//! let batch = vec![Event::new("page_view")?, Event::new("click")?];
//! client.send(&batch).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod event;
pub mod transport;

// Public exports
pub use client::{ClientConfig, EventClient};
pub use error::{ClientError, ClientResult};
pub use event::{Event, EventError, Events};
pub use transport::{Transport, TransportRequest, TransportResponse};
