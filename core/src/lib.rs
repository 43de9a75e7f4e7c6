//! Blocking client for the wit.ai entity-management API.
//!
//! # Overview
//! Entities, their canonical values and the expressions that map onto those
//! values are managed through nine REST calls. Each call is exactly one HTTP
//! round-trip: no caching, batching or retries.
//!
//! # Design
//! - `EntityApi` is pure: `build_*` produces an `HttpRequest`, `parse_*`
//!   consumes an `HttpResponse`. It holds only the base URL.
//! - `Transport` performs the round-trip. `UreqTransport` is the default;
//!   tests plug in fakes.
//! - `EntityClient` runs build, transport and parse for each operation.
//! - Any status other than 200 is an `ApiError::UnexpectedStatus`.
//!
//! ```no_run
//! use wit_entities::{ClientConfig, EntityClient, EntityValue};
//!
//! let client = EntityClient::from_config(&ClientConfig::from_env());
//! for id in client.list_entities()? {
//!     println!("{id}");
//! }
//! let city = client.create_entity_value("favorite_city", &EntityValue::new("Paris"))?;
//! println!("{} now has {} values", city.id, city.values.len());
//! # Ok::<(), wit_entities::ApiError>(())
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::EntityApi;
pub use client::EntityClient;
pub use config::ClientConfig;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use transport::{Transport, UreqTransport};
pub use types::{Entities, Entity, EntityValue};
