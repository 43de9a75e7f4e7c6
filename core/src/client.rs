//! Executing client: one HTTP round-trip per entity operation.
//!
//! # Design
//! `EntityClient` pairs the pure `EntityApi` with a `Transport`. It holds no
//! mutable state, so a single client can be shared between threads whenever
//! its transport can. Errors are returned to the caller untouched; the
//! client only traces what it sends and receives.

use tracing::debug;

use crate::api::EntityApi;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Entities, Entity, EntityValue};

#[derive(Debug, Clone)]
pub struct EntityClient<T> {
    api: EntityApi,
    transport: T,
}

impl EntityClient<UreqTransport> {
    /// Client for the configured base URL over a blocking ureq agent.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url, UreqTransport::new(config))
    }
}

impl<T: Transport> EntityClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            api: EntityApi::new(base_url),
            transport,
        }
    }

    pub fn api(&self) -> &EntityApi {
        &self.api
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        match self.transport.execute(&request) {
            Ok(response) => {
                debug!(
                    status = response.status,
                    bytes = response.body.len(),
                    "received response"
                );
                Ok(response)
            }
            Err(err) => {
                debug!(error = %err, url = %request.url, "transport failed");
                Err(ApiError::Transport(err))
            }
        }
    }

    /// Create an entity. Returns the service's raw response body.
    pub fn create_entity(&self, entity: &Entity) -> Result<Vec<u8>, ApiError> {
        let request = self.api.build_create_entity(entity)?;
        self.api.parse_create_entity(self.send(request)?)
    }

    /// Add a value to an entity, returning the entity as the service now
    /// sees it.
    pub fn create_entity_value(&self, id: &str, value: &EntityValue) -> Result<Entity, ApiError> {
        let request = self.api.build_create_entity_value(id, value)?;
        self.api.parse_create_entity_value(self.send(request)?)
    }

    pub fn create_entity_value_expression(
        &self,
        id: &str,
        value: &str,
        expression: &str,
    ) -> Result<Entity, ApiError> {
        let request = self
            .api
            .build_create_entity_value_expression(id, value, expression);
        self.api
            .parse_create_entity_value_expression(self.send(request)?)
    }

    pub fn delete_entity(&self, id: &str) -> Result<Vec<u8>, ApiError> {
        let request = self.api.build_delete_entity(id);
        self.api.parse_delete_entity(self.send(request)?)
    }

    pub fn delete_entity_value(&self, id: &str, value: &str) -> Result<Vec<u8>, ApiError> {
        let request = self.api.build_delete_entity_value(id, value);
        self.api.parse_delete_entity_value(self.send(request)?)
    }

    pub fn delete_entity_value_expression(
        &self,
        id: &str,
        value: &str,
        expression: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let request = self
            .api
            .build_delete_entity_value_expression(id, value, expression);
        self.api
            .parse_delete_entity_value_expression(self.send(request)?)
    }

    pub fn list_entities(&self) -> Result<Entities, ApiError> {
        let request = self.api.build_list_entities();
        self.api.parse_list_entities(self.send(request)?)
    }

    pub fn get_entity(&self, id: &str) -> Result<Entity, ApiError> {
        let request = self.api.build_get_entity(id);
        self.api.parse_get_entity(self.send(request)?)
    }

    /// Replace an entity, addressed by `entity.id`. Returns the raw body.
    pub fn update_entity(&self, entity: &Entity) -> Result<Vec<u8>, ApiError> {
        let request = self.api.build_update_entity(entity)?;
        self.api.parse_update_entity(self.send(request)?)
    }
}
