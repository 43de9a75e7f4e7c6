//! Stateless request builder and response parser for the entity endpoints.
//!
//! # Design
//! `EntityApi` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`, so the mapping to the wire can be tested
//! without any I/O. `EntityClient` glues the two halves to a `Transport`.
//!
//! Paths always grow in the order
//! `/entities/{id}[/values/{value}[/expressions | /expression/{expr}]]`.
//! Ids and values go in verbatim; only the free-form expression of the
//! delete-expression path is percent-encoded. The service spells that
//! segment `expression` while creation uses `expressions`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::types::{Entities, Entity, EntityValue};

#[derive(Debug, Clone)]
pub struct EntityApi {
    base_url: String,
}

impl EntityApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn entities_url(&self) -> String {
        format!("{}/entities", self.base_url)
    }

    fn entity_url(&self, id: &str) -> String {
        format!("{}/entities/{id}", self.base_url)
    }

    fn value_url(&self, id: &str, value: &str) -> String {
        format!("{}/entities/{id}/values/{value}", self.base_url)
    }

    pub fn build_create_entity(&self, entity: &Entity) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.entities_url(),
            body: Some(json_body(entity)?),
        })
    }

    pub fn build_create_entity_value(
        &self,
        id: &str,
        value: &EntityValue,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/values", self.entity_url(id)),
            body: Some(json_body(value)?),
        })
    }

    /// The expression is posted as the raw body, not as a JSON string.
    pub fn build_create_entity_value_expression(
        &self,
        id: &str,
        value: &str,
        expression: &str,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/expressions", self.value_url(id, value)),
            body: Some(RequestBody::text(expression)),
        }
    }

    pub fn build_delete_entity(&self, id: &str) -> HttpRequest {
        delete(self.entity_url(id))
    }

    pub fn build_delete_entity_value(&self, id: &str, value: &str) -> HttpRequest {
        delete(self.value_url(id, value))
    }

    pub fn build_delete_entity_value_expression(
        &self,
        id: &str,
        value: &str,
        expression: &str,
    ) -> HttpRequest {
        delete(format!(
            "{}/expression/{}",
            self.value_url(id, value),
            urlencoding::encode(expression)
        ))
    }

    pub fn build_list_entities(&self) -> HttpRequest {
        get(self.entities_url())
    }

    pub fn build_get_entity(&self, id: &str) -> HttpRequest {
        get(self.entity_url(id))
    }

    pub fn build_update_entity(&self, entity: &Entity) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: self.entity_url(&entity.id),
            body: Some(json_body(entity)?),
        })
    }

    pub fn parse_create_entity(&self, response: HttpResponse) -> Result<Vec<u8>, ApiError> {
        check_status(response)
    }

    pub fn parse_create_entity_value(&self, response: HttpResponse) -> Result<Entity, ApiError> {
        json_response(response)
    }

    pub fn parse_create_entity_value_expression(
        &self,
        response: HttpResponse,
    ) -> Result<Entity, ApiError> {
        json_response(response)
    }

    pub fn parse_delete_entity(&self, response: HttpResponse) -> Result<Vec<u8>, ApiError> {
        check_status(response)
    }

    pub fn parse_delete_entity_value(&self, response: HttpResponse) -> Result<Vec<u8>, ApiError> {
        check_status(response)
    }

    pub fn parse_delete_entity_value_expression(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<u8>, ApiError> {
        check_status(response)
    }

    pub fn parse_list_entities(&self, response: HttpResponse) -> Result<Entities, ApiError> {
        json_response(response)
    }

    pub fn parse_get_entity(&self, response: HttpResponse) -> Result<Entity, ApiError> {
        json_response(response)
    }

    pub fn parse_update_entity(&self, response: HttpResponse) -> Result<Vec<u8>, ApiError> {
        check_status(response)
    }
}

fn get(url: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        url,
        body: None,
    }
}

fn delete(url: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Delete,
        url,
        body: None,
    }
}

fn json_body<T: Serialize>(input: &T) -> Result<RequestBody, ApiError> {
    serde_json::to_vec(input)
        .map(RequestBody::json)
        .map_err(ApiError::Serialization)
}

/// Anything but 200 is a failure, whatever the body says.
fn check_status(response: HttpResponse) -> Result<Vec<u8>, ApiError> {
    if response.status == 200 {
        return Ok(response.body);
    }
    Err(ApiError::UnexpectedStatus {
        status: response.status,
        body: response.body,
    })
}

fn json_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    let body = check_status(response)?;
    serde_json::from_slice(&body).map_err(ApiError::Deserialization)
}
