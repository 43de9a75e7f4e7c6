//! In-memory stand-in for the wit entity endpoints.
//!
//! Entities keep insertion order so listing is deterministic. The store
//! starts with the builtin `wit$temperature`, which cannot be changed.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default)]
    pub builtin: bool,
    #[serde(default)]
    pub doc: String,
    pub id: String,
    #[serde(default)]
    pub values: Vec<EntityValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityValue {
    pub value: String,
    #[serde(default)]
    pub expressions: Vec<String>,
}

pub const BUILTIN_TEMPERATURE: &str = "wit$temperature";

pub type Db = Arc<RwLock<Vec<Entity>>>;

type Failure = (StatusCode, Json<Value>);

fn failure(status: StatusCode, message: &str) -> Failure {
    (status, Json(json!({ "error": message })))
}

fn deleted(name: String) -> Json<Value> {
    Json(json!({ "deleted": name }))
}

fn seed() -> Vec<Entity> {
    vec![Entity {
        builtin: true,
        doc: "Temperature in degrees Celsius or Fahrenheit".to_string(),
        id: BUILTIN_TEMPERATURE.to_string(),
        values: Vec::new(),
    }]
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(seed()));
    Router::new()
        .route("/entities", get(list_entities).post(create_entity))
        .route(
            "/entities/{id}",
            get(get_entity).put(update_entity).delete(delete_entity),
        )
        .route("/entities/{id}/values", post(create_value))
        .route("/entities/{id}/values/{value}", delete(delete_value))
        .route(
            "/entities/{id}/values/{value}/expressions",
            post(create_expression),
        )
        .route(
            "/entities/{id}/values/{value}/expression/{expression}",
            delete(delete_expression),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn find_mut<'a>(entities: &'a mut [Entity], id: &str) -> Result<&'a mut Entity, Failure> {
    entities
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "entity not found"))
}

/// Like `find_mut`, but builtin entities are read-only.
fn find_user_mut<'a>(entities: &'a mut [Entity], id: &str) -> Result<&'a mut Entity, Failure> {
    let entity = find_mut(entities, id)?;
    if entity.builtin {
        return Err(failure(StatusCode::BAD_REQUEST, "builtin entities are read-only"));
    }
    Ok(entity)
}

fn find_value_mut<'a>(entity: &'a mut Entity, value: &str) -> Result<&'a mut EntityValue, Failure> {
    entity
        .values
        .iter_mut()
        .find(|v| v.value == value)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "value not found"))
}

async fn list_entities(State(db): State<Db>) -> Json<Vec<String>> {
    let entities = db.read().await;
    Json(entities.iter().map(|e| e.id.clone()).collect())
}

async fn get_entity(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Entity>, Failure> {
    let entities = db.read().await;
    entities
        .iter()
        .find(|e| e.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "entity not found"))
}

async fn create_entity(
    State(db): State<Db>,
    Json(input): Json<Entity>,
) -> Result<Json<Entity>, Failure> {
    if input.id.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "id is required"));
    }
    let mut entities = db.write().await;
    if entities.iter().any(|e| e.id == input.id) {
        return Err(failure(StatusCode::CONFLICT, "entity already exists"));
    }
    let entity = Entity {
        builtin: false,
        ..input
    };
    info!(id = %entity.id, "created entity");
    entities.push(entity.clone());
    Ok(Json(entity))
}

async fn update_entity(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<Entity>,
) -> Result<Json<Entity>, Failure> {
    let mut entities = db.write().await;
    let entity = find_user_mut(&mut entities, &id)?;
    entity.doc = input.doc;
    entity.values = input.values;
    Ok(Json(entity.clone()))
}

async fn delete_entity(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Failure> {
    let mut entities = db.write().await;
    find_user_mut(&mut entities, &id)?;
    entities.retain(|e| e.id != id);
    info!(%id, "deleted entity");
    Ok(deleted(id))
}

async fn create_value(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<EntityValue>,
) -> Result<Json<Entity>, Failure> {
    if input.value.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "value is required"));
    }
    let mut entities = db.write().await;
    let entity = find_user_mut(&mut entities, &id)?;
    if entity.values.iter().any(|v| v.value == input.value) {
        return Err(failure(StatusCode::CONFLICT, "value already exists"));
    }
    entity.values.push(input);
    Ok(Json(entity.clone()))
}

async fn delete_value(
    State(db): State<Db>,
    Path((id, value)): Path<(String, String)>,
) -> Result<Json<Value>, Failure> {
    let mut entities = db.write().await;
    let entity = find_user_mut(&mut entities, &id)?;
    find_value_mut(entity, &value)?;
    entity.values.retain(|v| v.value != value);
    Ok(deleted(value))
}

/// The expression arrives as the raw request body.
async fn create_expression(
    State(db): State<Db>,
    Path((id, value)): Path<(String, String)>,
    expression: String,
) -> Result<Json<Entity>, Failure> {
    if expression.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "expression is required"));
    }
    let mut entities = db.write().await;
    let entity = find_user_mut(&mut entities, &id)?;
    let entry = find_value_mut(entity, &value)?;
    if entry.expressions.contains(&expression) {
        return Err(failure(StatusCode::CONFLICT, "expression already exists"));
    }
    entry.expressions.push(expression);
    Ok(Json(entity.clone()))
}

async fn delete_expression(
    State(db): State<Db>,
    Path((id, value, expression)): Path<(String, String, String)>,
) -> Result<Json<Value>, Failure> {
    let mut entities = db.write().await;
    let entity = find_user_mut(&mut entities, &id)?;
    let entry = find_value_mut(entity, &value)?;
    let before = entry.expressions.len();
    entry.expressions.retain(|e| *e != expression);
    if entry.expressions.len() == before {
        return Err(failure(StatusCode::NOT_FOUND, "expression not found"));
    }
    Ok(deleted(expression))
}
