//! Full entity lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every client
//! operation over real HTTP through `UreqTransport`, so request building,
//! headers and response parsing are checked end-to-end.

use wit_entities::{ClientConfig, Entity, EntityClient, EntityValue, UreqTransport};

fn start_mock_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn client(addr: std::net::SocketAddr) -> EntityClient<UreqTransport> {
    let config = ClientConfig::new(format!("http://{addr}")).with_access_token("test-token");
    EntityClient::from_config(&config)
}

#[test]
fn entity_lifecycle() {
    let client = client(start_mock_server());

    // Step 1: list, only the builtin entity exists.
    let entities = client.list_entities().unwrap();
    assert_eq!(entities.as_slice(), ["wit$temperature"]);

    // Step 2: create an entity with one value.
    let entity = Entity::new("favorite_city")
        .with_doc("A city that I like")
        .with_value(EntityValue::new("Paris").with_expression("City of Light"));
    let raw = client.create_entity(&entity).unwrap();
    let created: Entity = serde_json::from_slice(&raw).unwrap();
    assert_eq!(created, entity);

    // Step 3: list keeps service order.
    let entities = client.list_entities().unwrap();
    assert_eq!(entities.as_slice(), ["wit$temperature", "favorite_city"]);

    // Step 4: get it back.
    let fetched = client.get_entity("favorite_city").unwrap();
    assert_eq!(fetched, entity);

    // Step 5: add a value.
    let updated = client
        .create_entity_value("favorite_city", &EntityValue::new("Barcelona"))
        .unwrap();
    assert_eq!(updated.values.len(), 2);

    // Step 6: add a raw expression to the new value.
    let updated = client
        .create_entity_value_expression("favorite_city", "Barcelona", "Paella")
        .unwrap();
    assert_eq!(updated.value("Barcelona").unwrap().expressions, ["Paella"]);

    // Step 7: delete an expression containing spaces.
    client
        .delete_entity_value_expression("favorite_city", "Paris", "City of Light")
        .unwrap();
    let fetched = client.get_entity("favorite_city").unwrap();
    assert!(fetched.value("Paris").unwrap().expressions.is_empty());

    // Step 8: delete a value.
    client.delete_entity_value("favorite_city", "Paris").unwrap();
    let fetched = client.get_entity("favorite_city").unwrap();
    assert!(fetched.value("Paris").is_none());

    // Step 9: update the doc.
    let mut replacement = fetched.clone();
    replacement.doc = "Cities worth a visit".to_string();
    client.update_entity(&replacement).unwrap();
    assert_eq!(
        client.get_entity("favorite_city").unwrap().doc,
        "Cities worth a visit"
    );

    // Step 10: delete the entity.
    client.delete_entity("favorite_city").unwrap();

    // Step 11: it is gone.
    let err = client.get_entity("favorite_city").unwrap_err();
    assert!(err.is_not_found());
    let err = client.delete_entity("favorite_city").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(client.list_entities().unwrap().as_slice(), ["wit$temperature"]);
}

#[test]
fn service_errors_surface_as_unexpected_status() {
    let client = client(start_mock_server());

    let err = client
        .create_entity_value("wit$temperature", &EntityValue::new("hot"))
        .unwrap_err();
    assert_eq!(err.status(), Some(400));

    client.create_entity(&Entity::new("favorite_city")).unwrap();
    let err = client.create_entity(&Entity::new("favorite_city")).unwrap_err();
    assert_eq!(err.status(), Some(409));

    let err = client
        .create_entity_value_expression("favorite_city", "Lyon", "Gones")
        .unwrap_err();
    assert!(err.is_not_found());
}
