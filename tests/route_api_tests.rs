//! Tests de integración contra la API en ejecución
//!
//! Requieren el servicio levantado con un Neo4j accesible
//! (`API_URL` configurable, por defecto http://localhost:4000):
//!
//! ```sh
//! cargo test -- --ignored
//! ```
//!
//! Cada test usa nombres de estación únicos para no chocar con datos
//! previos del grafo.

use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

fn api_url() -> String {
    std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:4000".to_string())
}

fn routes_endpoint() -> String {
    format!("{}/api/routes", api_url().trim_end_matches('/'))
}

/// Nombre de estación único por ejecución
fn station(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

fn route_body(origin: &str, destination: &str, stops: &[&str]) -> Value {
    json!({
        "origin": origin,
        "destination": destination,
        "stops": stops,
        "startTime": "08:00",
        "endTime": "09:00",
    })
}

async fn create_route(client: &reqwest::Client, body: &Value) -> reqwest::Response {
    client
        .post(routes_endpoint())
        .json(body)
        .send()
        .await
        .expect("la API debe estar en ejecución")
}

#[tokio::test]
#[ignore = "requiere la API y Neo4j en ejecución"]
async fn test_duplicate_active_route_conflicts() {
    let client = reqwest::Client::new();
    let origin = station("A");
    let destination = station("B");
    let stop = station("C");
    let body = route_body(&origin, &destination, &[&stop]);

    let first = create_route(&client, &body).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    // Segunda creación idéntica: conflicto
    let second = create_route(&client, &body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    // Mismos extremos y horario pero distinto conjunto de paradas: pasa
    let different_stops = route_body(&origin, &destination, &[]);
    let third = create_route(&client, &different_stops).await;
    assert_eq!(third.status(), StatusCode::CREATED);
}

#[tokio::test]
#[ignore = "requiere la API y Neo4j en ejecución"]
async fn test_duplicate_check_is_order_insensitive() {
    let client = reqwest::Client::new();
    let origin = station("A");
    let destination = station("B");
    let stop_c = station("C");
    let stop_d = station("D");

    let first = create_route(&client, &route_body(&origin, &destination, &[&stop_c, &stop_d])).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let reordered = create_route(&client, &route_body(&origin, &destination, &[&stop_d, &stop_c])).await;
    assert_eq!(reordered.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requiere la API y Neo4j en ejecución"]
async fn test_soft_delete_hides_route_and_frees_duplicate() {
    let client = reqwest::Client::new();
    let origin = station("A");
    let destination = station("B");
    let body = route_body(&origin, &destination, &[]);

    let created = create_route(&client, &body).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = created.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    // Soft delete: devuelve id e isActive=false
    let deleted = client
        .delete(format!("{}/{}", routes_endpoint(), id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);
    let deleted: Value = deleted.json().await.unwrap();
    assert_eq!(deleted["route"]["id"], id.as_str());
    assert_eq!(deleted["route"]["isActive"], false);

    // La ruta desactivada deja de ser visible por id
    let fetched = client
        .get(format!("{}/{}", routes_endpoint(), id))
        .send()
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);

    // Y desaparece del listado
    let listed = client.get(routes_endpoint()).send().await.unwrap();
    assert_eq!(listed.status(), StatusCode::OK);
    let listed: Value = listed.json().await.unwrap();
    let ids: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["id"].as_str())
        .collect();
    assert!(!ids.contains(&id.as_str()));

    // Una ruta inactiva no cuenta para el chequeo de duplicados
    let recreated = create_route(&client, &body).await;
    assert_eq!(recreated.status(), StatusCode::CREATED);

    // Borrar de nuevo la ruta original es idempotente
    let deleted_again = client
        .delete(format!("{}/{}", routes_endpoint(), id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted_again.status(), StatusCode::OK);
    let deleted_again: Value = deleted_again.json().await.unwrap();
    assert_eq!(deleted_again["route"]["isActive"], false);
}

#[tokio::test]
#[ignore = "requiere la API y Neo4j en ejecución"]
async fn test_update_replaces_full_stop_set() {
    let client = reqwest::Client::new();
    let origin = station("A");
    let destination = station("B");
    let stop_c = station("C");
    let stop_x = station("X");
    let stop_y = station("Y");

    let created = create_route(&client, &route_body(&origin, &destination, &[&stop_c])).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = created.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let updated = client
        .patch(format!("{}/{}", routes_endpoint(), id))
        .json(&json!({ "stops": [stop_x, stop_y] }))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);

    // Sin aristas residuales: las paradas son exactamente las nuevas
    let fetched = client
        .get(format!("{}/{}", routes_endpoint(), id))
        .send()
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched: Value = fetched.json().await.unwrap();
    let mut stops: Vec<String> = fetched["stops"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect();
    stops.sort();
    let mut expected = vec![stop_x.clone(), stop_y.clone()];
    expected.sort();
    assert_eq!(stops, expected);

    // Los campos no enviados conservan su valor
    assert_eq!(fetched["origin"], origin.as_str());
    assert_eq!(fetched["startTime"], "08:00");
}

#[tokio::test]
#[ignore = "requiere la API y Neo4j en ejecución"]
async fn test_update_excludes_own_route_from_duplicate_check() {
    let client = reqwest::Client::new();
    let origin = station("A");
    let destination = station("B");

    let created = create_route(&client, &route_body(&origin, &destination, &[])).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = created.json().await.unwrap();
    let id = created["id"].as_str().unwrap();

    // Un update sin cambios no debe chocar consigo mismo
    let updated = client
        .patch(format!("{}/{}", routes_endpoint(), id))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let updated: Value = updated.json().await.unwrap();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["isActive"], true);
}

#[tokio::test]
#[ignore = "requiere la API y Neo4j en ejecución"]
async fn test_get_unknown_id_is_not_found() {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/{}", routes_endpoint(), Uuid::new_v4()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requiere la API y Neo4j en ejecución"]
async fn test_concurrent_distinct_creates_both_succeed() {
    let client = reqwest::Client::new();
    let body_one = route_body(&station("A"), &station("B"), &[]);
    let body_two = route_body(&station("A"), &station("B"), &[]);

    let (first, second) = tokio::join!(
        create_route(&client, &body_one),
        create_route(&client, &body_two)
    );
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::CREATED);

    let first: Value = first.json().await.unwrap();
    let second: Value = second.json().await.unwrap();

    for id in [first["id"].as_str().unwrap(), second["id"].as_str().unwrap()] {
        let fetched = client
            .get(format!("{}/{}", routes_endpoint(), id))
            .send()
            .await
            .unwrap();
        assert_eq!(fetched.status(), StatusCode::OK);
    }
}
