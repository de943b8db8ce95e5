use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use vessel_api::{ApiConfig, VesselServer};
use vessel_core::open_db_in_memory;

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: Vec<u8>,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

fn app_with(config: ApiConfig) -> Router {
    VesselServer::with_connection(config, open_db_in_memory().unwrap())
        .unwrap()
        .router()
}

fn app() -> Router {
    app_with(ApiConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Reply {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    Reply {
        status,
        location,
        body,
    }
}

async fn create_owner(app: &Router, name: &str) -> i64 {
    let reply = send(app, Method::POST, "/owners", Some(json!({ "name": name }))).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    reply.json()["id"].as_i64().unwrap()
}

fn ship_body(imo: &str, owner_ids: &[i64]) -> Value {
    json!({
        "name": "X",
        "imoNumber": imo,
        "type": "Cargo",
        "tonnage": 100,
        "ownerIds": owner_ids,
    })
}

async fn create_ship(app: &Router, imo: &str, owner_ids: &[i64]) -> i64 {
    let reply = send(app, Method::POST, "/ships", Some(ship_body(imo, owner_ids))).await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.text());
    reply.json()["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_endpoint() {
    let reply = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["status"], "ok");
}

#[tokio::test]
async fn owner_lifecycle() {
    let app = app();

    let created = send(
        &app,
        Method::POST,
        "/owners",
        Some(json!({ "name": "Example Cruises" })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.json()["id"].as_i64().unwrap();
    assert_eq!(created.location.as_deref(), Some(format!("/owners/{id}").as_str()));

    let fetched = send(&app, Method::GET, &format!("/owners/{id}"), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), json!({ "id": id, "name": "Example Cruises" }));

    let listed = send(&app, Method::GET, "/owners", None).await;
    assert_eq!(listed.json().as_array().unwrap().len(), 1);

    let deleted = send(&app, Method::DELETE, &format!("/owners/{id}"), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let again = send(&app, Method::DELETE, &format!("/owners/{id}"), None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.text(), format!("Owner with ID {id} not found."));
}

#[tokio::test]
async fn owner_input_is_validated() {
    let app = app();

    let blank = send(&app, Method::POST, "/owners", Some(json!({ "name": "  " }))).await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert!(blank.text().starts_with("name:"));

    let missing = send(&app, Method::POST, "/owners", Some(json!({}))).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let too_long = send(
        &app,
        Method::POST,
        "/owners",
        Some(json!({ "name": "n".repeat(101) })),
    )
    .await;
    assert_eq!(too_long.status, StatusCode::BAD_REQUEST);

    let malformed = send(&app, Method::POST, "/owners", Some(json!(42))).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let unknown = send(&app, Method::GET, "/owners/404", None).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.text(), "Owner with ID 404 not found.");
}

#[tokio::test]
async fn create_ship_returns_details_and_location() {
    let app = app();
    let owner = create_owner(&app, "A").await;

    let reply = send(&app, Method::POST, "/ships", Some(ship_body("1234567", &[owner]))).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    let body = reply.json();
    let id = body["id"].as_i64().unwrap();
    assert_eq!(reply.location.as_deref(), Some(format!("/ships/{id}").as_str()));
    assert_eq!(body["imoNumber"], "1234567");
    assert_eq!(body["type"], "Cargo");
    assert_eq!(body["owners"], json!([{ "id": owner, "name": "A" }]));

    let details = send(&app, Method::GET, &format!("/ships/{id}"), None).await;
    assert_eq!(details.status, StatusCode::OK);
    assert_eq!(details.json(), body);

    let listed = send(&app, Method::GET, "/ships", None).await;
    let ships = listed.json();
    assert_eq!(ships.as_array().unwrap().len(), 1);
    assert!(ships[0].get("owners").is_none());
}

#[tokio::test]
async fn create_ship_rejections_use_exact_messages() {
    let app = app();
    let owner = create_owner(&app, "A").await;
    create_ship(&app, "1111111", &[owner]).await;

    let duplicate = send(&app, Method::POST, "/ships", Some(ship_body("1111111", &[owner]))).await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.text(), "Ship with IMO Number 1111111 already exists.");

    let unknown = send(
        &app,
        Method::POST,
        "/ships",
        Some(ship_body("2222222", &[998, 999])),
    )
    .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.text(), "The following owner IDs do not exist: 998, 999");

    let no_owners = send(&app, Method::POST, "/ships", Some(ship_body("2222222", &[]))).await;
    assert_eq!(no_owners.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_owners.text(), "At least one owner ID must be provided.");

    let bad_imo = send(&app, Method::POST, "/ships", Some(ship_body("12345", &[owner]))).await;
    assert_eq!(bad_imo.status, StatusCode::BAD_REQUEST);
    assert!(bad_imo.text().contains("IMO Number must be 7 digits."));

    let listed = send(&app, Method::GET, "/ships", None).await;
    assert_eq!(listed.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_ship_flow() {
    let app = app();
    let owner = create_owner(&app, "A").await;
    let first = create_ship(&app, "1111111", &[owner]).await;
    create_ship(&app, "2222222", &[owner]).await;

    let update = json!({ "name": "Renamed", "imoNumber": "1111111", "type": "Tanker", "tonnage": 250.5 });
    let ok = send(&app, Method::PUT, &format!("/ships/{first}"), Some(update)).await;
    assert_eq!(ok.status, StatusCode::NO_CONTENT);
    assert!(ok.body.is_empty());

    let details = send(&app, Method::GET, &format!("/ships/{first}"), None).await.json();
    assert_eq!(details["name"], "Renamed");
    assert_eq!(details["tonnage"], 250.5);
    assert_eq!(details["owners"].as_array().unwrap().len(), 1);

    let clash = json!({ "name": "X", "imoNumber": "2222222", "type": "Cargo", "tonnage": 1 });
    let rejected = send(&app, Method::PUT, &format!("/ships/{first}"), Some(clash)).await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        rejected.text(),
        "Another ship with IMO Number 2222222 already exists."
    );

    let missing = json!({ "name": "X", "imoNumber": "3333333", "type": "Cargo", "tonnage": 1 });
    let absent = send(&app, Method::PUT, "/ships/9999", Some(missing)).await;
    assert_eq!(absent.status, StatusCode::NOT_FOUND);
    assert_eq!(absent.text(), "Ship with ID 9999 not found.");

    let invalid = json!({ "name": "X", "imoNumber": "3333333", "type": "Cargo", "tonnage": 0 });
    let bad = send(&app, Method::PUT, &format!("/ships/{first}"), Some(invalid)).await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
    assert!(bad.text().contains("Tonnage must be greater than 0."));
}

#[tokio::test]
async fn delete_ship_keeps_owners() {
    let app = app();
    let a = create_owner(&app, "A").await;
    let b = create_owner(&app, "B").await;
    let ship = create_ship(&app, "1234567", &[a, b]).await;

    let deleted = send(&app, Method::DELETE, &format!("/ships/{ship}"), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = send(&app, Method::GET, &format!("/ships/{ship}"), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    let again = send(&app, Method::DELETE, &format!("/ships/{ship}"), None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let owners = send(&app, Method::GET, "/owners", None).await.json();
    assert_eq!(owners.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn deleting_owner_unlinks_it_from_ships() {
    let app = app();
    let a = create_owner(&app, "A").await;
    let ship = create_ship(&app, "1234567", &[a]).await;

    send(&app, Method::DELETE, &format!("/owners/{a}"), None).await;

    let details = send(&app, Method::GET, &format!("/ships/{ship}"), None).await;
    assert_eq!(details.status, StatusCode::OK);
    assert_eq!(details.json()["owners"], json!([]));
}

#[tokio::test]
async fn link_management_routes() {
    let app = app();
    let a = create_owner(&app, "A").await;
    let b = create_owner(&app, "B").await;
    let ship = create_ship(&app, "1234567", &[a]).await;
    let link_uri = format!("/ships/{ship}/owners/{b}");

    let linked = send(&app, Method::PUT, &link_uri, None).await;
    assert_eq!(linked.status, StatusCode::NO_CONTENT);
    let relinked = send(&app, Method::PUT, &link_uri, None).await;
    assert_eq!(relinked.status, StatusCode::NO_CONTENT);

    let owners = send(&app, Method::GET, &format!("/ships/{ship}"), None).await.json();
    assert_eq!(owners["owners"].as_array().unwrap().len(), 2);

    let unlinked = send(&app, Method::DELETE, &link_uri, None).await;
    assert_eq!(unlinked.status, StatusCode::NO_CONTENT);
    let missing = send(&app, Method::DELETE, &link_uri, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let unknown_owner = send(&app, Method::PUT, &format!("/ships/{ship}/owners/999"), None).await;
    assert_eq!(unknown_owner.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown_owner.text(), "Owner with ID 999 not found.");
}

#[tokio::test]
async fn seeded_server_exposes_sample_fleet() {
    let app = app_with(ApiConfig {
        seed_sample_data: true,
        ..ApiConfig::default()
    });

    let ships = send(&app, Method::GET, "/ships", None).await.json();
    assert_eq!(ships[0]["name"], "Ocean Explorer");
    assert_eq!(ships[0]["imoNumber"], "1234567");

    let id = ships[0]["id"].as_i64().unwrap();
    let details = send(&app, Method::GET, &format!("/ships/{id}"), None).await.json();
    assert_eq!(details["owners"][0]["name"], "Example Cruises");
}
