use tokio::net::TcpListener;
use vessel_api::{ApiConfig, VesselServer};
use vessel_client::{ClientError, VesselClient};
use vessel_core::dto::{CreateOwnerRequest, CreateShipRequest, UpdateShipRequest};

async fn spawn_server() -> VesselClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = VesselServer::new(ApiConfig::default()).unwrap();
    tokio::spawn(server.serve_on(listener));
    VesselClient::new(format!("http://{addr}"))
}

fn ship_request(imo: &str, owner_ids: Vec<i64>) -> CreateShipRequest {
    CreateShipRequest {
        name: "X".to_string(),
        imo_number: imo.to_string(),
        ship_type: "Cargo".to_string(),
        tonnage: 100.0,
        owner_ids,
    }
}

fn api_message(err: ClientError) -> (u16, String) {
    match err {
        ClientError::Api { status, message } => (status, message),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn client_drives_full_registry_lifecycle() {
    let client = spawn_server().await;

    let owner = client
        .create_owner(&CreateOwnerRequest::new("Example Cruises"))
        .await
        .unwrap();
    assert_eq!(client.get_owner(owner.id).await.unwrap(), Some(owner.clone()));
    assert_eq!(client.get_owner(owner.id + 100).await.unwrap(), None);

    let created = client
        .create_ship(&ship_request("1234567", vec![owner.id]))
        .await
        .unwrap();
    assert_eq!(created.owners, vec![owner.clone()]);

    let duplicate = client
        .create_ship(&ship_request("1234567", vec![owner.id]))
        .await
        .unwrap_err();
    assert_eq!(
        api_message(duplicate),
        (400, "Ship with IMO Number 1234567 already exists.".to_string())
    );

    client
        .update_ship(
            created.id,
            &UpdateShipRequest {
                name: "Renamed".to_string(),
                imo_number: "1234567".to_string(),
                ship_type: "Tanker".to_string(),
                tonnage: 200.0,
            },
        )
        .await
        .unwrap();
    let details = client.get_ship_details(created.id).await.unwrap().unwrap();
    assert_eq!(details.name, "Renamed");
    assert_eq!(details.owners.len(), 1);

    let second = client
        .create_owner(&CreateOwnerRequest::new("Maritime Inc."))
        .await
        .unwrap();
    client.link_owner(created.id, second.id).await.unwrap();
    client.unlink_owner(created.id, owner.id).await.unwrap();
    let details = client.get_ship_details(created.id).await.unwrap().unwrap();
    assert_eq!(details.owners, vec![second.clone()]);

    client.delete_owner(second.id).await.unwrap();
    let (status, message) = api_message(client.delete_owner(second.id).await.unwrap_err());
    assert_eq!(status, 404);
    assert_eq!(message, format!("Owner with ID {} not found.", second.id));

    client.delete_ship(created.id).await.unwrap();
    assert!(client.list_ships().await.unwrap().is_empty());
    assert_eq!(client.get_ship_details(created.id).await.unwrap(), None);
    assert_eq!(client.list_owners().await.unwrap(), vec![owner]);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = VesselClient::new(format!("http://{addr}"));
    let err = client.list_owners().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
