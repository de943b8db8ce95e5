//! Async HTTP client for the vessel registry server.
//!
//! # Invariants
//! - Non-2xx responses surface as `ClientError::Api` carrying the server's
//!   plain-text message unchanged.
//! - Lookups of a single resource map 404 to `Ok(None)`.

use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use vessel_core::dto::{
    CreateOwnerRequest, CreateShipRequest, OwnerDto, ShipDetailsDto, ShipDto, UpdateShipRequest,
};
use vessel_core::{OwnerId, ShipId};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5080";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// HTTP status of an API rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|status| status.as_u16()),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Registry API client bound to one server.
#[derive(Debug, Clone)]
pub struct VesselClient {
    http: Client,
    base_url: String,
}

impl VesselClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_owners(&self) -> ClientResult<Vec<OwnerDto>> {
        self.fetch(self.request(Method::GET, "/owners")).await
    }

    pub async fn get_owner(&self, id: OwnerId) -> ClientResult<Option<OwnerDto>> {
        self.fetch_optional(self.request(Method::GET, &format!("/owners/{id}")))
            .await
    }

    pub async fn create_owner(&self, request: &CreateOwnerRequest) -> ClientResult<OwnerDto> {
        self.fetch(self.request(Method::POST, "/owners").json(request))
            .await
    }

    pub async fn delete_owner(&self, id: OwnerId) -> ClientResult<()> {
        self.execute(self.request(Method::DELETE, &format!("/owners/{id}")))
            .await
    }

    pub async fn list_ships(&self) -> ClientResult<Vec<ShipDto>> {
        self.fetch(self.request(Method::GET, "/ships")).await
    }

    pub async fn get_ship_details(&self, id: ShipId) -> ClientResult<Option<ShipDetailsDto>> {
        self.fetch_optional(self.request(Method::GET, &format!("/ships/{id}")))
            .await
    }

    pub async fn create_ship(&self, request: &CreateShipRequest) -> ClientResult<ShipDetailsDto> {
        self.fetch(self.request(Method::POST, "/ships").json(request))
            .await
    }

    pub async fn update_ship(&self, id: ShipId, request: &UpdateShipRequest) -> ClientResult<()> {
        self.execute(
            self.request(Method::PUT, &format!("/ships/{id}"))
                .json(request),
        )
        .await
    }

    pub async fn delete_ship(&self, id: ShipId) -> ClientResult<()> {
        self.execute(self.request(Method::DELETE, &format!("/ships/{id}")))
            .await
    }

    pub async fn link_owner(&self, ship_id: ShipId, owner_id: OwnerId) -> ClientResult<()> {
        self.execute(self.request(
            Method::PUT,
            &format!("/ships/{ship_id}/owners/{owner_id}"),
        ))
        .await
    }

    pub async fn unlink_owner(&self, ship_id: ShipId, owner_id: OwnerId) -> ClientResult<()> {
        self.execute(self.request(
            Method::DELETE,
            &format!("/ships/{ship_id}/owners/{owner_id}"),
        ))
        .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("event=client_request module=client method={method} path={path}");
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    async fn execute(&self, request: RequestBuilder) -> ClientResult<()> {
        ensure_success(request.send().await?).await?;
        Ok(())
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = ensure_success(request.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn fetch_optional<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ClientResult<Option<T>> {
        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response).await?;
        Ok(Some(response.json().await?))
    }
}

async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await?;
    debug!(
        "event=client_request module=client status=rejected http_status={}",
        status.as_u16()
    );
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
