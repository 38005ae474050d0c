//! HTTP client for a remote weapons service
//!
//! Speaks JSON to `{base_url}/weapons`. Every request is bounded by a
//! connect timeout and an overall request timeout; hitting either one is
//! reported as [`BackendError::Unavailable`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use uuid::Uuid;

use crate::backend::WeaponBackend;
use crate::error::BackendError;
use crate::models::{Page, QueryShape, Weapon, WeaponInput, WeaponPatch};

#[derive(Debug, Clone)]
pub struct HttpWeaponBackend {
    client: Client,
    base_url: String,
}

impl HttpWeaponBackend {
    pub fn new(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/weapons", self.base_url)
    }

    fn weapon_url(&self, id: Uuid) -> String {
        format!("{}/weapons/{}", self.base_url, id)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        request.send().await.map_err(transport_error)
    }
}

#[async_trait]
impl WeaponBackend for HttpWeaponBackend {
    async fn get_by_id(&self, id: Uuid) -> Result<Weapon, BackendError> {
        let response = self.send(self.client.get(self.weapon_url(id))).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(BackendError::NotFound(id)),
            _ => decode(response).await,
        }
    }

    async fn list(&self, query: &QueryShape) -> Result<Page<Weapon>, BackendError> {
        let mut params: Vec<(String, String)> = vec![
            ("page".to_string(), query.page.to_string()),
            ("pageSize".to_string(), query.size.to_string()),
            ("sort".to_string(), query.sort.field.clone()),
            ("direction".to_string(), query.sort.direction.as_str().to_lowercase()),
        ];
        params.extend(query.filters.iter().map(|(k, v)| (k.clone(), v.clone())));

        let response = self
            .send(self.client.get(self.collection_url()).query(&params))
            .await?;
        decode(response).await
    }

    async fn create(&self, input: &WeaponInput) -> Result<Weapon, BackendError> {
        let response = self
            .send(self.client.post(self.collection_url()).json(input))
            .await?;
        match response.status() {
            StatusCode::CONFLICT => Err(BackendError::AlreadyExists(input.name.trim().to_string())),
            _ => decode(response).await,
        }
    }

    async fn replace(&self, id: Uuid, input: &WeaponInput) -> Result<Weapon, BackendError> {
        let response = self
            .send(self.client.put(self.weapon_url(id)).json(input))
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(BackendError::NotFound(id)),
            StatusCode::CONFLICT => Err(BackendError::AlreadyExists(input.name.trim().to_string())),
            _ => decode(response).await,
        }
    }

    async fn update(&self, id: Uuid, patch: &WeaponPatch) -> Result<Weapon, BackendError> {
        let response = self
            .send(self.client.patch(self.weapon_url(id)).json(patch))
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(BackendError::NotFound(id)),
            StatusCode::CONFLICT => {
                let detail = match &patch.name {
                    Some(name) => name.trim().to_string(),
                    None => conflict_detail(response, id).await,
                };
                Err(BackendError::AlreadyExists(detail))
            }
            _ => decode(response).await,
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, BackendError> {
        let response = self.send(self.client.delete(self.weapon_url(id))).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if status.is_success() {
            return Ok(true);
        }
        Err(status_error(response).await)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Maps a reqwest failure onto the backend contract. Only connection
/// failures and timeouts mean the service is unavailable; a request that
/// could not be built or was cut off mid-exchange is a fault.
fn transport_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() || err.is_connect() {
        error!(error = %err, "weapon service unreachable");
        BackendError::Unavailable(err.to_string())
    } else {
        error!(error = %err, "weapon service request failed");
        BackendError::Fault(err.to_string())
    }
}

/// Decodes a success body, or turns a non-success status into an error.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }
    response.json::<T>().await.map_err(|err| {
        if err.is_timeout() {
            BackendError::Unavailable(err.to_string())
        } else {
            BackendError::Fault(format!("invalid response body: {}", err))
        }
    })
}

/// Detail for a 409 on a request that named no weapon: the service's own
/// message, or the id when the body is empty.
async fn conflict_detail(response: Response, id: Uuid) -> String {
    let body = response.text().await.unwrap_or_default();
    match body.trim() {
        "" => id.to_string(),
        detail => detail.to_string(),
    }
}

async fn status_error(response: Response) -> BackendError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    debug!(%status, body = %body, "weapon service returned an error status");

    let detail = if body.is_empty() {
        status.to_string()
    } else {
        body
    };
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => BackendError::Rejected(detail),
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            BackendError::Unavailable(detail)
        }
        _ => BackendError::Fault(format!("{}: {}", status, detail)),
    }
}
