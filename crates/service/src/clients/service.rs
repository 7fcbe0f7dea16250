use std::sync::Arc;

use common::client::{
    normalize_rows, normalize_single, Client, ClientId, ClientInput, DeleteOutcome, UpdateOutcome,
};
use tracing::{debug, info, instrument};

use super::domain::{ClientKey, NewClient};
use super::gateway::ClientGateway;
use crate::errors::ServiceError;

/// Client registry use cases over a [`ClientGateway`].
///
/// Stateless: every call is one gateway round trip and nothing is cached
/// between calls. Every row leaving this service is normalized.
#[derive(Clone)]
pub struct ClientRegistryService {
    gateway: Arc<dyn ClientGateway>,
    strict_missing_targets: bool,
}

impl ClientRegistryService {
    pub fn new(gateway: Arc<dyn ClientGateway>) -> Self {
        Self { gateway, strict_missing_targets: false }
    }

    /// When set, update/delete against an unknown id fail with
    /// [`ServiceError::NotFound`] instead of returning a zero-row outcome.
    pub fn with_strict_missing_targets(mut self, strict: bool) -> Self {
        self.strict_missing_targets = strict;
        self
    }

    pub async fn list(&self) -> Result<Vec<Client>, ServiceError> {
        let rows = self.gateway.list_all().await?;
        debug!(count = rows.len(), "listed client rows");
        Ok(normalize_rows(&rows))
    }

    /// `Ok(None)` when no record has this id.
    pub async fn get(&self, id: ClientKey) -> Result<Option<Client>, ServiceError> {
        let row = self.gateway.get_by_id(id).await?;
        Ok(row.as_ref().and_then(normalize_single))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &ClientInput) -> Result<Client, ServiceError> {
        let new = NewClient::validate(input)?;
        let row = self.gateway.insert(&new).await?;
        let client = normalize_single(&row)
            .ok_or_else(|| ServiceError::StoreUnavailable("store returned no row for insert".into()))?;
        info!(id = ?client.id, "created client");
        Ok(client)
    }

    /// Replaces all three fields of the record. The returned client is built
    /// from the validated input, so no second round trip is needed.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: ClientKey, input: &ClientInput) -> Result<UpdateOutcome, ServiceError> {
        let new = NewClient::validate(input)?;
        let affected_rows = self.gateway.update(&new, id).await?;
        if affected_rows == 0 {
            if self.strict_missing_targets {
                return Err(ServiceError::not_found(&format!("client {id}")));
            }
            info!(id, "update matched no client");
            return Ok(UpdateOutcome { id: ClientId::from(id), affected_rows, client: None });
        }
        info!(id, affected_rows, "updated client");
        let client = Client {
            id: Some(ClientId::from(id)),
            nome: Some(new.nome),
            idade: Some(i64::from(new.idade)),
            uf: Some(new.uf),
        };
        Ok(UpdateOutcome { id: ClientId::from(id), affected_rows, client: Some(client) })
    }

    /// Deleting an unknown id is a no-op unless strict mode is on, which also
    /// makes a repeated delete of the same id fail.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ClientKey) -> Result<DeleteOutcome, ServiceError> {
        let affected_rows = self.gateway.delete_by_id(id).await?;
        if affected_rows == 0 && self.strict_missing_targets {
            return Err(ServiceError::not_found(&format!("client {id}")));
        }
        info!(id, affected_rows, "delete client");
        Ok(DeleteOutcome { id: ClientId::from(id), affected_rows, removed: affected_rows > 0 })
    }
}
