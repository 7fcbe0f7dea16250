use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use common::client::RawRow;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::domain::{ClientKey, NewClient};
use super::gateway::ClientGateway;
use crate::errors::ServiceError;

/// Key spellings a store may use for its client columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyCasing {
    /// `id`, `nome`, `idade`, `uf`
    #[default]
    Lower,
    /// `ID`, `Nome`, `Idade`, `UF`
    Upper,
    /// `Id`, `Nome`, `Idade`, `UF`
    Capitalized,
    /// `IdCliente`, `Nome`, `Idade`, `UF`
    Legacy,
}

impl KeyCasing {
    fn keys(self) -> [&'static str; 4] {
        match self {
            KeyCasing::Lower => ["id", "nome", "idade", "uf"],
            KeyCasing::Upper => ["ID", "Nome", "Idade", "UF"],
            KeyCasing::Capitalized => ["Id", "Nome", "Idade", "UF"],
            KeyCasing::Legacy => ["IdCliente", "Nome", "Idade", "UF"],
        }
    }
}

#[derive(Default)]
struct Table {
    rows: BTreeMap<ClientKey, NewClient>,
    last_id: ClientKey,
}

/// Process-local gateway. Rows live in an ordered map and are rendered with
/// the configured key casing, which makes it handy both for local runs and
/// for exercising the normalization contract.
#[derive(Default)]
pub struct InMemoryClientGateway {
    table: RwLock<Table>,
    casing: KeyCasing,
    offline: AtomicBool,
}

impl InMemoryClientGateway {
    pub fn new() -> Self { Self::default() }

    pub fn with_casing(casing: KeyCasing) -> Self {
        Self { casing, ..Self::default() }
    }

    /// Simulate the store going away (or coming back).
    pub fn set_online(&self, online: bool) {
        self.offline.store(!online, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), ServiceError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ServiceError::StoreUnavailable("in-memory store is offline".into()));
        }
        Ok(())
    }

    fn render(&self, id: ClientKey, client: &NewClient) -> RawRow {
        let [id_key, nome_key, idade_key, uf_key] = self.casing.keys();
        let mut row = Map::new();
        row.insert(id_key.into(), Value::from(id));
        row.insert(nome_key.into(), Value::from(client.nome.clone()));
        row.insert(idade_key.into(), Value::from(client.idade));
        row.insert(uf_key.into(), Value::from(client.uf.clone()));
        Value::Object(row)
    }
}

#[async_trait]
impl ClientGateway for InMemoryClientGateway {
    async fn list_all(&self) -> Result<Vec<RawRow>, ServiceError> {
        self.ensure_online()?;
        let table = self.table.read().await;
        Ok(table.rows.iter().map(|(id, c)| self.render(*id, c)).collect())
    }

    async fn get_by_id(&self, id: ClientKey) -> Result<Option<RawRow>, ServiceError> {
        self.ensure_online()?;
        let table = self.table.read().await;
        Ok(table.rows.get(&id).map(|c| self.render(id, c)))
    }

    async fn insert(&self, client: &NewClient) -> Result<RawRow, ServiceError> {
        self.ensure_online()?;
        let mut table = self.table.write().await;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| ServiceError::ConstraintViolation("client id space exhausted".into()))?;
        table.last_id = id;
        table.rows.insert(id, client.clone());
        Ok(self.render(id, client))
    }

    async fn update(&self, client: &NewClient, id: ClientKey) -> Result<u64, ServiceError> {
        self.ensure_online()?;
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(existing) => {
                *existing = client.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: ClientKey) -> Result<u64, ServiceError> {
        self.ensure_online()?;
        let mut table = self.table.write().await;
        Ok(u64::from(table.rows.remove(&id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> NewClient {
        NewClient { nome: "Ana".into(), idade: 30, uf: "SP".into() }
    }

    #[tokio::test]
    async fn renders_rows_in_configured_casing() {
        let gw = InMemoryClientGateway::with_casing(KeyCasing::Legacy);
        let row = gw.insert(&ana()).await.unwrap();
        assert_eq!(row["IdCliente"], 1);
        assert_eq!(row["Nome"], "Ana");
        assert!(row.get("id").is_none());
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let gw = InMemoryClientGateway::new();
        gw.insert(&ana()).await.unwrap();
        gw.delete_by_id(1).await.unwrap();
        let row = gw.insert(&ana()).await.unwrap();
        assert_eq!(row["id"], 2);
    }

    #[tokio::test]
    async fn offline_store_is_unavailable() {
        let gw = InMemoryClientGateway::new();
        gw.set_online(false);
        assert!(matches!(gw.list_all().await, Err(ServiceError::StoreUnavailable(_))));
        assert!(matches!(gw.insert(&ana()).await, Err(ServiceError::StoreUnavailable(_))));
        gw.set_online(true);
        assert!(gw.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_targets_touch_zero_rows() {
        let gw = InMemoryClientGateway::new();
        assert_eq!(gw.update(&ana(), 9).await.unwrap(), 0);
        assert_eq!(gw.delete_by_id(9).await.unwrap(), 0);
    }
}
