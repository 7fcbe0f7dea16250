//! Persistence gateway for client rows.
//!
//! The gateway hands back raw rows (JSON objects keyed by whatever the store
//! calls its columns) and row counts. It never normalizes, filters or
//! paginates; that is the registry service's job.

use async_trait::async_trait;
use common::client::RawRow;
use models::cliente;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::domain::{ClientKey, NewClient};
use crate::errors::ServiceError;

/// Raw CRUD against durable client storage.
///
/// `update` and `delete_by_id` report how many rows they touched; zero is a
/// valid answer, not an error.
#[async_trait]
pub trait ClientGateway: Send + Sync {
    async fn list_all(&self) -> Result<Vec<RawRow>, ServiceError>;
    async fn get_by_id(&self, id: ClientKey) -> Result<Option<RawRow>, ServiceError>;
    async fn insert(&self, client: &NewClient) -> Result<RawRow, ServiceError>;
    async fn update(&self, client: &NewClient, id: ClientKey) -> Result<u64, ServiceError>;
    async fn delete_by_id(&self, id: ClientKey) -> Result<u64, ServiceError>;
}

/// SeaORM-backed gateway over the `clientes` table.
#[derive(Clone)]
pub struct SeaOrmClientGateway {
    pub db: DatabaseConnection,
}

impl SeaOrmClientGateway {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ClientGateway for SeaOrmClientGateway {
    async fn list_all(&self) -> Result<Vec<RawRow>, ServiceError> {
        cliente::Entity::find()
            .order_by_asc(cliente::Column::Id)
            .into_json()
            .all(&self.db)
            .await
            .map_err(ServiceError::from_read_err)
    }

    async fn get_by_id(&self, id: ClientKey) -> Result<Option<RawRow>, ServiceError> {
        cliente::Entity::find_by_id(id)
            .into_json()
            .one(&self.db)
            .await
            .map_err(ServiceError::from_read_err)
    }

    async fn insert(&self, client: &NewClient) -> Result<RawRow, ServiceError> {
        let am = cliente::ActiveModel {
            id: NotSet,
            nome: Set(client.nome.clone()),
            idade: Set(client.idade),
            uf: Set(client.uf.clone()),
        };
        let created = am.insert(&self.db).await.map_err(ServiceError::from_write_err)?;
        debug!(id = created.id, "inserted client row");
        serde_json::to_value(created).map_err(|e| ServiceError::StoreUnavailable(e.to_string()))
    }

    async fn update(&self, client: &NewClient, id: ClientKey) -> Result<u64, ServiceError> {
        let res = cliente::Entity::update_many()
            .col_expr(cliente::Column::Nome, Expr::value(client.nome.clone()))
            .col_expr(cliente::Column::Idade, Expr::value(client.idade))
            .col_expr(cliente::Column::Uf, Expr::value(client.uf.clone()))
            .filter(cliente::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(ServiceError::from_write_err)?;
        debug!(id, rows_affected = res.rows_affected, "updated client row");
        Ok(res.rows_affected)
    }

    async fn delete_by_id(&self, id: ClientKey) -> Result<u64, ServiceError> {
        let res = cliente::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(ServiceError::from_write_err)?;
        debug!(id, rows_affected = res.rows_affected, "deleted client row");
        Ok(res.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn ana() -> NewClient {
        NewClient { nome: "Ana".into(), idade: 30, uf: "SP".into() }
    }

    #[tokio::test]
    async fn seaorm_gateway_crud() -> Result<(), anyhow::Error> {
        let gw = SeaOrmClientGateway::new(get_db().await?);

        let row = gw.insert(&ana()).await?;
        let id = row["id"].as_i64().unwrap() as ClientKey;
        assert_eq!(row["nome"], "Ana");

        let found = gw.get_by_id(id).await?.unwrap();
        assert_eq!(found["idade"], 30);

        let bia = NewClient { nome: "Bia".into(), idade: 25, uf: "RJ".into() };
        assert_eq!(gw.update(&bia, id).await?, 1);
        assert_eq!(gw.get_by_id(id).await?.unwrap()["uf"], "RJ");

        assert_eq!(gw.list_all().await?.len(), 1);

        assert_eq!(gw.delete_by_id(id).await?, 1);
        assert!(gw.get_by_id(id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn missing_targets_touch_zero_rows() -> Result<(), anyhow::Error> {
        let gw = SeaOrmClientGateway::new(get_db().await?);
        assert_eq!(gw.update(&ana(), 4242).await?, 0);
        assert_eq!(gw.delete_by_id(4242).await?, 0);
        assert!(gw.get_by_id(4242).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() -> Result<(), anyhow::Error> {
        let gw = SeaOrmClientGateway::new(get_db().await?);
        for name in ["Caio", "Duda", "Enzo"] {
            gw.insert(&NewClient { nome: name.into(), idade: 20, uf: "MG".into() }).await?;
        }
        let ids: Vec<i64> = gw.list_all().await?.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 3);
        Ok(())
    }
}
