pub mod db;
pub mod cliente;

#[cfg(test)]
mod tests {
    use migration::MigratorTrait;
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};

    use crate::{cliente, db};

    #[tokio::test]
    async fn cliente_rows_round_trip_through_json() -> anyhow::Result<()> {
        let db = db::connect("sqlite::memory:").await?;
        migration::Migrator::up(&db, None).await?;

        let created = cliente::ActiveModel {
            nome: Set("Ana".into()),
            idade: Set(30),
            uf: Set("SP".into()),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        assert!(created.id > 0);

        // raw rows are keyed by column name
        let raw = cliente::Entity::find_by_id(created.id).into_json().one(&db).await?.unwrap();
        assert_eq!(raw["nome"], "Ana");
        assert_eq!(raw["idade"], 30);
        assert_eq!(raw["uf"], "SP");
        assert_eq!(raw["id"], created.id);

        cliente::Entity::delete_by_id(created.id).exec(&db).await?;
        assert!(cliente::Entity::find_by_id(created.id).one(&db).await?.is_none());
        Ok(())
    }
}
