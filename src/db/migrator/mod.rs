use sea_orm_migration::MigrationStatus;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseConnection;
use tracing::info;

mod m20240101_initial;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_initial::Migration)]
    }
}

/// A migration as reported by [`status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Applies every pending migration.
pub async fn apply(conn: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(conn, None).await?;
    info!("Schema migrations applied");
    Ok(())
}

/// Reverts every applied migration, newest first.
pub async fn revert(conn: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::down(conn, None).await?;
    info!("Schema migrations reverted");
    Ok(())
}

pub async fn status(conn: &DatabaseConnection) -> Result<Vec<MigrationState>, DbErr> {
    let migrations = Migrator::get_migration_with_status(conn).await?;

    Ok(migrations
        .iter()
        .map(|m| MigrationState {
            name: m.name().to_string(),
            applied: matches!(m.status(), MigrationStatus::Applied),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::{Database, EntityTrait, PaginatorTrait};

    use crate::entities::prelude::*;

    async fn temp_db() -> DatabaseConnection {
        let path =
            std::env::temp_dir().join(format!("authbase-migrator-{}.db", uuid::Uuid::new_v4()));
        Database::connect(format!("sqlite:{}?mode=rwc", path.display()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn status_tracks_apply_and_revert() {
        let conn = temp_db().await;

        let before = status(&conn).await.unwrap();
        assert_eq!(before.len(), 1);
        assert!(!before[0].applied);

        apply(&conn).await.unwrap();
        let after = status(&conn).await.unwrap();
        assert!(after[0].applied);
        assert_eq!(after[0].name, "m20240101_initial");

        revert(&conn).await.unwrap();
        assert!(!status(&conn).await.unwrap()[0].applied);
    }

    #[tokio::test]
    async fn relinking_admin_permissions_is_a_no_op() {
        let conn = temp_db().await;
        apply(&conn).await.unwrap();

        let manager = SchemaManager::new(&conn);
        m20240101_initial::link_admin_permissions(&manager)
            .await
            .unwrap();
        m20240101_initial::link_admin_permissions(&manager)
            .await
            .unwrap();

        assert_eq!(RolePermission::find().count(&conn).await.unwrap(), 10);
    }
}
