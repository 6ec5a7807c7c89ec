use db_migration::{Migrator, event_image};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::{MigratorTrait, SchemaManager};

pub use sea_orm::DbErr;

mod config;
pub mod entities;
pub mod models;
pub mod upload;

pub use config::{
    AUTO_MIGRATE_ENV, DATABASE_URL_ENV, DEFAULT_DATABASE_URL, DbConfig,
    FALLBACK_DATABASE_URL_ENV, MAX_CONNECTIONS_ENV,
};

#[derive(Clone)]
pub struct DBService {
    pub conn: DatabaseConnection,
}

async fn event_image_column_exists(conn: &DatabaseConnection) -> Result<bool, DbErr> {
    SchemaManager::new(conn)
        .has_column(event_image::TABLE, event_image::COLUMN)
        .await
}

async fn warn_if_missing_event_image_column(conn: &DatabaseConnection) {
    match event_image_column_exists(conn).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(
                "Missing {}.{} column; event images cannot be stored until pending migrations are applied.",
                event_image::TABLE,
                event_image::COLUMN
            );
        }
        Err(err) => {
            tracing::warn!("Failed to verify event image column: {}", err);
        }
    }
}

impl DBService {
    pub async fn new() -> Result<DBService, DbErr> {
        Self::connect(&DbConfig::from_env()).await
    }

    pub async fn connect(config: &DbConfig) -> Result<DBService, DbErr> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(config.max_connections)
            .sqlx_logging(false);
        let conn = Database::connect(options).await?;

        if config.auto_migrate {
            let pending = Migrator::get_pending_migrations(&conn).await?;
            if !pending.is_empty() {
                tracing::info!(pending = pending.len(), "Applying database migrations");
            }
            Migrator::up(&conn, None).await?;
        }

        warn_if_missing_event_image_column(&conn).await;
        Ok(DBService { conn })
    }

    pub async fn applied_migrations(&self) -> Result<Vec<String>, DbErr> {
        let applied = Migrator::get_applied_migrations(&self.conn).await?;
        Ok(applied
            .iter()
            .map(|migration| migration.name().to_string())
            .collect())
    }

    pub async fn pending_migrations(&self) -> Result<Vec<String>, DbErr> {
        let pending = Migrator::get_pending_migrations(&self.conn).await?;
        Ok(pending
            .iter()
            .map(|migration| migration.name().to_string())
            .collect())
    }

    pub async fn has_event_image_column(&self) -> Result<bool, DbErr> {
        event_image_column_exists(&self.conn).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, Utc};
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};
    use uuid::Uuid;

    use super::*;
    use crate::{entities::event, models::event::Event};

    fn file_config(dir: &tempfile::TempDir, auto_migrate: bool) -> DbConfig {
        DbConfig {
            database_url: format!(
                "sqlite://{}?mode=rwc",
                dir.path().join("portal.sqlite").to_string_lossy()
            ),
            max_connections: 2,
            auto_migrate,
        }
    }

    /// Inserts through the pre-image schema, so `image` must stay unset.
    async fn insert_legacy_event(db: &DatabaseConnection, title: &str, display_order: i32) -> Uuid {
        let uuid = Uuid::new_v4();
        let now = Utc::now();
        let active = event::ActiveModel {
            uuid: Set(uuid),
            title: Set(title.to_string()),
            description: Set(format!("{title} description")),
            details: Set(Some("Bring student ID".to_string())),
            event_date: Set(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
            start_time: Set(NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
            end_time: Set(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
            location: Set(Some("Library".to_string())),
            display_order: Set(display_order),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };
        event::Entity::insert(active)
            .exec_without_returning(db)
            .await
            .unwrap();
        uuid
    }

    #[tokio::test]
    async fn image_migration_preserves_existing_events() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, Some(2)).await.unwrap();
        assert!(!event_image_column_exists(&db).await.unwrap());

        let orientation = insert_legacy_event(&db, "Orientation", 1).await;
        let graduation = insert_legacy_event(&db, "Graduation", 2).await;

        Migrator::up(&db, None).await.unwrap();
        assert!(event_image_column_exists(&db).await.unwrap());

        let events = Event::find_all(&db).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, orientation);
        assert_eq!(events[1].id, graduation);
        for event in &events {
            assert_eq!(event.image, None);
            assert_eq!(event.details.as_deref(), Some("Bring student ID"));
            assert_eq!(event.location.as_deref(), Some("Library"));
            assert_eq!(event.description, format!("{} description", event.title));
            assert!(event.is_active);
        }

        let with_image = Event::set_image(&db, orientation, Some("welcome.jpg"))
            .await
            .unwrap();
        assert_eq!(with_image.image.as_deref(), Some("events/welcome.jpg"));
        assert_eq!(
            Event::find_by_id(&db, graduation)
                .await
                .unwrap()
                .expect("event")
                .image,
            None
        );
    }

    #[tokio::test]
    async fn empty_image_string_reads_as_absent() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let id = insert_legacy_event(&db, "Career Fair", 0).await;

        let record = event::Entity::find()
            .one(&db)
            .await
            .unwrap()
            .expect("event row");
        let mut active: event::ActiveModel = record.into();
        active.image = Set(Some(String::new()));
        active.update(&db).await.unwrap();

        let event = Event::find_by_id(&db, id).await.unwrap().expect("event");
        assert_eq!(event.image, None);
    }

    #[tokio::test]
    async fn connect_applies_pending_migrations() {
        let dir = tempfile::tempdir().unwrap();
        let service = DBService::connect(&file_config(&dir, true)).await.unwrap();

        assert!(service.has_event_image_column().await.unwrap());
        assert!(service.pending_migrations().await.unwrap().is_empty());
        assert_eq!(
            service.applied_migrations().await.unwrap(),
            vec![
                "m20250101000000_baseline".to_string(),
                "m20250301000000_institutional_info".to_string(),
                "m20250315000000_event_image".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn connect_without_auto_migrate_leaves_schema_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let service = DBService::connect(&file_config(&dir, false)).await.unwrap();

        assert!(!service.has_event_image_column().await.unwrap());
        assert_eq!(service.pending_migrations().await.unwrap().len(), 3);

        drop(service);
        let service = DBService::connect(&file_config(&dir, true)).await.unwrap();
        assert!(service.has_event_image_column().await.unwrap());
    }
}
