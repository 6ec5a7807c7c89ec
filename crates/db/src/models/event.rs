use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

use crate::{
    entities::event,
    upload::{EVENT_IMAGE, UploadPathError},
};

#[derive(Debug, Error)]
pub enum EventError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Event not found")]
    EventNotFound,
    #[error(transparent)]
    InvalidImage(#[from] UploadPathError),
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub details: Option<String>,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    /// Stored path under `events/`, if an image was uploaded.
    pub image: Option<String>,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "Date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub details: Option<String>,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize, TS)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub details: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

fn default_active() -> bool {
    true
}

impl Event {
    fn from_model(model: event::Model) -> Self {
        Self {
            id: model.uuid,
            title: model.title,
            description: model.description,
            details: model.details,
            event_date: model.event_date,
            start_time: model.start_time,
            end_time: model.end_time,
            location: model.location,
            display_order: model.display_order,
            is_active: model.is_active,
            // Rows written by older tooling store "no image" as an empty string.
            image: model.image.filter(|path| !path.is_empty()),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }

    async fn find_model<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<event::Model, EventError> {
        event::Entity::find()
            .filter(event::Column::Uuid.eq(id))
            .one(db)
            .await?
            .ok_or(EventError::EventNotFound)
    }

    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<i64, DbErr> {
        let count = event::Entity::find().count(db).await?;
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Self>, DbErr> {
        let records = event::Entity::find()
            .order_by_asc(event::Column::DisplayOrder)
            .order_by_asc(event::Column::EventDate)
            .order_by_asc(event::Column::StartTime)
            .all(db)
            .await?;
        Ok(records.into_iter().map(Self::from_model).collect())
    }

    pub async fn find_active<C: ConnectionTrait>(db: &C) -> Result<Vec<Self>, DbErr> {
        let records = event::Entity::find()
            .filter(event::Column::IsActive.eq(true))
            .order_by_asc(event::Column::DisplayOrder)
            .order_by_asc(event::Column::EventDate)
            .order_by_asc(event::Column::StartTime)
            .all(db)
            .await?;
        Ok(records.into_iter().map(Self::from_model).collect())
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Self>, DbErr> {
        let record = event::Entity::find()
            .filter(event::Column::Uuid.eq(id))
            .one(db)
            .await?;
        Ok(record.map(Self::from_model))
    }

    /// New events start without an image.
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        data: &CreateEvent,
        event_id: Uuid,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        let active = event::ActiveModel {
            uuid: Set(event_id),
            title: Set(data.title.clone()),
            description: Set(data.description.clone()),
            details: Set(data.details.clone()),
            event_date: Set(data.event_date),
            start_time: Set(data.start_time),
            end_time: Set(data.end_time),
            location: Set(data.location.clone()),
            display_order: Set(data.display_order),
            is_active: Set(data.is_active),
            image: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let model = active.insert(db).await?;
        tracing::debug!(event_id = %event_id, "Created event");
        Ok(Self::from_model(model))
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        payload: &UpdateEvent,
    ) -> Result<Self, EventError> {
        let record = Self::find_model(db, id).await?;

        let mut active: event::ActiveModel = record.into();
        if let Some(title) = payload.title.clone() {
            active.title = Set(title);
        }
        if let Some(description) = payload.description.clone() {
            active.description = Set(description);
        }
        if payload.details.is_some() {
            active.details = Set(payload.details.clone());
        }
        if let Some(event_date) = payload.event_date {
            active.event_date = Set(event_date);
        }
        if let Some(start_time) = payload.start_time {
            active.start_time = Set(start_time);
        }
        if let Some(end_time) = payload.end_time {
            active.end_time = Set(end_time);
        }
        if payload.location.is_some() {
            active.location = Set(payload.location.clone());
        }
        if let Some(display_order) = payload.display_order {
            active.display_order = Set(display_order);
        }
        if let Some(is_active) = payload.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(db).await?;
        Ok(Self::from_model(updated))
    }

    /// Point the event at an uploaded image, or detach it with `None`.
    ///
    /// `filename` is the name the file was uploaded under; the stored value is
    /// the path resolved for it under `events/`.
    pub async fn set_image<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        filename: Option<&str>,
    ) -> Result<Self, EventError> {
        let image = filename
            .map(|name| EVENT_IMAGE.generate_path(name))
            .transpose()?;
        let record = Self::find_model(db, id).await?;

        let mut active: event::ActiveModel = record.into();
        active.image = Set(image.clone());
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(db).await?;

        match &image {
            Some(path) => tracing::info!(event_id = %id, image = %path, "Attached event image"),
            None => tracing::info!(event_id = %id, "Cleared event image"),
        }
        Ok(Self::from_model(updated))
    }

    pub async fn clear_image<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Self, EventError> {
        Self::set_image(db, id, None).await
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
        let result = event::Entity::delete_many()
            .filter(event::Column::Uuid.eq(id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
