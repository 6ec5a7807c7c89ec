use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::entities::institutional_info;

/// The portal keeps a single institutional profile row.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct InstitutionalInfo {
    pub id: Uuid,
    pub name: String,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub history: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "Date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
pub struct UpsertInstitutionalInfo {
    pub name: String,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub history: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl InstitutionalInfo {
    fn from_model(model: institutional_info::Model) -> Self {
        Self {
            id: model.uuid,
            name: model.name,
            mission: model.mission,
            vision: model.vision,
            history: model.history,
            address: model.address,
            phone: model.phone,
            email: model.email,
            website: model.website,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }

    pub async fn get<C: ConnectionTrait>(db: &C) -> Result<Option<Self>, DbErr> {
        let record = institutional_info::Entity::find()
            .order_by_asc(institutional_info::Column::Id)
            .one(db)
            .await?;
        Ok(record.map(Self::from_model))
    }

    pub async fn upsert<C: ConnectionTrait>(
        db: &C,
        data: &UpsertInstitutionalInfo,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        let existing = institutional_info::Entity::find()
            .order_by_asc(institutional_info::Column::Id)
            .one(db)
            .await?;

        let model = match existing {
            Some(record) => {
                let mut active: institutional_info::ActiveModel = record.into();
                apply_upsert(&mut active, data, now);
                active.update(db).await?
            }
            None => {
                let mut active = institutional_info::ActiveModel {
                    uuid: Set(Uuid::new_v4()),
                    created_at: Set(now.into()),
                    ..Default::default()
                };
                apply_upsert(&mut active, data, now);
                active.insert(db).await?
            }
        };
        Ok(Self::from_model(model))
    }
}

fn apply_upsert(
    active: &mut institutional_info::ActiveModel,
    data: &UpsertInstitutionalInfo,
    now: DateTime<Utc>,
) {
    active.name = Set(data.name.clone());
    active.mission = Set(data.mission.clone());
    active.vision = Set(data.vision.clone());
    active.history = Set(data.history.clone());
    active.address = Set(data.address.clone());
    active.phone = Set(data.phone.clone());
    active.email = Set(data.email.clone());
    active.website = Set(data.website.clone());
    active.updated_at = Set(now.into());
}
