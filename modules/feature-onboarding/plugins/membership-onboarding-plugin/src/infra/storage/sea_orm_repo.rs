use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::repo::{MembershipSeedRepository, NewSeedRecord, SeedCategory};

use super::entity::{discipleship_pathway, membership_stage, membership_type};

pub struct SeaOrmMembershipSeedRepository {
    db: DatabaseConnection,
}

impl SeaOrmMembershipSeedRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// The catalog tables share one column layout, so lookup and insert are the
// same statement against a different entity module.
macro_rules! find_live_id {
    ($entity:ident, $db:expr, $tenant_id:expr, $code:expr) => {
        $entity::Entity::find()
            .filter($entity::Column::TenantId.eq($tenant_id))
            .filter($entity::Column::Code.eq($code))
            .filter($entity::Column::DeletedAt.is_null())
            .one($db)
            .await?
            .map(|m| m.id)
    };
}

macro_rules! insert_record {
    ($entity:ident, $db:expr, $id:expr, $record:expr) => {{
        let now = Utc::now();
        let active_model = $entity::ActiveModel {
            id: ActiveValue::Set($id),
            tenant_id: ActiveValue::Set($record.tenant_id),
            code: ActiveValue::Set($record.code.clone()),
            name: ActiveValue::Set($record.name.clone()),
            description: ActiveValue::Set($record.description.clone()),
            sort_order: ActiveValue::Set($record.sort_order),
            is_system: ActiveValue::Set($record.is_system),
            is_active: ActiveValue::Set($record.is_active),
            created_by: ActiveValue::Set($record.actor_id),
            updated_by: ActiveValue::Set($record.actor_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        };
        $entity::Entity::insert(active_model).exec($db).await?;
    }};
}

#[async_trait]
impl MembershipSeedRepository for SeaOrmMembershipSeedRepository {
    async fn find_by_code(
        &self,
        tenant_id: Uuid,
        category: SeedCategory,
        code: &str,
    ) -> anyhow::Result<Option<Uuid>> {
        let id = match category {
            SeedCategory::MembershipType => {
                find_live_id!(membership_type, &self.db, tenant_id, code)
            }
            SeedCategory::MembershipStage => {
                find_live_id!(membership_stage, &self.db, tenant_id, code)
            }
            SeedCategory::DiscipleshipPathway => {
                find_live_id!(discipleship_pathway, &self.db, tenant_id, code)
            }
        };
        Ok(id)
    }

    async fn insert(&self, record: &NewSeedRecord) -> anyhow::Result<Uuid> {
        let id = Uuid::new_v4();
        match record.category {
            SeedCategory::MembershipType => insert_record!(membership_type, &self.db, id, record),
            SeedCategory::MembershipStage => insert_record!(membership_stage, &self.db, id, record),
            SeedCategory::DiscipleshipPathway => {
                insert_record!(discipleship_pathway, &self.db, id, record);
            }
        }
        Ok(id)
    }
}
