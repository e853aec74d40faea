use std::fmt;

use async_trait::async_trait;
use uuid::Uuid;

/// Kind of membership record seeded by the plugin. Each maps to its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedCategory {
    MembershipType,
    MembershipStage,
    DiscipleshipPathway,
}

impl SeedCategory {
    /// Seeding order.
    pub const ALL: [Self; 3] = [
        Self::MembershipType,
        Self::MembershipStage,
        Self::DiscipleshipPathway,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MembershipType => "membership_types",
            Self::MembershipStage => "membership_stages",
            Self::DiscipleshipPathway => "discipleship_pathways",
        }
    }
}

impl fmt::Display for SeedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hard-coded default record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedDefinition {
    /// Natural key, unique among the live records of a tenant.
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub sort_order: i32,
}

/// A default record ready to be inserted for a tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSeedRecord {
    pub category: SeedCategory,
    pub tenant_id: Uuid,
    /// Stamped as both creator and last updater.
    pub actor_id: Uuid,
    pub code: String,
    pub name: String,
    pub description: String,
    pub sort_order: i32,
    pub is_system: bool,
    pub is_active: bool,
}

impl NewSeedRecord {
    /// System-owned, active record built from a default definition.
    #[must_use]
    pub fn from_definition(
        category: SeedCategory,
        tenant_id: Uuid,
        actor_id: Uuid,
        definition: &SeedDefinition,
    ) -> Self {
        Self {
            category,
            tenant_id,
            actor_id,
            code: definition.code.to_owned(),
            name: definition.name.to_owned(),
            description: definition.description.to_owned(),
            sort_order: definition.sort_order,
            is_system: true,
            is_active: true,
        }
    }
}

/// Storage used by the membership plugin.
#[async_trait]
pub trait MembershipSeedRepository: Send + Sync {
    /// Id of the live (not soft-deleted) record with `code` for the tenant.
    async fn find_by_code(
        &self,
        tenant_id: Uuid,
        category: SeedCategory,
        code: &str,
    ) -> anyhow::Result<Option<Uuid>>;

    /// Insert a record and return its id.
    async fn insert(&self, record: &NewSeedRecord) -> anyhow::Result<Uuid>;
}
