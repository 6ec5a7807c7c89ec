pub use sea_orm_migration::prelude::*;

mod columns;
pub mod guard;
mod m20250101000000_baseline;
mod m20250301000000_institutional_info;
pub mod m20250315000000_event_image;

pub use m20250315000000_event_image as event_image;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101000000_baseline::Migration),
            Box::new(m20250301000000_institutional_info::Migration),
            Box::new(m20250315000000_event_image::Migration),
        ]
    }
}

/// `(migration, dependency)` pairs declared by migrations that build on an
/// earlier step. Each pair is also enforced at apply time via [`guard`].
pub fn declared_dependencies() -> Vec<(String, &'static str)> {
    vec![(
        m20250315000000_event_image::Migration.name().to_string(),
        m20250315000000_event_image::DEPENDS_ON,
    )]
}
