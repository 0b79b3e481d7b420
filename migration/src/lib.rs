pub use sea_orm_migration::prelude::*;

mod m20250901_000001_create_admins_table;
mod m20250901_000002_create_audit_logs_table;
mod m20250901_000003_create_category_tables;
mod m20250901_000004_create_reference_tables;
mod m20250901_000005_create_products_table;
mod m20250901_000006_create_product_files_table;
mod m20250901_000007_create_carousel_items_table;
mod m20250901_000008_seed_default_superadmin;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_admins_table::Migration),
            Box::new(m20250901_000002_create_audit_logs_table::Migration),
            Box::new(m20250901_000003_create_category_tables::Migration),
            Box::new(m20250901_000004_create_reference_tables::Migration),
            Box::new(m20250901_000005_create_products_table::Migration),
            Box::new(m20250901_000006_create_product_files_table::Migration),
            Box::new(m20250901_000007_create_carousel_items_table::Migration),
            Box::new(m20250901_000008_seed_default_superadmin::Migration),
        ]
    }
}
