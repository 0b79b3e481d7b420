use sea_orm_migration::prelude::*;
use std::env;

#[tokio::main]
async fn main() {
    // Default to the local development database when DATABASE_URL is unset.
    if env::var("DATABASE_URL").is_err() {
        let db_path = if env::current_dir().is_ok_and(|d| d.ends_with("migration")) {
            "../data/agro_catalog.db"
        } else {
            "data/agro_catalog.db"
        };
        unsafe {
            env::set_var("DATABASE_URL", format!("sqlite://{db_path}"));
        }
    }
    cli::run_cli(migration::Migrator).await;
}
