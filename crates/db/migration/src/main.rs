use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    // A missing .env is fine; DATABASE_URL may come from the real environment.
    dotenvy::dotenv().ok();
    cli::run_cli(db_migration::Migrator).await;
}
