//! Provision an administrator account out-of-band.
//!
//! Usage: `create-admin <email> <password> [admin|member]`
//!
//! Expects the database migrations to have been applied (the API server
//! runs them on startup).

use coffre_api::auth::password;
use coffre_core::models::UserRole;
use coffre_core::Config;
use coffre_db::UserRepository;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    coffre_api::telemetry::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: create-admin <email> <password> [admin|member]");
        std::process::exit(2);
    }

    let email = &args[1];
    let role = match args.get(3).map(String::as_str) {
        Some(role) => UserRole::parse(role)
            .map_err(|_| anyhow::anyhow!("role must be 'admin' or 'member'"))?,
        None => UserRole::Admin,
    };

    let config = Config::from_env()?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(config.database_url())
        .await?;

    let password_hash = password::hash(&args[2])?;
    let repo = UserRepository::new(pool);
    let user = repo.create(email, &password_hash, role).await?;

    println!("Created user {} ({})", user.email, user.role);
    Ok(())
}
