//! Grants or revokes the admin flag of an existing account.
//!
//! Usage: `set_admin <username> [--revoke]`

use std::env;

use config::Config;
use dotenvy::dotenv;

use pushkind_blog::db::establish_connection_pool;
use pushkind_blog::domain::types::Username;
use pushkind_blog::models::config::ServerConfig;
use pushkind_blog::repository::{DieselRepository, UserReader, UserWriter};

fn usage() -> ! {
    eprintln!("Usage: set_admin <username> [--revoke]");
    std::process::exit(2);
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut args = env::args().skip(1);
    let Some(username) = args.next() else {
        usage();
    };
    let is_admin = match args.next().as_deref() {
        None => true,
        Some("--revoke") => false,
        Some(_) => usage(),
    };

    let username = match Username::new(username) {
        Ok(username) => username,
        Err(err) => {
            log::error!("Invalid username: {err}");
            std::process::exit(1);
        }
    };

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()
        .and_then(|settings| settings.try_deserialize::<ServerConfig>());

    let server_config = match settings {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);

    let user = match repo.get_user_by_username(&username) {
        Ok(Some(user)) => user,
        Ok(None) => {
            log::error!("User {username} not found");
            std::process::exit(1);
        }
        Err(e) => {
            log::error!("Failed to look up user {username}: {e}");
            std::process::exit(1);
        }
    };

    match repo.set_user_admin(user.id, is_admin) {
        Ok(user) if user.is_admin => log::info!("User {} is now an admin", user.username),
        Ok(user) => log::info!("User {} is no longer an admin", user.username),
        Err(e) => {
            log::error!("Failed to update user {username}: {e}");
            std::process::exit(1);
        }
    }
}
