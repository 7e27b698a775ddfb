pub mod db;
pub mod domain;
mod error_conversions;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use std::time::Duration;

    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::db::establish_connection_pool;
    use crate::middleware::RedirectUnauthorized;
    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;
    use crate::routes::admin::{delete_post as admin_delete_post, delete_user, show_user, show_users};
    use crate::routes::auth::{index, login, logout, show_login, show_signup, signup};
    use crate::routes::posts::{
        create_post, delete_post, save_post, show_edit_post, show_new_post, show_profile,
    };

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        // Establish Diesel connection pool for the SQLite database.
        let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

        let repo = DieselRepository::new(pool);

        // Keys and stores for identity, sessions, and flash messages.
        let secret_key = Key::try_from(server_config.secret.as_bytes()).map_err(|e| {
            std::io::Error::other(format!("Secret must be at least 64 bytes long: {e}"))
        })?;

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let ttl_hours = server_config.session_ttl_hours();
        if ttl_hours != server_config.jwt_ttl_hours {
            log::warn!(
                "jwt_ttl_hours = {} is out of range, using {ttl_hours}",
                server_config.jwt_ttl_hours
            );
        }
        // The identity expires together with the JWT it carries.
        let session_ttl = Duration::from_secs(ttl_hours.unsigned_abs() * 3600);

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!("Starting blog server on {}:{}", bind_address.0, bind_address.1);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(
                    IdentityMiddleware::builder()
                        .login_deadline(Some(session_ttl))
                        .build(),
                )
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_name("jwt".to_string())
                        .cookie_secure(server_config.cookie_secure)
                        .cookie_domain(server_config.domain.clone())
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .service(index)
                .service(
                    web::scope("/users")
                        .wrap(RedirectUnauthorized)
                        .service(show_signup)
                        .service(signup)
                        .service(show_login)
                        .service(login)
                        .service(logout)
                        .service(show_profile)
                        .service(show_new_post)
                        .service(create_post)
                        .service(show_edit_post)
                        .service(save_post)
                        .service(delete_post)
                        .service(show_users)
                        .service(show_user)
                        .service(delete_user)
                        .service(admin_delete_post),
                )
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
