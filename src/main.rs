use std::sync::Arc;

use salvo::{listener::TcpListener, Server};

use blog_backend::{
    config::env_var,
    infra::{database::connection, router, service::security::Argon2HashService, Repositories},
};

#[tokio::main]
async fn main() {
    let env = env_var::get();
    tracing_subscriber::fmt().with_max_level(env.log_level).init();

    let repositories = match &env.database {
        Some(database) => match connection::create_sqlx_pool(database).await {
            Ok(pool) => Repositories::postgres(pool),
            Err(err) => {
                tracing::error!("database connection failed: {err}");
                std::process::exit(1);
            }
        },
        None => {
            tracing::warn!("DATABASE_HOST not set, using in-memory repositories");
            Repositories::in_memory()
        }
    };

    let hash_service = match Argon2HashService::from_env(&env.password_hash) {
        Ok(service) => Arc::new(service),
        Err(err) => {
            tracing::error!("invalid password hash costs: {err}");
            std::process::exit(1);
        }
    };

    let address = format!("0.0.0.0:{}", env.port);
    tracing::info!("listening on {address}");
    let listener = TcpListener::bind(&address);
    Server::new(listener)
        .serve(router::app(repositories, hash_service))
        .await;
}
