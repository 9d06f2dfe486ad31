#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client, RequestBuilder,
};
use salvo::{listener::TcpListener, Server};
use serde_json::{json, Value};
use url::Url;
use uuid::Uuid;

use blog_backend::{
    app::resource::iam::UserUseCaseDto,
    config::env_var::{DatabaseEnv, EnvVar, PasswordHashEnv},
    infra::{
        controller::EXECUTOR_ID_HEADER, response::Envelope, router,
        service::security::Argon2HashService, Repositories,
    },
};

pub struct TestApp {
    pub client: Client,
    pub url: Url,
    pub repositories: Repositories,
}

impl TestApp {
    pub fn url(&self, path: &str) -> Url {
        self.url.join(path).unwrap()
    }

    /// Sends a request and decodes the envelope, every outcome answers `200 OK`.
    pub async fn send(&self, req: RequestBuilder) -> Envelope<Value> {
        let res = req.send().await.unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::OK);
        res.json().await.unwrap()
    }

    pub fn as_executor(&self, req: RequestBuilder, executor_id: Uuid) -> RequestBuilder {
        req.header(EXECUTOR_ID_HEADER, executor_id.to_string())
    }

    /// Signs up a user with an unique email.
    pub async fn insert_user(&self, role: &str) -> UserUseCaseDto {
        let body = json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": format!("{}@email.com", Uuid::new_v4()),
            "role": role,
            "password": "secure:12345678",
        });
        let envelope = self
            .send(self.client.post(self.url("/users/account")).json(&body))
            .await;

        assert_eq!(envelope.code, 200, "{envelope:?}");
        serde_json::from_value(envelope.data.unwrap()).unwrap()
    }

    pub async fn insert_post(&self, executor_id: Uuid, title: &str) -> Value {
        let req = self
            .client
            .post(self.url("/posts"))
            .json(&json!({ "title": title, "content": "Lorem ipsum" }));
        let envelope = self.send(self.as_executor(req, executor_id)).await;

        assert_eq!(envelope.code, 200, "{envelope:?}");
        envelope.data.unwrap()
    }
}

/// Starts the api on an ephemeral port, backed by in-memory repositories.
pub async fn setup_test() -> TestApp {
    let repositories = Repositories::in_memory();
    let url = spawn_app(repositories.clone());

    TestApp {
        client: create_client(),
        url,
        repositories,
    }
}

pub fn cheap_hash_service() -> Argon2HashService {
    Argon2HashService::from_env(&PasswordHashEnv {
        memory_cost: 8,
        time_cost: 1,
        parallelism: 1,
    })
    .unwrap()
}

fn spawn_app(repositories: Repositories) -> Url {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let address = format!("127.0.0.1:{port}");

    let listener = TcpListener::bind(&address);
    let app = router::app(repositories, Arc::new(cheap_hash_service()));
    tokio::spawn(Server::new(listener).serve(app));

    Url::parse(format!("http://{address}").as_str()).unwrap()
}

/// Database settings from `.env`, `None` when no database is configured.
pub fn database_env() -> Option<DatabaseEnv> {
    dotenv::dotenv().ok();
    EnvVar::from_vars(|name| std::env::var(name).ok())
        .unwrap()
        .database
}

/// Recreates the schema on the configured database.
pub async fn setup_database(env: &DatabaseEnv) -> sqlx::PgPool {
    let pool = blog_backend::infra::database::connection::create_sqlx_pool(env)
        .await
        .expect("Expect to create a database pool with a open connection");

    let drop_sttm = sqlx::query("DROP SCHEMA IF EXISTS iam, blog CASCADE");

    let mut trx = pool.begin().await.unwrap();
    drop_sttm.execute(&mut trx).await.unwrap();
    for sttm in include_str!("../../dbschema.sql").split(';') {
        sqlx::query(sttm).execute(&mut trx).await.unwrap();
    }
    trx.commit().await.unwrap();

    pool
}

fn create_client() -> reqwest::Client {
    let mut headers = HeaderMap::new();
    headers.append("accept", HeaderValue::from_static("application/json"));

    let keep_alive = 1000 * 60 * 60; // 1 hours
    let connect_timeout = 1000 * 5; // 5 sec
    let timeout = 1000 * 10; // 10 sec

    reqwest::Client::builder()
        .tcp_keepalive(Duration::from_millis(keep_alive))
        .connect_timeout(Duration::from_millis(connect_timeout))
        .timeout(Duration::from_millis(timeout))
        .pool_max_idle_per_host(5)
        .default_headers(headers)
        .brotli(true)
        .gzip(true)
        .build()
        .expect("Expect to create a http client")
}
