pub mod controller;
pub mod database;
pub mod memory;
pub mod response;
pub mod service;

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::repository::{PostRepositoryPort, UserRepositoryPort};

/// Repository ports shared by every controller.
#[derive(Clone)]
pub struct Repositories {
    pub user: Arc<dyn UserRepositoryPort>,
    pub post: Arc<dyn PostRepositoryPort>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            user: Arc::new(memory::InMemoryUserRepository::new()),
            post: Arc::new(memory::InMemoryPostRepository::new()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            user: Arc::new(database::repository::PgUserRepository::new(pool.clone())),
            post: Arc::new(database::repository::PgPostRepository::new(pool)),
        }
    }
}

pub mod router {
    use std::sync::Arc;

    use salvo::{logging::Logger, Catcher, Router, Service};

    use super::{
        controller::*, response::EnvelopeCatcher, service::security::Argon2HashService,
        Repositories,
    };

    pub fn app(repositories: Repositories, hash_service: Arc<Argon2HashService>) -> Service {
        let post_router = Router::with_path("<post_id>")
            .get(GetPostController::new(repositories.clone()))
            .put(EditPostController::new(repositories.clone()))
            .delete(RemovePostController::new(repositories.clone()))
            .push(
                Router::with_path("publish")
                    .post(PublishPostController::new(repositories.clone())),
            );

        let router = Router::new()
            .push(
                Router::with_path("users")
                    .push(
                        Router::with_path("account").post(CreateUserAccountController::new(
                            repositories.clone(),
                            hash_service,
                        )),
                    )
                    .push(Router::with_path("me").get(GetMeController::new(repositories.clone()))),
            )
            .push(
                Router::with_path("posts")
                    .get(GetPostListController::new(repositories.clone()))
                    .post(CreatePostController::new(repositories.clone()))
                    .push(
                        Router::with_path("mine").get(GetMyPostsController::new(repositories)),
                    )
                    .push(post_router),
            )
            .hoop(Logger);

        let catchers: Vec<Box<dyn Catcher>> = vec![Box::new(EnvelopeCatcher)];
        Service::new(router).with_catchers(catchers)
    }
}
