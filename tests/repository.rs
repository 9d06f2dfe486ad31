use pretty_assertions::assert_eq;
use serial_test::serial;
use sqlx::PgPool;
use uuid::Uuid;

use blog_backend::{
    domain::{
        entity::{blog::Post, iam::User, iam::UserRole, Entity},
        repository::{PostFindCriteria, PostRepositoryPort, UserFindCriteria, UserRepositoryPort},
        service::PasswordHashService,
    },
    infra::database::repository::{PgPostRepository, PgUserRepository},
};
use setup::{cheap_hash_service, database_env, setup_database};

mod setup;

fn user(email: &str) -> User {
    User::new(
        "Barbara".into(),
        "Liskov".into(),
        email.into(),
        UserRole::Author,
        cheap_hash_service().hash_password("secure:12345678").unwrap(),
    )
}

/// Fresh schema on the configured database, run with `cargo test -- --ignored`.
async fn database() -> PgPool {
    let env = database_env().expect("DATABASE_HOST must be set to run the Postgres tests");
    setup_database(&env).await
}

#[tokio::test]
#[serial]
#[ignore = "needs a Postgres database"]
async fn store_and_find_user() {
    let pool = database().await;
    let repository = PgUserRepository::new(pool);
    let email = format!("{}@email.com", Uuid::new_v4());
    let user = user(&email);

    repository.add_user(&user).await.unwrap();

    let by_email = repository
        .find_user(&UserFindCriteria::by_email(email.as_str()))
        .await
        .unwrap();
    assert_eq!(by_email.as_ref(), Some(&user));

    let by_id = repository
        .find_user(&UserFindCriteria::by_id(user.ident()))
        .await
        .unwrap();
    assert_eq!(by_id, Some(user));
}

#[tokio::test]
#[serial]
#[ignore = "needs a Postgres database"]
async fn duplicated_email_is_a_unique_violation() {
    let pool = database().await;
    let repository = PgUserRepository::new(pool);
    let email = format!("{}@email.com", Uuid::new_v4());

    repository.add_user(&user(&email)).await.unwrap();
    let err = repository.add_user(&user(&email)).await.unwrap_err();

    assert!(err.is_unique_violation(), "{err}");
}

#[tokio::test]
#[serial]
#[ignore = "needs a Postgres database"]
async fn update_and_list_posts() {
    let pool = database().await;
    let users = PgUserRepository::new(pool.clone());
    let posts = PgPostRepository::new(pool);
    let owner = user(&format!("{}@email.com", Uuid::new_v4()));
    users.add_user(&owner).await.unwrap();

    let mut first = Post::new(owner.ident(), "First".into(), None, Some("text".into()));
    posts.add_post(&first).await.unwrap();
    let second = Post::new(owner.ident(), "Second".into(), Some(Uuid::new_v4()), None);
    posts.add_post(&second).await.unwrap();

    first.publish();
    posts.update_post(&first).await.unwrap();

    let stored = posts
        .find_post(&PostFindCriteria::by_id(first.ident()))
        .await
        .unwrap();
    assert_eq!(stored.as_ref(), Some(&first));

    let criteria = PostFindCriteria {
        owner_id: Some(owner.ident()),
        ..Default::default()
    };
    let listed = posts.find_posts(&criteria).await.unwrap();
    assert_eq!(listed, [second.clone(), first.clone()]);

    first.remove();
    posts.update_post(&first).await.unwrap();
    let listed = posts.find_posts(&criteria).await.unwrap();
    assert_eq!(listed, [second]);
}
