pub mod connection {
    use std::time::Duration;

    use crate::config::env_var::DatabaseEnv;

    pub async fn create_sqlx_pool(env: &DatabaseEnv) -> Result<sqlx::PgPool, sqlx::Error> {
        sqlx::postgres::PgPoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .acquire_timeout(Duration::from_millis(1000))
            .idle_timeout(Duration::from_millis(1000 * 30))
            .max_lifetime(Duration::from_millis(1000 * 10))
            .connect(&env.url())
            .await
    }
}

pub mod repository {
    use async_trait::async_trait;
    use futures::TryStreamExt;
    use sqlx::{PgPool, Postgres, QueryBuilder};

    use crate::{
        domain::{
            entity::{blog::Post, iam::User, Entity},
            repository::{
                PostFindCriteria, PostRepositoryPort, UserFindCriteria, UserRepositoryPort,
            },
        },
        error::persistence::PersistenceError,
    };

    const USER_COLUMNS: &str = "SELECT id, created, updated, removed, version, first_name, \
         last_name, email, role, password_hash FROM iam.user WHERE TRUE";

    const POST_COLUMNS: &str = "SELECT id, created, updated, removed, version, owner_id, \
         title, image_id, content, status, published FROM blog.post WHERE TRUE";

    pub struct PgUserRepository {
        pool: PgPool,
    }

    impl PgUserRepository {
        pub fn new(pool: PgPool) -> Self {
            Self { pool }
        }
    }

    #[async_trait]
    impl UserRepositoryPort for PgUserRepository {
        async fn find_user(
            &self,
            by: &UserFindCriteria,
        ) -> Result<Option<User>, PersistenceError> {
            let mut qb = QueryBuilder::<Postgres>::new(USER_COLUMNS);
            if let Some(id) = by.id {
                qb.push(" AND id = ").push_bind(id);
            }
            if let Some(email) = &by.email {
                qb.push(" AND email = ").push_bind(email.clone());
            }
            if !by.include_removed {
                qb.push(" AND removed IS NULL");
            }
            qb.push(" LIMIT 1");

            let row = qb.build().fetch_optional(&self.pool).await?;
            row.as_ref().map(User::try_from).transpose()
        }

        async fn add_user(&self, user: &User) -> Result<(), PersistenceError> {
            sqlx::query(concat!(
                "INSERT INTO iam.user (id, created, updated, removed, version, first_name, ",
                "last_name, email, role, password_hash) ",
                "VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            ))
            .bind(user.ident())
            .bind(user.created())
            .bind(user.updated())
            .bind(user.removed())
            .bind(i64::from(user.version()))
            .bind(user.first_name())
            .bind(user.last_name())
            .bind(user.email())
            .bind(user.role().as_str())
            .bind(user.password_hash().as_str())
            .execute(&self.pool)
            .await?;

            Ok(())
        }
    }

    pub struct PgPostRepository {
        pool: PgPool,
    }

    impl PgPostRepository {
        pub fn new(pool: PgPool) -> Self {
            Self { pool }
        }
    }

    fn post_query(by: &PostFindCriteria) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(POST_COLUMNS);
        if let Some(id) = by.id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(owner_id) = by.owner_id {
            qb.push(" AND owner_id = ").push_bind(owner_id);
        }
        if let Some(status) = by.status {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
        if !by.include_removed {
            qb.push(" AND removed IS NULL");
        }
        qb
    }

    #[async_trait]
    impl PostRepositoryPort for PgPostRepository {
        async fn find_post(
            &self,
            by: &PostFindCriteria,
        ) -> Result<Option<Post>, PersistenceError> {
            let mut qb = post_query(by);
            qb.push(" LIMIT 1");

            let row = qb.build().fetch_optional(&self.pool).await?;
            row.as_ref().map(Post::try_from).transpose()
        }

        async fn find_posts(&self, by: &PostFindCriteria) -> Result<Vec<Post>, PersistenceError> {
            let mut qb = post_query(by);
            qb.push(" ORDER BY created DESC");

            let mut posts = Vec::new();
            let mut rows = qb.build().fetch(&self.pool);
            while let Some(row) = rows.try_next().await? {
                posts.push(Post::try_from(&row)?);
            }

            Ok(posts)
        }

        async fn add_post(&self, post: &Post) -> Result<(), PersistenceError> {
            sqlx::query(concat!(
                "INSERT INTO blog.post (id, created, updated, removed, version, owner_id, ",
                "title, image_id, content, status, published) ",
                "VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
            ))
            .bind(post.ident())
            .bind(post.created())
            .bind(post.updated())
            .bind(post.removed())
            .bind(i64::from(post.version()))
            .bind(post.owner_id())
            .bind(post.title())
            .bind(post.image_id())
            .bind(post.content())
            .bind(post.status().as_str())
            .bind(post.published())
            .execute(&self.pool)
            .await?;

            Ok(())
        }

        async fn update_post(&self, post: &Post) -> Result<(), PersistenceError> {
            let result = sqlx::query(concat!(
                "UPDATE blog.post SET updated = $2, removed = $3, version = $4, title = $5, ",
                "image_id = $6, content = $7, status = $8, published = $9 WHERE id = $1",
            ))
            .bind(post.ident())
            .bind(post.updated())
            .bind(post.removed())
            .bind(i64::from(post.version()))
            .bind(post.title())
            .bind(post.image_id())
            .bind(post.content())
            .bind(post.status().as_str())
            .bind(post.published())
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(PersistenceError::NotFound);
            }
            Ok(())
        }
    }
}
