//! Repositories kept in process memory, for local runs and tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    domain::{
        entity::{blog::Post, iam::User, Entity},
        repository::{PostFindCriteria, PostRepositoryPort, UserFindCriteria, UserRepositoryPort},
    },
    error::persistence::PersistenceError,
};

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepositoryPort for InMemoryUserRepository {
    async fn find_user(&self, by: &UserFindCriteria) -> Result<Option<User>, PersistenceError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| by.matches(user)).cloned())
    }

    async fn add_user(&self, user: &User) -> Result<(), PersistenceError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|stored| stored.ident() == user.ident() || stored.email() == user.email())
        {
            return Err(PersistenceError::unique_violation());
        }
        users.push(user.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepositoryPort for InMemoryPostRepository {
    async fn find_post(&self, by: &PostFindCriteria) -> Result<Option<Post>, PersistenceError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|post| by.matches(post)).cloned())
    }

    async fn find_posts(&self, by: &PostFindCriteria) -> Result<Vec<Post>, PersistenceError> {
        let posts = self.posts.read().await;
        let mut found: Vec<Post> = posts.iter().filter(|post| by.matches(post)).cloned().collect();
        // newest insertions first on equal timestamps
        found.reverse();
        found.sort_by(|a, b| b.created().cmp(&a.created()));
        Ok(found)
    }

    async fn add_post(&self, post: &Post) -> Result<(), PersistenceError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|stored| stored.ident() == post.ident()) {
            return Err(PersistenceError::unique_violation());
        }
        posts.push(post.clone());
        Ok(())
    }

    async fn update_post(&self, post: &Post) -> Result<(), PersistenceError> {
        let mut posts = self.posts.write().await;
        let stored = posts
            .iter_mut()
            .find(|stored| stored.ident() == post.ident())
            .ok_or(PersistenceError::NotFound)?;
        *stored = post.clone();
        Ok(())
    }
}
