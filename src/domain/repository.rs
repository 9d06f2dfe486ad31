use async_trait::async_trait;
use uuid::Uuid;

use super::entity::{
    blog::{Post, PostStatus},
    iam::User,
    Entity,
};
use crate::error::persistence::PersistenceError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFindCriteria {
    pub id: Option<Uuid>,
    pub email: Option<String>,
    pub include_removed: bool,
}

impl UserFindCriteria {
    pub fn by_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, user: &User) -> bool {
        self.id.map_or(true, |id| user.ident() == id)
            && self.email.as_ref().map_or(true, |email| user.email() == email)
            && (self.include_removed || !user.is_removed())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFindCriteria {
    pub id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
    pub status: Option<PostStatus>,
    pub include_removed: bool,
}

impl PostFindCriteria {
    pub fn by_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.id.map_or(true, |id| post.ident() == id)
            && self.owner_id.map_or(true, |owner| post.owner_id() == owner)
            && self.status.map_or(true, |status| post.status() == status)
            && (self.include_removed || !post.is_removed())
    }
}

#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    async fn find_user(&self, by: &UserFindCriteria) -> Result<Option<User>, PersistenceError>;

    /// Fails with a unique violation when the email is already taken.
    async fn add_user(&self, user: &User) -> Result<(), PersistenceError>;
}

#[async_trait]
pub trait PostRepositoryPort: Send + Sync {
    async fn find_post(&self, by: &PostFindCriteria) -> Result<Option<Post>, PersistenceError>;

    /// Matching posts, newest first.
    async fn find_posts(&self, by: &PostFindCriteria) -> Result<Vec<Post>, PersistenceError>;

    async fn add_post(&self, post: &Post) -> Result<(), PersistenceError>;

    async fn update_post(&self, post: &Post) -> Result<(), PersistenceError>;
}
