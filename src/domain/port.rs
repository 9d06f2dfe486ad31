//! Input shapes of the use cases.

use uuid::Uuid;

use super::entity::{blog::PostStatus, iam::UserRole};

pub trait CreateUserPort {
    fn first_name(&self) -> &str;
    fn last_name(&self) -> &str;
    fn email(&self) -> &str;
    fn role(&self) -> UserRole;
    fn password(&self) -> &str;
}

pub trait GetUserPort {
    fn user_id(&self) -> Uuid;
}

pub trait CreatePostPort {
    fn executor_id(&self) -> Uuid;
    fn title(&self) -> &str;
    fn image_id(&self) -> Option<Uuid>;
    fn content(&self) -> Option<&str>;
}

pub trait EditPostPort {
    fn executor_id(&self) -> Uuid;
    fn post_id(&self) -> Uuid;
    fn title(&self) -> Option<&str>;
    fn image_id(&self) -> Option<Uuid>;
    fn content(&self) -> Option<&str>;
}

pub trait GetPostPort {
    fn executor_id(&self) -> Uuid;
    fn post_id(&self) -> Uuid;
}

pub trait GetPostListPort {
    fn executor_id(&self) -> Uuid;
    fn owner_id(&self) -> Option<Uuid>;
    fn status(&self) -> Option<PostStatus>;
}

pub trait PublishPostPort {
    fn executor_id(&self) -> Uuid;
    fn post_id(&self) -> Uuid;
}

pub trait RemovePostPort {
    fn executor_id(&self) -> Uuid;
    fn post_id(&self) -> Uuid;
}
