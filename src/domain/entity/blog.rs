use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{base::resource_id, error::resource::ValidationErrorKind};

use super::{now, EntityData};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    #[display(fmt = "DRAFT")]
    Draft,
    #[display(fmt = "PUBLISHED")]
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "DRAFT",
            PostStatus::Published => "PUBLISHED",
        }
    }
}

impl FromStr for PostStatus {
    type Err = ValidationErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "PUBLISHED" => Ok(Self::Published),
            _ => Err(ValidationErrorKind::UnknownVariant),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostState {
    pub(in crate::domain) owner_id: Uuid,
    pub(in crate::domain) title: String,
    pub(in crate::domain) image_id: Option<Uuid>,
    pub(in crate::domain) content: Option<String>,
    pub(in crate::domain) status: PostStatus,
    pub(in crate::domain) published: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub(in crate::domain) data: EntityData,
    pub(in crate::domain) state: PostState,
}

/// Changes applied by [`Post::edit`], `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostEdit {
    pub title: Option<String>,
    pub image_id: Option<Uuid>,
    pub content: Option<String>,
}

impl_entity!(Post);
resource_id!(Post, "blog::Post");

impl Post {
    state_copy!(owner_id, Uuid);
    state_ref!(title, String);
    state_copy!(image_id, Option<Uuid>);
    state_ref!(content, Option<String>);
    state_copy!(status, PostStatus);
    state_copy!(published, Option<DateTime<Utc>>);

    pub fn new(
        owner_id: Uuid,
        title: String,
        image_id: Option<Uuid>,
        content: Option<String>,
    ) -> Self {
        Self {
            data: EntityData::new(),
            state: PostState {
                owner_id,
                title,
                image_id,
                content,
                status: PostStatus::Draft,
                published: None,
            },
        }
    }

    pub(in crate::domain) fn restore(data: EntityData, state: PostState) -> Self {
        Self { data, state }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.state.owner_id == user_id
    }

    pub fn edit(&mut self, edit: PostEdit) {
        if let Some(title) = edit.title {
            self.state.title = title;
        }
        if let Some(image_id) = edit.image_id {
            self.state.image_id = Some(image_id);
        }
        if let Some(content) = edit.content {
            self.state.content = Some(content);
        }
        self.data.touch();
    }

    pub fn publish(&mut self) {
        self.state.status = PostStatus::Published;
        self.state.published = Some(now());
        self.data.touch();
    }

    pub fn remove(&mut self) {
        self.data.remove();
    }
}
