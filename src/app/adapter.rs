//! Validatable implementations of the use case ports.
//!
//! Every adapter can be built from a typed port value (`new`) or from an
//! untyped payload (`new_from_raw_payload`). Both paths run the same field
//! rules, and a failure lists every invalid field in declaration order.

use serde_json::json;
use uuid::Uuid;

use crate::{
    base::resource_id,
    domain::{
        entity::{blog::PostStatus, iam::UserRole},
        port::{
            CreatePostPort, CreateUserPort, EditPostPort, GetPostListPort, GetPostPort,
            GetUserPort, PublishPostPort, RemovePostPort,
        },
        validation::{field_errors, raw_payload, rule, Fields, RawPayload, ValidatableAdapter},
    },
    error::resource::ValidationError,
};

/// Roles a new account may claim.
const SIGN_UP_ROLES: &[UserRole] = &[UserRole::Author, UserRole::Guest];
const POST_STATUSES: &[PostStatus] = &[PostStatus::Draft, PostStatus::Published];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserAdapter {
    first_name: String,
    last_name: String,
    email: String,
    role: UserRole,
    password: String,
}

resource_id!(CreateUserAdapter, "CreateUserAdapter");

impl CreateUserAdapter {
    pub fn new(payload: &impl CreateUserPort) -> Result<Self, ValidationError> {
        Self::new_from_raw_payload(&raw_payload(json!({
            "firstName": payload.first_name(),
            "lastName": payload.last_name(),
            "email": payload.email(),
            "role": payload.role().as_str(),
            "password": payload.password(),
        })))
    }
}

impl ValidatableAdapter for CreateUserAdapter {
    fn new_from_raw_payload(raw: &RawPayload) -> Result<Self, ValidationError> {
        let fields = Fields::new(raw);
        match (
            fields.required("firstName", rule::string),
            fields.required("lastName", rule::string),
            fields.required("email", rule::email),
            fields.required("role", rule::one_of(SIGN_UP_ROLES)),
            fields.required("password", rule::string),
        ) {
            (Ok(first_name), Ok(last_name), Ok(email), Ok(role), Ok(password)) => Ok(Self {
                first_name,
                last_name,
                email,
                role,
                password,
            }),
            (first_name, last_name, email, role, password) => Err(field_errors::<Self>([
                first_name.err(),
                last_name.err(),
                email.err(),
                role.err(),
                password.err(),
            ])),
        }
    }
}

impl CreateUserPort for CreateUserAdapter {
    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn role(&self) -> UserRole {
        self.role
    }

    fn password(&self) -> &str {
        &self.password
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetUserAdapter {
    user_id: Uuid,
}

resource_id!(GetUserAdapter, "GetUserAdapter");

impl GetUserAdapter {
    pub fn new(payload: &impl GetUserPort) -> Result<Self, ValidationError> {
        Self::new_from_raw_payload(&raw_payload(json!({ "userId": payload.user_id() })))
    }
}

impl ValidatableAdapter for GetUserAdapter {
    fn new_from_raw_payload(raw: &RawPayload) -> Result<Self, ValidationError> {
        let fields = Fields::new(raw);
        match fields.required("userId", rule::uuid) {
            Ok(user_id) => Ok(Self { user_id }),
            Err(err) => Err(field_errors::<Self>([Some(err)])),
        }
    }
}

impl GetUserPort for GetUserAdapter {
    fn user_id(&self) -> Uuid {
        self.user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostAdapter {
    executor_id: Uuid,
    title: String,
    image_id: Option<Uuid>,
    content: Option<String>,
}

resource_id!(CreatePostAdapter, "CreatePostAdapter");

impl CreatePostAdapter {
    pub fn new(payload: &impl CreatePostPort) -> Result<Self, ValidationError> {
        Self::new_from_raw_payload(&raw_payload(json!({
            "executorId": payload.executor_id(),
            "title": payload.title(),
            "imageId": payload.image_id(),
            "content": payload.content(),
        })))
    }
}

impl ValidatableAdapter for CreatePostAdapter {
    fn new_from_raw_payload(raw: &RawPayload) -> Result<Self, ValidationError> {
        let fields = Fields::new(raw);
        match (
            fields.required("executorId", rule::uuid),
            fields.required("title", rule::string),
            fields.optional("imageId", rule::uuid),
            fields.optional("content", rule::string),
        ) {
            (Ok(executor_id), Ok(title), Ok(image_id), Ok(content)) => Ok(Self {
                executor_id,
                title,
                image_id,
                content,
            }),
            (executor_id, title, image_id, content) => Err(field_errors::<Self>([
                executor_id.err(),
                title.err(),
                image_id.err(),
                content.err(),
            ])),
        }
    }
}

impl CreatePostPort for CreatePostAdapter {
    fn executor_id(&self) -> Uuid {
        self.executor_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn image_id(&self) -> Option<Uuid> {
        self.image_id
    }

    fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPostAdapter {
    executor_id: Uuid,
    post_id: Uuid,
    title: Option<String>,
    image_id: Option<Uuid>,
    content: Option<String>,
}

resource_id!(EditPostAdapter, "EditPostAdapter");

impl EditPostAdapter {
    pub fn new(payload: &impl EditPostPort) -> Result<Self, ValidationError> {
        Self::new_from_raw_payload(&raw_payload(json!({
            "executorId": payload.executor_id(),
            "postId": payload.post_id(),
            "title": payload.title(),
            "imageId": payload.image_id(),
            "content": payload.content(),
        })))
    }
}

impl ValidatableAdapter for EditPostAdapter {
    fn new_from_raw_payload(raw: &RawPayload) -> Result<Self, ValidationError> {
        let fields = Fields::new(raw);
        match (
            fields.required("executorId", rule::uuid),
            fields.required("postId", rule::uuid),
            fields.optional("title", rule::string),
            fields.optional("imageId", rule::uuid),
            fields.optional("content", rule::string),
        ) {
            (Ok(executor_id), Ok(post_id), Ok(title), Ok(image_id), Ok(content)) => Ok(Self {
                executor_id,
                post_id,
                title,
                image_id,
                content,
            }),
            (executor_id, post_id, title, image_id, content) => Err(field_errors::<Self>([
                executor_id.err(),
                post_id.err(),
                title.err(),
                image_id.err(),
                content.err(),
            ])),
        }
    }
}

impl EditPostPort for EditPostAdapter {
    fn executor_id(&self) -> Uuid {
        self.executor_id
    }

    fn post_id(&self) -> Uuid {
        self.post_id
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn image_id(&self) -> Option<Uuid> {
        self.image_id
    }

    fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPostListAdapter {
    executor_id: Uuid,
    owner_id: Option<Uuid>,
    status: Option<PostStatus>,
}

resource_id!(GetPostListAdapter, "GetPostListAdapter");

impl GetPostListAdapter {
    pub fn new(payload: &impl GetPostListPort) -> Result<Self, ValidationError> {
        Self::new_from_raw_payload(&raw_payload(json!({
            "executorId": payload.executor_id(),
            "ownerId": payload.owner_id(),
            "status": payload.status().map(|status| status.as_str()),
        })))
    }
}

impl ValidatableAdapter for GetPostListAdapter {
    fn new_from_raw_payload(raw: &RawPayload) -> Result<Self, ValidationError> {
        let fields = Fields::new(raw);
        match (
            fields.required("executorId", rule::uuid),
            fields.optional("ownerId", rule::uuid),
            fields.optional("status", rule::one_of(POST_STATUSES)),
        ) {
            (Ok(executor_id), Ok(owner_id), Ok(status)) => Ok(Self {
                executor_id,
                owner_id,
                status,
            }),
            (executor_id, owner_id, status) => Err(field_errors::<Self>([
                executor_id.err(),
                owner_id.err(),
                status.err(),
            ])),
        }
    }
}

impl GetPostListPort for GetPostListAdapter {
    fn executor_id(&self) -> Uuid {
        self.executor_id
    }

    fn owner_id(&self) -> Option<Uuid> {
        self.owner_id
    }

    fn status(&self) -> Option<PostStatus> {
        self.status
    }
}

/// Adapter of a port that only names the executor and one post.
macro_rules! post_access_adapter {
    ($adapter:ident, $port:ident, $name:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $adapter {
            executor_id: Uuid,
            post_id: Uuid,
        }

        resource_id!($adapter, $name);

        impl $adapter {
            pub fn new(payload: &impl $port) -> Result<Self, ValidationError> {
                Self::new_from_raw_payload(&raw_payload(json!({
                    "executorId": payload.executor_id(),
                    "postId": payload.post_id(),
                })))
            }
        }

        impl ValidatableAdapter for $adapter {
            fn new_from_raw_payload(raw: &RawPayload) -> Result<Self, ValidationError> {
                let fields = Fields::new(raw);
                match (
                    fields.required("executorId", rule::uuid),
                    fields.required("postId", rule::uuid),
                ) {
                    (Ok(executor_id), Ok(post_id)) => Ok(Self {
                        executor_id,
                        post_id,
                    }),
                    (executor_id, post_id) => {
                        Err(field_errors::<Self>([executor_id.err(), post_id.err()]))
                    }
                }
            }
        }

        impl $port for $adapter {
            fn executor_id(&self) -> Uuid {
                self.executor_id
            }

            fn post_id(&self) -> Uuid {
                self.post_id
            }
        }
    };
}

post_access_adapter!(GetPostAdapter, GetPostPort, "GetPostAdapter");
post_access_adapter!(PublishPostAdapter, PublishPostPort, "PublishPostAdapter");
post_access_adapter!(RemovePostAdapter, RemovePostPort, "RemovePostAdapter");
