pub mod iam {
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use crate::domain::{entity::iam::UserRole, port::CreateUserPort};

    /// Typed account creation payload.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateUser<'a> {
        pub first_name: &'a str,
        pub last_name: &'a str,
        pub email: &'a str,
        pub role: UserRole,
        pub password: &'a str,
    }

    impl CreateUserPort for CreateUser<'_> {
        fn first_name(&self) -> &str {
            self.first_name
        }

        fn last_name(&self) -> &str {
            self.last_name
        }

        fn email(&self) -> &str {
            self.email
        }

        fn role(&self) -> UserRole {
            self.role
        }

        fn password(&self) -> &str {
            self.password
        }
    }

    /// Public projection of a user.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserUseCaseDto {
        pub id: Uuid,
        pub first_name: String,
        pub last_name: String,
        pub email: String,
        pub role: UserRole,
    }
}

pub mod blog {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use crate::domain::{entity::blog::PostStatus, port::CreatePostPort};

    /// Typed post creation payload.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreatePost<'a> {
        pub executor_id: Uuid,
        pub title: &'a str,
        pub image_id: Option<Uuid>,
        pub content: Option<&'a str>,
    }

    impl CreatePostPort for CreatePost<'_> {
        fn executor_id(&self) -> Uuid {
            self.executor_id
        }

        fn title(&self) -> &str {
            self.title
        }

        fn image_id(&self) -> Option<Uuid> {
            self.image_id
        }

        fn content(&self) -> Option<&str> {
            self.content
        }
    }

    /// Public projection of a post.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PostUseCaseDto {
        pub id: Uuid,
        pub author_id: Uuid,
        /// Added on top of the fields older clients read, which ignore it.
        pub title: String,
        pub image_id: Option<Uuid>,
        pub content: Option<String>,
        pub status: PostStatus,
        pub created_at: DateTime<Utc>,
        pub edited_at: Option<DateTime<Utc>>,
        pub published_at: Option<DateTime<Utc>>,
    }
}
