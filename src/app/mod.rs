pub mod adapter;
pub mod resource;
pub mod use_case;

pub mod transform {
    pub mod user {
        use crate::{
            app::resource::iam::UserUseCaseDto,
            domain::entity::{iam::User, Entity},
        };

        impl From<&User> for UserUseCaseDto {
            fn from(user: &User) -> Self {
                Self {
                    id: user.ident(),
                    first_name: user.first_name().clone(),
                    last_name: user.last_name().clone(),
                    email: user.email().clone(),
                    role: user.role(),
                }
            }
        }

        impl UserUseCaseDto {
            pub fn new_from_user(user: &User) -> Self {
                user.into()
            }

            pub fn new_list_from_users(users: &[User]) -> Vec<Self> {
                users.iter().map(Self::new_from_user).collect()
            }
        }
    }

    pub mod post {
        use crate::{
            app::resource::blog::PostUseCaseDto,
            domain::entity::{blog::Post, Entity},
        };

        impl From<&Post> for PostUseCaseDto {
            fn from(post: &Post) -> Self {
                Self {
                    id: post.ident(),
                    author_id: post.owner_id(),
                    title: post.title().clone(),
                    image_id: post.image_id(),
                    content: post.content().clone(),
                    status: post.status(),
                    created_at: post.created(),
                    edited_at: post.updated(),
                    published_at: post.published(),
                }
            }
        }

        impl PostUseCaseDto {
            pub fn new_from_post(post: &Post) -> Self {
                post.into()
            }

            pub fn new_list_from_posts(posts: &[Post]) -> Vec<Self> {
                posts.iter().map(Self::new_from_post).collect()
            }
        }
    }
}
