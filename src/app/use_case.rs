pub mod iam {
    use crate::{
        app::resource::iam::UserUseCaseDto,
        domain::{
            entity::{iam::User, Entity},
            port::{CreateUserPort, GetUserPort},
            repository::{UserFindCriteria, UserRepositoryPort},
            service::PasswordHashService,
        },
        error::{
            app::ApplicationError,
            resource::{ConflictError, NotFoundError},
        },
    };

    const USER_ALREADY_EXISTS: &str = "User already exists.";

    pub async fn create_user<R, HS>(
        repository: &R,
        hash_service: &HS,
        port: &impl CreateUserPort,
    ) -> Result<UserUseCaseDto, ApplicationError>
    where
        R: UserRepositoryPort + ?Sized,
        HS: PasswordHashService + ?Sized,
    {
        let existing = repository
            .find_user(&UserFindCriteria::by_email(port.email()))
            .await?;
        if existing.is_some() {
            return Err(ConflictError::from_resource::<User>(USER_ALREADY_EXISTS).into());
        }

        let password_hash = hash_service.hash_password(port.password())?;
        let user = User::new(
            port.first_name().into(),
            port.last_name().into(),
            port.email().into(),
            port.role(),
            password_hash,
        );

        repository.add_user(&user).await.map_err(|err| {
            if err.is_unique_violation() {
                ConflictError::from_resource::<User>(USER_ALREADY_EXISTS).into()
            } else {
                ApplicationError::from(err)
            }
        })?;

        tracing::info!(user_id = %user.ident(), role = %user.role(), "user account created");
        Ok(UserUseCaseDto::new_from_user(&user))
    }

    pub async fn get_user<R>(
        repository: &R,
        port: &impl GetUserPort,
    ) -> Result<UserUseCaseDto, ApplicationError>
    where
        R: UserRepositoryPort + ?Sized,
    {
        let user = repository
            .find_user(&UserFindCriteria::by_id(port.user_id()))
            .await?
            .ok_or_else(|| NotFoundError::from_resource::<User>("User not found."))?;

        Ok(UserUseCaseDto::new_from_user(&user))
    }
}

pub mod blog {
    use uuid::Uuid;

    use crate::{
        app::resource::blog::PostUseCaseDto,
        domain::{
            entity::{
                blog::{Post, PostEdit, PostStatus},
                iam::User,
                Entity,
            },
            port::{
                CreatePostPort, EditPostPort, GetPostListPort, GetPostPort, PublishPostPort,
                RemovePostPort,
            },
            repository::{PostFindCriteria, PostRepositoryPort, UserFindCriteria, UserRepositoryPort},
        },
        error::{app::ApplicationError, resource::NotFoundError, security::ForbiddenError},
    };

    async fn find_post<PR>(posts: &PR, post_id: Uuid) -> Result<Post, ApplicationError>
    where
        PR: PostRepositoryPort + ?Sized,
    {
        let post = posts
            .find_post(&PostFindCriteria::by_id(post_id))
            .await?
            .ok_or_else(|| NotFoundError::from_resource::<Post>("Post not found."))?;
        Ok(post)
    }

    /// The post, when the executor owns it.
    async fn find_owned_post<PR>(
        posts: &PR,
        executor_id: Uuid,
        post_id: Uuid,
    ) -> Result<Post, ApplicationError>
    where
        PR: PostRepositoryPort + ?Sized,
    {
        let post = find_post(posts, post_id).await?;
        if !post.is_owned_by(executor_id) {
            tracing::warn!(%executor_id, %post_id, "access denied to foreign post");
            return Err(ForbiddenError::AccessDenied.into());
        }
        Ok(post)
    }

    pub async fn create_post<PR, UR>(
        posts: &PR,
        users: &UR,
        port: &impl CreatePostPort,
    ) -> Result<PostUseCaseDto, ApplicationError>
    where
        PR: PostRepositoryPort + ?Sized,
        UR: UserRepositoryPort + ?Sized,
    {
        let owner = users
            .find_user(&UserFindCriteria::by_id(port.executor_id()))
            .await?
            .ok_or_else(|| NotFoundError::from_resource::<User>("Post owner not found."))?;

        let post = Post::new(
            owner.ident(),
            port.title().into(),
            port.image_id(),
            port.content().map(String::from),
        );
        posts.add_post(&post).await?;

        tracing::info!(post_id = %post.ident(), owner_id = %owner.ident(), "post created");
        Ok(PostUseCaseDto::new_from_post(&post))
    }

    pub async fn edit_post<PR>(
        posts: &PR,
        port: &impl EditPostPort,
    ) -> Result<PostUseCaseDto, ApplicationError>
    where
        PR: PostRepositoryPort + ?Sized,
    {
        let mut post = find_owned_post(posts, port.executor_id(), port.post_id()).await?;

        post.edit(PostEdit {
            title: port.title().map(String::from),
            image_id: port.image_id(),
            content: port.content().map(String::from),
        });
        posts.update_post(&post).await?;

        tracing::info!(post_id = %post.ident(), version = post.version(), "post edited");
        Ok(PostUseCaseDto::new_from_post(&post))
    }

    pub async fn get_post<PR>(
        posts: &PR,
        port: &impl GetPostPort,
    ) -> Result<PostUseCaseDto, ApplicationError>
    where
        PR: PostRepositoryPort + ?Sized,
    {
        let post = find_post(posts, port.post_id()).await?;
        if post.status() != PostStatus::Published && !post.is_owned_by(port.executor_id()) {
            return Err(ForbiddenError::AccessDenied.into());
        }

        Ok(PostUseCaseDto::new_from_post(&post))
    }

    /// Posts of any owner; foreign owners only show their published posts.
    pub async fn get_post_list<PR>(
        posts: &PR,
        port: &impl GetPostListPort,
    ) -> Result<Vec<PostUseCaseDto>, ApplicationError>
    where
        PR: PostRepositoryPort + ?Sized,
    {
        let own_posts = port.owner_id() == Some(port.executor_id());
        let criteria = PostFindCriteria {
            owner_id: port.owner_id(),
            status: if own_posts {
                port.status()
            } else {
                Some(PostStatus::Published)
            },
            ..Default::default()
        };

        let found = posts.find_posts(&criteria).await?;
        tracing::debug!(count = found.len(), "post list fetched");
        Ok(PostUseCaseDto::new_list_from_posts(&found))
    }

    pub async fn publish_post<PR>(
        posts: &PR,
        port: &impl PublishPostPort,
    ) -> Result<PostUseCaseDto, ApplicationError>
    where
        PR: PostRepositoryPort + ?Sized,
    {
        let mut post = find_owned_post(posts, port.executor_id(), port.post_id()).await?;

        post.publish();
        posts.update_post(&post).await?;

        tracing::info!(post_id = %post.ident(), "post published");
        Ok(PostUseCaseDto::new_from_post(&post))
    }

    pub async fn remove_post<PR>(posts: &PR, port: &impl RemovePostPort) -> Result<(), ApplicationError>
    where
        PR: PostRepositoryPort + ?Sized,
    {
        let mut post = find_owned_post(posts, port.executor_id(), port.post_id()).await?;

        post.remove();
        posts.update_post(&post).await?;

        tracing::info!(post_id = %post.ident(), "post removed");
        Ok(())
    }
}
