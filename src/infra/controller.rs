use std::sync::Arc;

use async_trait::async_trait;
use salvo::{Depot, FlowCtrl, Handler, Request, Response};
use serde_json::Value;

use super::{response::Envelope, service::security::Argon2HashService, Repositories};
use crate::{
    app::{
        adapter::{
            CreatePostAdapter, CreateUserAdapter, EditPostAdapter, GetPostAdapter,
            GetPostListAdapter, GetUserAdapter, PublishPostAdapter, RemovePostAdapter,
        },
        use_case,
    },
    domain::validation::{RawPayload, ValidatableAdapter},
    error::{app::ApplicationError, http::BadRequest},
};

/// Header carrying the id of the authenticated user, set by the gateway.
pub const EXECUTOR_ID_HEADER: &str = "x-executor-id";

macro_rules! map_res_err {
    ($result:ident, $response:ident) => {
        match $result {
            Err(err) => {
                $response.render(err);
                return;
            }
            Ok(ok) => ok,
        }
    };
}

/// Parse the request body into a raw payload.
///
/// Anything other than a JSON object is a bad request.
async fn parse_raw_payload(req: &mut Request) -> Result<RawPayload, ApplicationError> {
    let body: Value = req.parse_body().await.map_err(BadRequest::from)?;
    match body {
        Value::Object(raw) => Ok(raw),
        _ => Err(BadRequest::InvalidContent.into()),
    }
}

/// Executor id as sent by the gateway, `null` when the header is absent.
///
/// The adapters decide whether it is a valid id.
fn extract_executor_id(req: &Request) -> Value {
    let header: Option<&str> = req.header(EXECUTOR_ID_HEADER);
    header.map_or(Value::Null, Value::from)
}

fn extract_post_id(req: &Request) -> Value {
    req.params()
        .get("post_id")
        .map_or(Value::Null, |id| Value::from(id.as_str()))
}

/// Raw payload of a request without body, scoped to one post.
fn post_access_payload(req: &Request) -> RawPayload {
    let mut raw = RawPayload::new();
    raw.insert("executorId".into(), extract_executor_id(req));
    raw.insert("postId".into(), extract_post_id(req));
    raw
}

fn validate<A: ValidatableAdapter>(raw: &RawPayload) -> Result<A, ApplicationError> {
    A::new_from_raw_payload(raw).map_err(ApplicationError::from)
}

pub struct CreateUserAccountController {
    repositories: Repositories,
    hash_service: Arc<Argon2HashService>,
}

impl CreateUserAccountController {
    pub fn new(repositories: Repositories, hash_service: Arc<Argon2HashService>) -> Self {
        Self {
            repositories,
            hash_service,
        }
    }
}

#[async_trait]
impl Handler for CreateUserAccountController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = parse_raw_payload(req).await;
        let raw = map_res_err!(result, res);

        let result = validate::<CreateUserAdapter>(&raw);
        let adapter = map_res_err!(result, res);

        let result = use_case::iam::create_user(
            self.repositories.user.as_ref(),
            self.hash_service.as_ref(),
            &adapter,
        )
        .await;
        let user = map_res_err!(result, res);

        res.render(Envelope::success(user));
    }
}

pub struct GetMeController {
    repositories: Repositories,
}

impl GetMeController {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }
}

#[async_trait]
impl Handler for GetMeController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let mut raw = RawPayload::new();
        raw.insert("userId".into(), extract_executor_id(req));

        let result = validate::<GetUserAdapter>(&raw);
        let adapter = map_res_err!(result, res);

        let result = use_case::iam::get_user(self.repositories.user.as_ref(), &adapter).await;
        let user = map_res_err!(result, res);

        res.render(Envelope::success(user));
    }
}

pub struct CreatePostController {
    repositories: Repositories,
}

impl CreatePostController {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }
}

#[async_trait]
impl Handler for CreatePostController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = parse_raw_payload(req).await;
        let mut raw = map_res_err!(result, res);
        raw.insert("executorId".into(), extract_executor_id(req));

        let result = validate::<CreatePostAdapter>(&raw);
        let adapter = map_res_err!(result, res);

        let result = use_case::blog::create_post(
            self.repositories.post.as_ref(),
            self.repositories.user.as_ref(),
            &adapter,
        )
        .await;
        let post = map_res_err!(result, res);

        res.render(Envelope::success(post));
    }
}

pub struct EditPostController {
    repositories: Repositories,
}

impl EditPostController {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }
}

#[async_trait]
impl Handler for EditPostController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = parse_raw_payload(req).await;
        let mut raw = map_res_err!(result, res);
        raw.extend(post_access_payload(req));

        let result = validate::<EditPostAdapter>(&raw);
        let adapter = map_res_err!(result, res);

        let result = use_case::blog::edit_post(self.repositories.post.as_ref(), &adapter).await;
        let post = map_res_err!(result, res);

        res.render(Envelope::success(post));
    }
}

pub struct GetPostController {
    repositories: Repositories,
}

impl GetPostController {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }
}

#[async_trait]
impl Handler for GetPostController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = validate::<GetPostAdapter>(&post_access_payload(req));
        let adapter = map_res_err!(result, res);

        let result = use_case::blog::get_post(self.repositories.post.as_ref(), &adapter).await;
        let post = map_res_err!(result, res);

        res.render(Envelope::success(post));
    }
}

pub struct GetPostListController {
    repositories: Repositories,
}

impl GetPostListController {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }
}

#[async_trait]
impl Handler for GetPostListController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let mut raw = RawPayload::new();
        raw.insert("executorId".into(), extract_executor_id(req));
        if let Some(query) = req.uri().query() {
            for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
                match key.as_ref() {
                    "authorId" => raw.insert("ownerId".into(), Value::from(value.into_owned())),
                    "status" => raw.insert("status".into(), Value::from(value.into_owned())),
                    _ => None,
                };
            }
        }

        let result = validate::<GetPostListAdapter>(&raw);
        let adapter = map_res_err!(result, res);

        let result =
            use_case::blog::get_post_list(self.repositories.post.as_ref(), &adapter).await;
        let posts = map_res_err!(result, res);

        res.render(Envelope::success(posts));
    }
}

/// Lists every post of the executor, drafts included.
pub struct GetMyPostsController {
    repositories: Repositories,
}

impl GetMyPostsController {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }
}

#[async_trait]
impl Handler for GetMyPostsController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let executor_id = extract_executor_id(req);
        let mut raw = RawPayload::new();
        raw.insert("executorId".into(), executor_id.clone());
        raw.insert("ownerId".into(), executor_id);

        let result = validate::<GetPostListAdapter>(&raw);
        let adapter = map_res_err!(result, res);

        let result =
            use_case::blog::get_post_list(self.repositories.post.as_ref(), &adapter).await;
        let posts = map_res_err!(result, res);

        res.render(Envelope::success(posts));
    }
}

pub struct PublishPostController {
    repositories: Repositories,
}

impl PublishPostController {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }
}

#[async_trait]
impl Handler for PublishPostController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = validate::<PublishPostAdapter>(&post_access_payload(req));
        let adapter = map_res_err!(result, res);

        let result =
            use_case::blog::publish_post(self.repositories.post.as_ref(), &adapter).await;
        let post = map_res_err!(result, res);

        res.render(Envelope::success(post));
    }
}

pub struct RemovePostController {
    repositories: Repositories,
}

impl RemovePostController {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }
}

#[async_trait]
impl Handler for RemovePostController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = validate::<RemovePostAdapter>(&post_access_payload(req));
        let adapter = map_res_err!(result, res);

        let result = use_case::blog::remove_post(self.repositories.post.as_ref(), &adapter).await;
        map_res_err!(result, res);

        res.render(Envelope::<()>::success(()));
    }
}
