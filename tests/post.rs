use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use blog_backend::app::resource::blog::PostUseCaseDto;
use setup::setup_test;

mod setup;

fn post_id(post: &Value) -> String {
    post["id"].as_str().unwrap().to_string()
}

fn titles(posts: &Value) -> Vec<&str> {
    posts
        .as_array()
        .unwrap()
        .iter()
        .map(|post| post["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn create_draft_post() {
    let app = setup_test().await;
    let author = app.insert_user("AUTHOR").await;
    let image_id = Uuid::new_v4();

    let req = app.client.post(app.url("/posts")).json(&json!({
        "title": "First steps",
        "imageId": image_id,
    }));
    let envelope = app.send(app.as_executor(req, author.id)).await;

    assert_eq!(envelope.code, 200);
    let post: PostUseCaseDto = serde_json::from_value(envelope.data.unwrap()).unwrap();
    assert_eq!(post.author_id, author.id);
    assert_eq!(post.title, "First steps");
    assert_eq!(post.image_id, Some(image_id));
    assert_eq!(post.content, None);
    assert_eq!(post.status.as_str(), "DRAFT");
    assert_eq!(post.published_at, None);
}

#[tokio::test]
async fn reject_post_of_unknown_owner() {
    let app = setup_test().await;

    let req = app
        .client
        .post(app.url("/posts"))
        .json(&json!({ "title": "Ghost writer" }));
    let envelope = app.send(app.as_executor(req, Uuid::new_v4())).await;

    assert_eq!(envelope.code, 1000);
    assert_eq!(envelope.message, "Post owner not found.");
    assert_eq!(envelope.data, None);
}

#[tokio::test]
async fn reject_malformed_post() {
    let app = setup_test().await;

    let req = app
        .client
        .post(app.url("/posts"))
        .json(&json!({ "title": 12, "imageId": "image.png", "content": null }))
        .header("x-executor-id", "not-an-id");
    let envelope = app.send(req).await;

    assert_eq!(envelope.code, 1002);
    let data = envelope.data.unwrap();
    assert_eq!(data["context"], "CreatePostAdapter");
    let properties: Vec<&str> = data["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|err| err["property"].as_str().unwrap())
        .collect();
    assert_eq!(properties, ["executorId", "title", "imageId"]);
}

#[tokio::test]
async fn edit_own_post() {
    let app = setup_test().await;
    let author = app.insert_user("AUTHOR").await;
    let post = app.insert_post(author.id, "Draft title").await;

    let req = app
        .client
        .put(app.url(&format!("/posts/{}", post_id(&post))))
        .json(&json!({ "title": "Final title" }));
    let envelope = app.send(app.as_executor(req, author.id)).await;

    assert_eq!(envelope.code, 200);
    let edited = envelope.data.unwrap();
    assert_eq!(edited["title"], "Final title");
    assert_eq!(edited["content"], post["content"]);
    assert!(!edited["editedAt"].is_null());
}

#[tokio::test]
async fn deny_foreign_post_changes() {
    let app = setup_test().await;
    let author = app.insert_user("AUTHOR").await;
    let intruder = app.insert_user("AUTHOR").await;
    let post = app.insert_post(author.id, "Mine").await;
    let path = format!("/posts/{}", post_id(&post));

    let edit = app
        .client
        .put(app.url(&path))
        .json(&json!({ "title": "Yours" }));
    let publish = app.client.post(app.url(&format!("{path}/publish")));
    let remove = app.client.delete(app.url(&path));

    for req in [edit, publish, remove] {
        let envelope = app.send(app.as_executor(req, intruder.id)).await;
        assert_eq!(envelope.code, 403);
        assert_eq!(envelope.message, "Access denied.");
    }
}

#[tokio::test]
async fn drafts_are_visible_to_their_owner_only() {
    let app = setup_test().await;
    let author = app.insert_user("AUTHOR").await;
    let reader = app.insert_user("GUEST").await;
    let post = app.insert_post(author.id, "Work in progress").await;
    let path = format!("/posts/{}", post_id(&post));

    let own = app
        .send(app.as_executor(app.client.get(app.url(&path)), author.id))
        .await;
    assert_eq!(own.code, 200);

    let foreign = app
        .send(app.as_executor(app.client.get(app.url(&path)), reader.id))
        .await;
    assert_eq!(foreign.code, 403);

    let published = app
        .send(app.as_executor(
            app.client.post(app.url(&format!("{path}/publish"))),
            author.id,
        ))
        .await;
    assert_eq!(published.code, 200);
    let published = published.data.unwrap();
    assert_eq!(published["status"], "PUBLISHED");
    assert!(!published["publishedAt"].is_null());

    let foreign = app
        .send(app.as_executor(app.client.get(app.url(&path)), reader.id))
        .await;
    assert_eq!(foreign.code, 200);
    assert_eq!(foreign.data.unwrap()["title"], "Work in progress");
}

#[tokio::test]
async fn removed_post_is_gone() {
    let app = setup_test().await;
    let author = app.insert_user("AUTHOR").await;
    let post = app.insert_post(author.id, "Short lived").await;
    let path = format!("/posts/{}", post_id(&post));

    let removed = app
        .send(app.as_executor(app.client.delete(app.url(&path)), author.id))
        .await;
    assert_eq!(removed.code, 200);
    assert_eq!(removed.data, None);

    let lookup = app
        .send(app.as_executor(app.client.get(app.url(&path)), author.id))
        .await;
    assert_eq!(lookup.code, 1000);
    assert_eq!(lookup.message, "Post not found.");

    let mine = app
        .send(app.as_executor(app.client.get(app.url("/posts/mine")), author.id))
        .await;
    assert_eq!(mine.data.unwrap(), json!([]));
}

#[tokio::test]
async fn list_posts_of_an_author() {
    let app = setup_test().await;
    let author = app.insert_user("AUTHOR").await;
    let reader = app.insert_user("GUEST").await;

    let draft = app.insert_post(author.id, "Draft").await;
    let first = app.insert_post(author.id, "First").await;
    let second = app.insert_post(author.id, "Second").await;
    for post in [&first, &second] {
        let req = app
            .client
            .post(app.url(&format!("/posts/{}/publish", post_id(post))));
        assert_eq!(app.send(app.as_executor(req, author.id)).await.code, 200);
    }

    let mine = app
        .send(app.as_executor(app.client.get(app.url("/posts/mine")), author.id))
        .await;
    assert_eq!(mine.code, 200);
    assert_eq!(titles(&mine.data.unwrap()), ["Second", "First", "Draft"]);

    // drafts stay hidden even when asked for
    let mut url = app.url("/posts");
    url.query_pairs_mut()
        .append_pair("authorId", &author.id.to_string())
        .append_pair("status", "DRAFT");
    let foreign = app
        .send(app.as_executor(app.client.get(url), reader.id))
        .await;
    assert_eq!(foreign.code, 200);
    assert_eq!(titles(&foreign.data.unwrap()), ["Second", "First"]);

    let mut url = app.url("/posts");
    url.query_pairs_mut()
        .append_pair("authorId", &author.id.to_string())
        .append_pair("status", "DRAFT");
    let own = app
        .send(app.as_executor(app.client.get(url), author.id))
        .await;
    let own = own.data.unwrap();
    assert_eq!(titles(&own), ["Draft"]);
    assert_eq!(own[0]["id"], draft["id"]);
}

#[tokio::test]
async fn reject_unknown_status_filter() {
    let app = setup_test().await;
    let reader = app.insert_user("GUEST").await;

    let mut url = app.url("/posts");
    url.query_pairs_mut().append_pair("status", "ARCHIVED");
    let envelope = app
        .send(app.as_executor(app.client.get(url), reader.id))
        .await;

    assert_eq!(envelope.code, 1002);
    let data = envelope.data.unwrap();
    assert_eq!(data["context"], "GetPostListAdapter");
    assert_eq!(data["errors"][0]["property"], "status");
    assert_eq!(data["errors"][0]["kind"], "unknown_variant");
}

#[tokio::test]
async fn reject_malformed_post_id() {
    let app = setup_test().await;
    let author = app.insert_user("AUTHOR").await;

    let envelope = app
        .send(app.as_executor(app.client.get(app.url("/posts/42")), author.id))
        .await;

    assert_eq!(envelope.code, 1002);
    let data = envelope.data.unwrap();
    assert_eq!(data["context"], "GetPostAdapter");
    assert_eq!(data["errors"][0]["property"], "postId");
}
