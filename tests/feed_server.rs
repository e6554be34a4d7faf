use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use uuid::Uuid;

use dbu_hub::api::{AccountAPI, PostAPI, API};
use dbu_hub::auth::{TokenIssuer, User};
use dbu_hub::entities::{AccessToken, Account, Creator, Post, PostDraft, Registration};
use dbu_hub::error::{
    forbidden_error, invalid_credential_error, not_found_error, rejected_error,
    unauthenticated_error, Error,
};
use dbu_hub::external::{FeedSource, HubFeed};
use dbu_hub::feed::{FeedLoader, FeedView, FEED_LIMIT};
use dbu_hub::server::{router, DynAPI};

/// Posts and accounts kept in memory, with the last requested limit recorded.
struct MemoryHub {
    posts: Mutex<Vec<Post>>,
    accounts: Mutex<Vec<(User, String)>>,
    tokens: TokenIssuer,
    last_limit: Mutex<Option<i64>>,
}

impl MemoryHub {
    fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
            accounts: Mutex::new(Vec::new()),
            tokens: TokenIssuer::new("feed-server-test", 20),
            last_limit: Mutex::new(None),
        }
    }

    fn empty() -> Self {
        Self::with_posts(Vec::new())
    }

    async fn owner_of(&self, id: i64) -> Result<Option<Uuid>, Error> {
        self.posts
            .lock()
            .await
            .iter()
            .find(|post| post.id == id)
            .map(|post| post.creator.as_ref().map(|creator| creator.id))
            .ok_or_else(|| not_found_error("post"))
    }
}

#[async_trait]
impl PostAPI for MemoryHub {
    async fn list_posts(&self, _user: User, limit: Option<i64>) -> Result<Vec<Post>, Error> {
        *self.last_limit.lock().await = limit;

        let mut posts = self.posts.lock().await.clone();
        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        posts.truncate(limit.unwrap_or(FEED_LIMIT as i64) as usize);

        Ok(posts)
    }

    async fn find_post(&self, _user: User, id: i64) -> Result<Post, Error> {
        self.posts
            .lock()
            .await
            .iter()
            .find(|post| post.id == id)
            .cloned()
            .ok_or_else(|| not_found_error("post"))
    }

    async fn create_post(&self, user: User, draft: PostDraft) -> Result<Post, Error> {
        draft.validate()?;

        let mut posts = self.posts.lock().await;
        let post = Post {
            id: posts.len() as i64 + 1,
            title: draft.title,
            content: draft.content,
            timestamp: Utc::now(),
            creator: Some(Creator { id: user.id }),
        };
        posts.push(post.clone());

        Ok(post)
    }

    async fn update_post(&self, user: User, id: i64, draft: PostDraft) -> Result<Post, Error> {
        draft.validate()?;

        if self.owner_of(id).await? != Some(user.id) {
            return Err(forbidden_error());
        }

        let mut posts = self.posts.lock().await;
        let post = posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or_else(|| not_found_error("post"))?;

        post.title = draft.title;
        post.content = draft.content;

        Ok(post.clone())
    }

    async fn delete_post(&self, user: User, id: i64) -> Result<(), Error> {
        if self.owner_of(id).await? != Some(user.id) {
            return Err(forbidden_error());
        }

        self.posts.lock().await.retain(|post| post.id != id);

        Ok(())
    }
}

#[async_trait]
impl AccountAPI for MemoryHub {
    async fn register(&self, registration: Registration) -> Result<Account, Error> {
        registration.validate()?;

        let mut accounts = self.accounts.lock().await;
        if accounts
            .iter()
            .any(|(user, _)| user.username == registration.username)
        {
            return Err(rejected_error("Username already registered"));
        }

        let user = User::new(Uuid::new_v4(), registration.username);
        accounts.push((user.clone(), registration.password));

        Ok(Account {
            id: user.id,
            username: user.username,
        })
    }

    async fn issue_token(&self, username: &str, password: &str) -> Result<AccessToken, Error> {
        let accounts = self.accounts.lock().await;
        let (user, _) = accounts
            .iter()
            .find(|(user, stored)| user.username == username && stored == password)
            .ok_or_else(invalid_credential_error)?;

        self.tokens.issue(user)
    }

    async fn authenticate(&self, token: &str) -> Result<User, Error> {
        let claims = self.tokens.verify(token)?;

        self.accounts
            .lock()
            .await
            .iter()
            .find(|(user, _)| user.username == claims.sub)
            .map(|(user, _)| user.clone())
            .ok_or_else(unauthenticated_error)
    }
}

impl API for MemoryHub {}

fn post(id: i64, hour: u32, creator: Uuid) -> Post {
    Post {
        id,
        title: format!("Announcement {}", id),
        content: "Classes resume on Monday.".into(),
        timestamp: Utc.with_ymd_and_hms(2024, 3, 4, hour, 0, 0).unwrap(),
        creator: Some(Creator { id: creator }),
    }
}

async fn spawn_server(api: Arc<MemoryHub>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(api as DynAPI);

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });

    addr
}

/// Registers `username` over HTTP and returns its account and bearer token.
async fn sign_up(addr: SocketAddr, username: &str) -> (Account, String) {
    let client = reqwest::Client::new();

    let res = client
        .post(format!("http://{}/auth/", addr))
        .json(&json!({ "username": username, "password": "secret1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let account: Account = res.json().await.unwrap();

    let token: AccessToken = client
        .post(format!("http://{}/auth/token", addr))
        .form(&[("username", username), ("password", "secret1")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(token.token_type, "bearer");

    (account, token.access_token)
}

async fn seed_post(api: &MemoryHub, creator: Uuid) -> i64 {
    let mut posts = api.posts.lock().await;
    let id = posts.len() as i64 + 1;
    posts.push(post(id, 9, creator));
    id
}

#[tokio::test]
async fn health_check() {
    let addr = spawn_server(Arc::new(MemoryHub::empty())).await;

    let body: Value = reqwest::get(format!("http://{}/", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!({ "message": "It works well" }));
}

#[tokio::test]
async fn feed_source_reads_newest_first_with_limit() {
    let author = Uuid::new_v4();
    let api = Arc::new(MemoryHub::with_posts(vec![
        post(1, 8, author),
        post(2, 12, author),
        post(3, 10, author),
    ]));
    let addr = spawn_server(api.clone()).await;

    let feed = HubFeed::new(format!("http://{}", addr));
    let posts = feed.fetch_posts(2).await.unwrap();

    assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(*api.last_limit.lock().await, Some(2));
    assert_eq!(posts[0].creator, Some(Creator { id: author }));
}

#[tokio::test]
async fn feed_loader_renders_server_content() {
    let author = Uuid::new_v4();
    let api = Arc::new(MemoryHub::with_posts(vec![
        post(1, 9, author),
        post(2, 11, author),
    ]));
    let addr = spawn_server(api).await;

    let feed = HubFeed::new(format!("http://{}/", addr));
    let mut loader = FeedLoader::new();
    loader.load(&feed).await.unwrap();

    match loader.view() {
        FeedView::Content(posts) => assert_eq!(posts[0].id, 2),
        other => panic!("unexpected view {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_feed_shows_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let feed = HubFeed::new(format!("http://{}", addr));
    let mut loader = FeedLoader::new();

    assert!(loader.load(&feed).await.is_err());
    assert!(matches!(loader.view(), FeedView::Error(_)));
}

#[tokio::test]
async fn missing_post_is_not_found() {
    let addr = spawn_server(Arc::new(MemoryHub::empty())).await;

    let res = reqwest::get(format!("http://{}/post/42", addr)).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 102);
    assert_eq!(body["error"], "post not found");
}

#[tokio::test]
async fn malformed_input_gets_error_body() {
    let addr = spawn_server(Arc::new(MemoryHub::empty())).await;

    for url in [
        format!("http://{}/post/all?limit=abc", addr),
        format!("http://{}/post/not-a-number", addr),
    ] {
        let res = reqwest::get(url).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({ "code": 101, "error": "invalid input" }));
    }
}

#[tokio::test]
async fn writes_require_a_valid_token() {
    let author = Uuid::new_v4();
    let api = Arc::new(MemoryHub::with_posts(vec![post(1, 9, author)]));
    let addr = spawn_server(api.clone()).await;
    let client = reqwest::Client::new();
    let draft = json!({ "title": "Library hours", "content": "Open until 10pm." });

    let res = client
        .post(format!("http://{}/post", addr))
        .json(&draft)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .delete(format!("http://{}/post/1", addr))
        .bearer_auth("forged.token.value")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 105);
    assert_eq!(api.posts.lock().await.len(), 1);
}

#[tokio::test]
async fn login_rejects_wrong_password_and_duplicates() {
    let addr = spawn_server(Arc::new(MemoryHub::empty())).await;
    let client = reqwest::Client::new();
    sign_up(addr, "registrar").await;

    let res = client
        .post(format!("http://{}/auth/token", addr))
        .form(&[("username", "registrar"), ("password", "wrong")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(format!("http://{}/auth/", addr))
        .json(&json!({ "username": "registrar", "password": "other" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Username already registered");
}

#[tokio::test]
async fn create_validates_draft_and_records_creator() {
    let addr = spawn_server(Arc::new(MemoryHub::empty())).await;
    let (account, token) = sign_up(addr, "registrar").await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("http://{}/post", addr))
        .bearer_auth(&token)
        .json(&json!({ "title": "", "content": "body" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let created: Post = client
        .post(format!("http://{}/post", addr))
        .bearer_auth(&token)
        .json(&json!({ "title": "Library hours", "content": "Open until 10pm." }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created.title, "Library hours");
    assert_eq!(created.creator, Some(Creator { id: account.id }));
}

#[tokio::test]
async fn only_creator_updates() {
    let api = Arc::new(MemoryHub::empty());
    let addr = spawn_server(api.clone()).await;
    let (author, author_token) = sign_up(addr, "author").await;
    let (_, stranger_token) = sign_up(addr, "stranger").await;
    let id = seed_post(&api, author.id).await;
    let draft = json!({ "title": "Updated", "content": "New schedule." });
    let client = reqwest::Client::new();

    let res = client
        .put(format!("http://{}/post/{}", addr, id))
        .bearer_auth(&stranger_token)
        .json(&draft)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let updated: Post = client
        .put(format!("http://{}/post/{}", addr, id))
        .bearer_auth(&author_token)
        .json(&draft)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated.title, "Updated");
}

#[tokio::test]
async fn only_creator_deletes() {
    let api = Arc::new(MemoryHub::empty());
    let addr = spawn_server(api.clone()).await;
    let (author, author_token) = sign_up(addr, "author").await;
    let (_, stranger_token) = sign_up(addr, "stranger").await;
    let id = seed_post(&api, author.id).await;
    let client = reqwest::Client::new();

    let res = client
        .delete(format!("http://{}/post/{}", addr, id))
        .bearer_auth(&stranger_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(api.posts.lock().await.len(), 1);

    let body: Value = client
        .delete(format!("http://{}/post/{}", addr, id))
        .bearer_auth(&author_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "detail": "Post deleted successfully" }));

    let res = client
        .delete(format!("http://{}/post/{}", addr, id))
        .bearer_auth(&author_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
