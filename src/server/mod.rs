mod extract;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::server::handlers::{accounts, health, posts};
use crate::{
    api::API,
    error::{unexpected_error, Error},
};

pub use extract::AuthUser;

pub type DynAPI = Arc<dyn API + Send + Sync>;

/// Routes of the feed server. Writes need a bearer token from `/auth/token`.
pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/", get(health::check))
        .route("/auth", post(accounts::register))
        .route("/auth/", post(accounts::register))
        .route("/auth/token", post(accounts::token))
        .route("/post", post(posts::create))
        .route("/post/all", get(posts::list))
        .route(
            "/post/:id",
            get(posts::find).put(posts::update).delete(posts::delete),
        )
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let app = router(Arc::new(api) as DynAPI);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!("server error: {}", err);
            unexpected_error()
        })
}
