use dbu_hub::auth::TokenIssuer;
use dbu_hub::config::ServerConfig;
use dbu_hub::db::PgPool;
use dbu_hub::engine::Engine;
use dbu_hub::error::Error;
use dbu_hub::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::load()?;

    let PgPool(pool) = PgPool::new(&config.database_url, config.database_max_connections).await?;

    let tokens = TokenIssuer::new(&config.auth_secret_key, config.token_lifetime_minutes);
    let engine = Engine::new(pool, tokens).await?;

    serve(engine, config.listen_addr).await
}
