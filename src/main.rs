use clap::Parser;
use taskboard::config::Config;
use taskboard::db::Db;
use taskboard::routes::create_router;
use taskboard::server;
use taskboard::state::AppState;
use taskboard::templates::Templates;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::parse();
    let database_url = config.database_url()?;
    tracing::info!(database_url = %database_url, "Opening database");

    let db = Db::connect(&database_url).await?;
    let templates = Templates::new()?;

    let router = create_router(AppState::new(db, templates));
    server::run(&config.socket_addr(), router).await
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("taskboard=debug,tower_http=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}
