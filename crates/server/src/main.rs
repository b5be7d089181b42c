use database::db::create_connection;
use log::{info, warn};
use migration::{Migrator, MigratorTrait};
use server::{
    app,
    config::Config,
    state::AppState,
    storage::{DropboxStorage, FileStorage},
    utils::shutdown::shutdown_signal,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,sqlx=warn"))
        .init();

    let config = Config::from_env()?;

    let db = create_connection(&config.database_url).await?;
    Migrator::up(&db, None).await?;
    info!("Database migrations are up to date");

    let storage = config
        .dropbox_access_token
        .clone()
        .map(|token| Arc::new(DropboxStorage::new(token)) as Arc<dyn FileStorage>);
    if storage.is_none() {
        warn!("DROPBOX_ACCESS_TOKEN is not set, file uploads are disabled");
    }
    if config.admin_token.is_none() {
        warn!("ADMIN_TOKEN is not set, bulk event commands are disabled");
    }

    let address = config.bind_address();
    let app = app(AppState::new(db, storage, config));

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Running axum on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
