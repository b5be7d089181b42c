use anyhow::{Context, bail};
use database::{db::create_connection, services::event::EventService};
use importer::events::read_events_file;
use log::info;
use migration::{Migrator, MigratorTrait};

/// Loads an academic calendar CSV into the events table
///
/// Usage: `import-events <csv-path>`, with `DATABASE_URL` set in the environment or `.env`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,sqlx=warn"))
        .init();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: import-events <csv-path>");
    };

    let import =
        read_events_file(&path).with_context(|| format!("could not import events from {path}"))?;
    if import.events.is_empty() {
        bail!("No valid events found in {path}");
    }

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = create_connection(&database_url).await?;
    Migrator::up(&db, None).await?;

    let inserted = EventService::insert_events(&db, import.events).await?;
    info!(
        "Imported {inserted} events from {path} ({} rows skipped)",
        import.skipped
    );

    Ok(())
}
