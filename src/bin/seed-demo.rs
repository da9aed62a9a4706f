//! Demo data seed script
//!
//! Creates a handful of tags and focus modes so the API has something to
//! serve on a fresh database.
//!
//! Usage:
//!   DATABASE_URL=... ./seed-demo [--reset]
//!
//!   --reset  : delete all existing focus modes and tags first

use anyhow::{Context, Result};
use clap::Parser;

use focus_api::{
    config::Config,
    db,
    models::{
        focus::FocusMode,
        tag::{CreateTagRequest, Tag},
    },
    services::{
        focus::{FocusModeStore, PgFocusModeStore},
        tags::{PgTagStore, TagStore},
    },
};

#[derive(Parser)]
#[command(name = "seed-demo", about = "Seed demo tags and focus modes")]
struct Args {
    /// Delete existing focus modes and tags before seeding
    #[arg(long)]
    reset: bool,
}

const DEMO_TAGS: &[(&str, &str)] = &[
    ("work", "#3b82f6"),
    ("email", "#f59e0b"),
    ("reading", "#10b981"),
    ("writing", "#8b5cf6"),
];

const DEMO_FOCUS_MODES: &[(&str, &[&str])] = &[
    ("Deep Work", &["work", "writing"]),
    ("Inbox Zero", &["email"]),
    ("Study", &["reading", "writing"]),
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url, 2)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&pool).await.context("Failed to run migrations")?;

    if args.reset {
        tracing::info!("Removing existing focus modes and tags...");
        sqlx::query("TRUNCATE focus_mode_tags, focus_modes, tags RESTART IDENTITY")
            .execute(&pool)
            .await
            .context("Failed to truncate tables")?;
    }

    let tag_store = PgTagStore::new(pool.clone());
    let mut tags: Vec<Tag> = Vec::new();
    for (name, color) in DEMO_TAGS {
        let req = CreateTagRequest {
            name: name.to_string(),
            color: Some(color.to_string()),
        };
        let tag = tag_store
            .create(&req)
            .await
            .with_context(|| format!("Failed to create tag {name}"))?;
        tags.push(tag);
    }
    tracing::info!("Created {} tags", tags.len());

    let focus_store = PgFocusModeStore::new(pool.clone());
    for (name, tag_names) in DEMO_FOCUS_MODES {
        let mode = FocusMode {
            id: 0,
            name: name.to_string(),
            tags: tags
                .iter()
                .filter(|t| tag_names.contains(&t.name.as_str()))
                .cloned()
                .collect(),
            last_used_at: None,
        };
        let created = focus_store
            .create(&mode)
            .await
            .with_context(|| format!("Failed to create focus mode {name}"))?;
        tracing::info!("Created focus mode {} ({})", created.name, created.id);
    }

    tracing::info!("Demo data seeded");
    Ok(())
}
