/// LoopDeck Player - headless booth slideshow player
use clap::{Parser, Subcommand};
use loopdeck_core::PersistenceStore;
use loopdeck_player::{open_store, PlayerConfig, PlayerSession};
use loopdeck_playback::build_deck_with;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "loopdeck-player")]
#[command(about = "LoopDeck booth slideshow player", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./loopdeck.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the stored deck until interrupted
    Play,
    /// Export the stored deck to a JSON backup file
    Backup {
        /// Backup file to write
        file: PathBuf,
    },
    /// Restore the stored deck from a JSON backup file
    Restore {
        /// Backup file to read
        file: PathBuf,
    },
    /// Print the deck as it would play
    Inspect {
        /// Print the built deck as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "loopdeck_player=info,loopdeck_sync=info,loopdeck_playback=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = PlayerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Play => play(&config).await?,
        Commands::Backup { file } => backup(&config, file).await?,
        Commands::Restore { file } => restore(&config, file).await?,
        Commands::Inspect { json } => inspect(&config, json).await?,
    }

    Ok(())
}

async fn play(config: &PlayerConfig) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    tracing::info!(
        key = %config.project_key(),
        database = %config.storage.database_url,
        "Starting LoopDeck player"
    );

    let mut session = PlayerSession::new(store, config.sync_config(), config.clock_config());
    session
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    Ok(())
}

async fn backup(config: &PlayerConfig, file: PathBuf) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let backup = loopdeck_storage::export_backup(&store, &config.project_key(), &file).await?;

    println!(
        "Backed up {} slides (version {}) to {}",
        backup.metadata.total_slides,
        backup.metadata.backup_version,
        file.display()
    );
    Ok(())
}

async fn restore(config: &PlayerConfig, file: PathBuf) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let saved = loopdeck_storage::restore_backup(&store, &config.project_key(), &file).await?;

    println!(
        "Restored {} as version {}",
        file.display(),
        saved.version
    );
    Ok(())
}

async fn inspect(config: &PlayerConfig, json: bool) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let key = config.project_key();

    let Some(record) = store.load(&key).await? else {
        println!("No deck stored under '{}'", key);
        return Ok(());
    };

    let deck = build_deck_with(&record.slides, &record.settings);
    if json {
        println!("{}", serde_json::to_string_pretty(&deck)?);
        return Ok(());
    }

    let clock = config.clock_config();
    println!(
        "Deck '{}' version {}: {} slides, {} instances (featured repeats {})",
        key,
        record.version,
        record.slides.len(),
        deck.len(),
        record.settings.featured_repeats
    );
    for (index, instance) in deck.iter().enumerate() {
        let timing = if instance.slide.is_externally_timed() {
            "until video ends".to_string()
        } else {
            format!("{:.2}s", clock.dwell(&instance.slide).as_secs_f64())
        };
        println!(
            "{:>3}  {:<22} {:<18} {}",
            index + 1,
            instance.id.to_string(),
            instance.slide.kind.to_string(),
            timing
        );
    }
    Ok(())
}
