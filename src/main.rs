use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use estate_favorites::normalizer::PLACEHOLDER_ASSET;
use estate_favorites::{
    Config, FavoriteEntry, FavoritesStore, FileStorage, HttpFavoritesGateway, ImageSource,
    Property, SessionManager, UserSession,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "estate-favorites", about = "Manage saved properties from the command line")]
struct Cli {
    /// Backend root, overrides ESTATE_API_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Store a session for this device
    Login {
        email: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show saved properties
    List {
        /// Print the view-models as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save or unsave the property described in a JSON file
    Toggle { property: PathBuf },
    /// Unsave a property by id
    Remove { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    let sessions = SessionManager::new(Arc::new(FileStorage::new(&config.storage_dir)));
    let gateway = Arc::new(HttpFavoritesGateway::new(&config)?);
    let store = FavoritesStore::new(gateway, sessions.clone(), config.asset_host.clone());

    info!("🏠 Estate Favorites ({})", config.base_url);

    match cli.command {
        Command::Login { email, name } => {
            let mut session = UserSession::new(email);
            session.name = name;
            sessions.login(&session).await?;
            println!("Signed in as {}", session.email);
        }
        Command::Logout => {
            store.sign_out().await?;
            println!("Signed out");
        }
        Command::List { json } => {
            store.load_favorites().await.map_err(alert)?;
            let favorites = store.favorites();
            if json {
                println!("{}", serde_json::to_string_pretty(&favorites)?);
            } else {
                print_favorites(&favorites);
            }
        }
        Command::Toggle { property } => {
            let raw = tokio::fs::read_to_string(&property)
                .await
                .with_context(|| format!("Failed to read {}", property.display()))?;
            let property: Property =
                serde_json::from_str(&raw).context("Property file is not a valid listing")?;

            store.load_favorites().await.map_err(alert)?;
            let added = store.toggle_favorite(&property).await.map_err(alert)?;
            println!(
                "{} {}",
                if added { "❤️  Saved" } else { "Removed" },
                property.name
            );
        }
        Command::Remove { id } => {
            store.remove_favorite(&id).await.map_err(alert)?;
            println!("Removed {}", id);
        }
    }

    Ok(())
}

/// Shows the user-facing text and keeps the detailed error for the exit report.
fn alert(err: estate_favorites::FavoritesError) -> anyhow::Error {
    eprintln!("⚠️  {}", err.user_message());
    anyhow::Error::new(err)
}

fn print_favorites(favorites: &[FavoriteEntry]) {
    if favorites.is_empty() {
        println!("No saved properties yet");
        return;
    }

    println!("\n✅ {} saved properties\n", favorites.len());
    for (i, favorite) in favorites.iter().enumerate() {
        println!("{}. {} ({}{})", i + 1, favorite.name, favorite.price, favorite.price_unit);
        if !favorite.location.is_empty() {
            println!("   Location: {}", favorite.location);
        }
        println!("   Rating: {:.1}", favorite.rating);
        if !favorite.facilities.is_empty() {
            println!("   Facilities: {}", favorite.facilities.join(", "));
        }
        let image = match &favorite.image {
            ImageSource::Uri(uri) => uri.as_str(),
            ImageSource::Bundled(_) => "bundled asset",
            ImageSource::Placeholder => PLACEHOLDER_ASSET,
        };
        println!("   Image: {}", image);
        println!("   ID: {}", favorite.id);
        println!();
    }
}
