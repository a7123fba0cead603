//! Stylist HTTP server binary

use stylist::{server, Catalog, PreferenceStore, Recommender, ServiceConfig, SessionState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    println!("Stylist outfit recommender");
    println!("   Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let config = ServiceConfig::from_env();

    let catalog = match &config.catalog_path {
        Some(path) => {
            println!("✓ Catalog: {}", path.display());
            Catalog::from_path(path)?
        }
        None => {
            println!("✓ Catalog: built-in wardrobe");
            Catalog::builtin()?
        }
    };
    println!("✓ {} items loaded", catalog.len());

    if let Some(seed) = config.seed {
        println!("✓ Fixed seed: {}", seed);
    }
    let session = SessionState::new(config.recent_capacity, config.seed);
    println!("✓ Recent-usage window: {}", session.recent_capacity());
    let recommender = Recommender::new(catalog, session)
        .with_store(PreferenceStore::new(&config.preferences_path));
    println!("✓ Preferences: {}", config.preferences_path.display());

    println!("✓ Starting HTTP server on port {}...", config.port);
    println!();

    server::run_server(recommender, config.port).await?;

    Ok(())
}
