use clap::Parser;
use cookmate::{
    api::{handlers::AppState, routes},
    catalog::{Catalog, CatalogStore, ReloadWatcher},
    cli::{commands, Cli, Commands},
    config::Settings,
    search::SearchRequest,
    Error, Result,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging; stderr keeps command output on stdout clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cookmate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let mut settings = Settings::from_env()?;
    if let Some(data) = cli.data {
        settings.dataset.path = data;
    }
    settings.validate()?;

    // Handle commands
    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Search {
            ingredients,
            category,
            subcategory,
            mode,
            length,
            limit,
        } => {
            let catalog = Catalog::load(&settings.dataset.path)?;
            let request = SearchRequest {
                category,
                subcategory,
                ingredients,
                mode,
                length,
                max_results: settings.search.clamp_results(limit),
                quick_max_chars: settings.search.quick_max_chars,
            };
            commands::search(&catalog, &request)?;
        }
        Commands::Categories { category } => {
            let catalog = Catalog::load(&settings.dataset.path)?;
            commands::categories(&catalog, category.as_deref())?;
        }
        Commands::Ingredients {
            category,
            subcategory,
            top,
        } => {
            let catalog = Catalog::load(&settings.dataset.path)?;
            commands::common_ingredients(&catalog, &category, &subcategory, top, &settings.search)?;
        }
        Commands::Stats => {
            let catalog = Catalog::load(&settings.dataset.path)?;
            commands::stats(&catalog)?;
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting CookMate server");
    info!("Dataset: {}", settings.dataset.path.display());
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    // Load the catalog once; a broken dataset stops startup
    let store = Arc::new(CatalogStore::open(&settings.dataset.path)?);
    let recipe_count = store.current().await.len();

    let _watcher_handle =
        ReloadWatcher::new(store.clone(), settings.dataset.reload_interval_seconds).start();

    let state = AppState {
        store,
        settings: settings.clone(),
    };

    let app = routes::create_router(state, &settings)?;

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("CookMate Recipe Search");
    println!("========================================");
    println!("Address: http://{addr}");
    println!("Recipes: {recipe_count}");
    println!("\nAPI Endpoints:");
    println!("  GET  /api/search");
    println!("  GET  /api/recipes/:id");
    println!("  GET  /api/categories");
    println!("  GET  /api/subcategories");
    println!("  GET  /api/ingredients/common");
    println!("  GET  /api/stats");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}
