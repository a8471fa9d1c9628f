/// E-Bazar Server - bearer-token-gated shop backend
use clap::{Parser, Subcommand};
use ebazar_core::{NewUser, Product, Role, Store};
use ebazar_server::{api, config::ServerConfig, services::TokenService, state::AppState};
use ebazar_storage::Database;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ebazar-server")]
#[command(about = "E-Bazar shop backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a user account directly in the store
    AddUser {
        /// Email address (account identity)
        #[arg(short, long)]
        email: String,
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Account role: customer or admin
        #[arg(short, long, default_value = "customer")]
        role: String,
    },
    /// List registered customer accounts
    ListUsers,
    /// Load catalog entries from a JSON file
    Seed {
        /// Path to a JSON array of products
        file: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ebazar_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            serve().await?;
        }
        Commands::AddUser { email, name, role } => {
            add_user(&email, &name, &role).await?;
        }
        Commands::ListUsers => {
            list_users().await?;
        }
        Commands::Seed { file } => {
            seed(&file).await?;
        }
    }

    Ok(())
}

async fn open_database() -> anyhow::Result<(ServerConfig, Arc<Database>)> {
    let config = ServerConfig::load()?;
    let db = Database::new(&config.storage.database_url).await?;
    Ok((config, Arc::new(db)))
}

async fn serve() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting E-Bazar server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let db = Arc::new(Database::new(&config.storage.database_url).await?);
    tracing::info!("Database connected");

    let tokens = Arc::new(TokenService::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_validity_hours,
    ));

    let app = api::router(AppState::new(db, tokens));

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

async fn add_user(email: &str, name: &str, role: &str) -> anyhow::Result<()> {
    let role = Role::from_str(role).map_err(|e| anyhow::anyhow!(e))?;
    let (_, db) = open_database().await?;

    let user = db
        .create_user(NewUser {
            email: email.to_string(),
            name: name.to_string(),
            role,
        })
        .await?;

    println!("Created {} user: {} <{}>", user.role, user.name, user.email);
    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let (_, db) = open_database().await?;

    let customers = db.list_customers().await?;
    if customers.is_empty() {
        println!("No customers registered");
        return Ok(());
    }

    for user in customers {
        println!("{} <{}> [{}]", user.name, user.email, user.role);
    }
    Ok(())
}

async fn seed(file: &str) -> anyhow::Result<()> {
    let contents = tokio::fs::read_to_string(file).await?;
    let products: Vec<Product> = serde_json::from_str(&contents)?;

    let (_, db) = open_database().await?;

    let count = products.len();
    for product in products {
        db.create_product(product).await?;
    }

    println!("Seeded {count} products");
    Ok(())
}
