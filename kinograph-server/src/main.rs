use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kinograph_core::PostgresDatabase;
use kinograph_server::{AppState, config::Config, routes};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "kinograph-server")]
#[command(about = "Film catalog and social-graph REST service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// PostgreSQL connection string (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();

    if let Some(Command::Db(DbCommand::Migrate)) = cli.command {
        return run_db_migrate(&cli.serve).await;
    }

    run_server(cli.serve).await
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut config = Config::load().context("failed to load configuration")?;

    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.database_url.clone() {
        config.database.url = Some(url);
    }

    Ok(config)
}

fn require_database_url(config: &Config) -> anyhow::Result<&str> {
    config
        .database
        .url
        .as_deref()
        .context("no database URL configured; set DATABASE_URL or database.url")
}

async fn run_db_migrate(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let db = PostgresDatabase::new(require_database_url(&config)?)
        .await
        .context("failed to connect to PostgreSQL for migration")?;
    db.run_migrations()
        .await
        .context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;

    let db = PostgresDatabase::new(require_database_url(&config)?)
        .await
        .context("failed to connect to PostgreSQL")?;
    db.run_migrations()
        .await
        .context("database migration failed")?;

    let state = AppState::from_database(&db);
    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("kinograph-server listening on {}", addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
