use clap::Parser;
use examgen::db::Db;
use examgen::generation::GenerationClient;
use examgen::AppState;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// SQLite database URL.
    #[arg(long, env, default_value = "sqlite://examgen.db")]
    database_url: String,

    /// Cohere API key for quiz generation.
    #[clap(env)]
    cohere_api_key: String,

    /// Base URL of the generation provider.
    #[arg(long, env, default_value = "https://api.cohere.ai")]
    cohere_base_url: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: String,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,examgen=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let db = Db::new(&args.database_url).await?;
    let generator = GenerationClient::new(args.cohere_api_key, args.cohere_base_url)?;
    let app = examgen::router(AppState { db, generator });

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", args.address);
    axum::serve(listener, app).await?;

    Ok(())
}
