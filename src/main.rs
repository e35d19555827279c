use std::net::SocketAddr;

use clap::Parser;
use traitquiz::{db::Db, AppState};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// SQLite database URL, e.g. `sqlite://traitquiz.db`.
    #[arg(long, env, default_value = "sqlite://traitquiz.db")]
    database_url: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: SocketAddr,

    /// Mark cookies `Secure`; enable when served over HTTPS.
    #[arg(long, env)]
    secure_cookies: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,axum=info,traitquiz=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let db = Db::new(&args.database_url).await?;
    let app = traitquiz::router(AppState::new(db, args.secure_cookies));

    let listener = tokio::net::TcpListener::bind(args.address).await?;
    tracing::info!("listening on http://{}", args.address);
    axum::serve(listener, app).await?;

    Ok(())
}
