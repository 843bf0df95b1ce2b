use anyhow::Result;
use std::env;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const LOG_FILE: &str = "stockdeck.log";

fn main() -> Result<()> {
    init_tracing()?;

    // Backend address: first CLI argument, then env var, then the default
    // the server binds when run locally.
    let base_url = env::args()
        .nth(1)
        .or_else(|| env::var("STOCKDECK_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    tracing::info!(%base_url, version = stockdeck::VERSION, "starting dashboard");
    run_dashboard(&base_url)
}

/// Log to a file; stdout belongs to the terminal UI.
fn init_tracing() -> Result<()> {
    let file = std::fs::File::create(LOG_FILE)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[cfg(feature = "tui")]
fn run_dashboard(base_url: &str) -> Result<()> {
    use stockdeck::app::App;
    use stockdeck::gateway::HttpGateway;

    let mut app = App::new(HttpGateway::new(base_url));
    app.bootstrap();
    stockdeck::ui::run_ui(&mut app)
}

#[cfg(not(feature = "tui"))]
fn run_dashboard(_base_url: &str) -> Result<()> {
    eprintln!("TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
