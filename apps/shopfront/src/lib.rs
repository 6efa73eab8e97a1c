//! # Shopfront Library
//!
//! The runnable layer of the storefront: state wrappers, command handlers
//! and the line-oriented shell that drives them.
//!
//! ## Module Organization
//! ```text
//! shopfront/
//! ├── lib.rs          ◄─── You are here (logging setup & run)
//! ├── shell.rs        ◄─── Line parser, dispatcher, JSON replies
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Shared SessionStore (Arc<Mutex>)
//! │   ├── catalog.rs  ◄─── Read-only catalog
//! │   ├── orders.rs   ◄─── Order book (Arc<RwLock>)
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Home/shop/search/product
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── wishlist.rs ◄─── Wishlist
//! │   ├── checkout.rs ◄─── Summary & order placement
//! │   ├── tracking.rs ◄─── Order lookup
//! │   └── config.rs   ◄─── Config retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shell::Shell;
use state::ConfigState;

/// Runs the shell over stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,shopfront=debug; override with RUST_LOG            │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • ConfigState::from_env (SHOPFRONT_* variables over defaults)       │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • SessionState: empty cart & wishlist, drawer closed                │
/// │     • CatalogState: demo catalog                                        │
/// │     • OrderBookState: demo orders                                       │
/// │                                                                         │
/// │  4. Read Commands ────────────────────────────────────────────────────► │
/// │     • one line in, one JSON reply out, until quit or EOF                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> std::io::Result<()> {
    init_tracing();

    info!("Starting Shopfront");

    let config = ConfigState::from_env();
    info!(
        store = %config.store_name,
        tax_rate_bps = config.tax_rate_bps,
        tracking_delay_ms = config.tracking_delay_ms,
        "Configuration loaded"
    );

    let shell = Shell::new(config);
    shell
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfront=trace` - Show trace for shopfront only
/// - Default: INFO, DEBUG for shopfront
///
/// Logs go to stderr; stdout carries only replies.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
