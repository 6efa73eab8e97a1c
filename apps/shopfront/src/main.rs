//! # Shopfront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront                                        │
//! │                                                                         │
//! │  stdin ──► shell ──► commands/ ──► shopfront-core ──► JSON ──► stdout   │
//! │                                                                         │
//! │  main.rs ────► Starts the runtime                                       │
//! │  lib.rs ─────► Sets up logging, config, state and the shell             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```text
//! $ printf 'add 4\nadd 4\ncart\n' | shopfront
//! {"ok":true,"data":{"items":[...],"totals":{"lineCount":1,"itemCount":1,...}}}
//! ```

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // The actual setup is in lib.rs for better testability
    shopfront::run().await
}
