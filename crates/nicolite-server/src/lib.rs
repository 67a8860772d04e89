//! Niconico relay HTTP server.
//!
//! Routes:
//! - `GET /api/parse?q=` turns a URL or id into embed links
//! - `GET /api/search?q=&limit=&offset=&sort=` relays the snapshot search API
//! - `GET /api/diag/:id` echoes a preview of the watch-info API response
//! - everything else is served from the public asset directory
//!
//! # Usage
//!
//! ```no_run
//! use nicolite_server::{create_router, AppState, ServerConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env();
//! let app = create_router(AppState::new(config.clone())?);
//! let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
