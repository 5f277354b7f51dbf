//! UI layer: HTTP routing and the WebSocket session handler.

pub mod handler;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
