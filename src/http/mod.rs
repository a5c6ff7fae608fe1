//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, metrics)
//!     → request.rs (request ID, envelope extraction + validation)
//!     → handlers.rs (demo / service / camel / httpclient / health)
//!     → response.rs (error mapping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{ValidEnvelope, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
