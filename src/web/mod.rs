//! Web module for mediabin: router, handlers, session middleware, and the
//! server entry point.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
