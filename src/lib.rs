// src/lib.rs

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod location;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod scorer;
pub mod session;
pub mod state;

// Re-export specific items for convenience if needed
pub use routes::create_router;
