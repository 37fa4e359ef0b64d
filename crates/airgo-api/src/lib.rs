// airgo-api: Async Rust client for the AirGo panel node API

pub mod client;
pub mod error;
pub mod models;
pub mod node;
pub mod transport;
pub mod user;

pub use client::{Conditional, PanelClient, PanelResponse};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
