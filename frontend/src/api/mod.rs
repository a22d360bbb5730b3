pub mod auth;
pub mod client;
mod entities;
mod integrations;
pub mod types;

pub use client::*;
pub use entities::SortKey;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests;
