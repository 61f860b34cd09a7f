//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{ChatSocket, TestServer};
//!
//! #[tokio::test]
//! async fn test_parrot() {
//!     let server = TestServer::spawn().await;
//!     let mut chat = ChatSocket::connect(&server.base_url, "session-1").await;
//!     chat.expect_welcome().await;
//!     chat.send("/parrot hi").await;
//!     assert_eq!(chat.next_message().await, "Parroting: hi");
//! }
//! ```

mod client;
mod constants;
mod fixtures;
mod server;

// Public API - this is what tests import
pub use client::{ChatSocket, PlaylistSocket, TestClient};
pub use constants::*;
pub use server::TestServer;
