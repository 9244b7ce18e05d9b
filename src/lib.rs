//! A thin client for the Helicone prompt generate endpoint.
//!
//! A call turns a prompt id (or full [`RequestParams`]) into headers and a
//! JSON body, performs a single POST, and returns the reply text.
//!
//! ```no_run
//! # async fn run() -> Result<(), helicone_generate::Error> {
//! use helicone_generate::{generate, RequestParams};
//!
//! let reply = generate("new-prompt-19").await?;
//! let reply = generate(RequestParams::new("new-prompt-19").with_input("number", "2")).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod transport;
pub mod types;

// Re-export core types for easy usage
pub use client::{generate, GenerateClient};
pub use config::{Environment, GenerateConfig};
pub use error::Error;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use types::*;
