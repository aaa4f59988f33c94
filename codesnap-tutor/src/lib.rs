//! # CodeSnap Tutor
//!
//! Client for the OpenAI-compatible chat-completions API (Groq by default)
//! that backs the explain and tutor features.
//!
//! Both operations always produce a value the UI can render: a missing API
//! key or a failed call falls back to a fixed message instead of an error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use codesnap_tutor::{TutorClient, TutorConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TutorConfig::new().with_api_key("gsk-...");
//!     let client = TutorClient::new(config)?;
//!
//!     let explanation = client
//!         .explain("python", "print(x)", "NameError: name 'x' is not defined")
//!         .await;
//!     println!("{}", explanation.explanation);
//!
//!     let reply = client.tutor("What is a list comprehension?", "python").await;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod types;

pub use client::TutorClient;
pub use config::{TutorConfig, DEFAULT_API_URL, DEFAULT_MODEL};
pub use error::Error;
pub use types::*;

/// Result type for tutor operations
pub type Result<T> = std::result::Result<T, Error>;
