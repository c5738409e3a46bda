//! LegalBot Rust SDK
//!
//! Session controllers and the HTTP transport for the LegalBot backend.
//!
//! # Example
//!
//! ```no_run
//! use legalbot_domain::Domain;
//! use legalbot_sdk::{Assistant, HttpTransport};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), legalbot_sdk::SdkError> {
//! let transport = HttpTransport::new("http://localhost:8080")?;
//! let assistant = Assistant::new(Arc::new(transport));
//!
//! assistant.submit(Domain::CodeSection, "IPC for murder based on intention?").await;
//!
//! for message in assistant.controller(Domain::CodeSection).state().messages {
//!     println!("{:?}: {}", message.role, message.content);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assistant;
mod client;
mod error;
mod mock;
mod session;

pub use assistant::Assistant;
pub use client::HttpTransport;
pub use error::SdkError;
pub use mock::{Gate, MockCall, MockReply, MockTransport};
pub use session::{IgnoreReason, SessionController, SubmitOutcome};
