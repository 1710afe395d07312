//! Centralized user-facing messages.
//!
//! [`Message`] enumerates every line the application prints; its `Display`
//! implementation lives in [`display`] and the output macros in [`macros`].

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
