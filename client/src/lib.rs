//! # Codepad Client
//! The document synchronization client: owns the local document, detects
//! genuine local edits, applies room broadcasts in receipt order, and
//! suppresses the echo loop.
//!
//! [`SyncClient`] is a synchronous state machine with no I/O of its own;
//! [`Session`] drives it over a [`transport::Transport`], processing
//! connection events one at a time in arrival order.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

mod client;
mod document;
mod error;
mod events;
mod session;
mod switcher;
pub mod transport;

pub use client::{ConnectionStatus, RemoteApply, SyncClient};
pub use document::Document;
pub use error::TransportError;
pub use events::ClientEvent;
pub use session::{Session, SessionConfig, SessionEvent};
pub use switcher::{LanguageSwitch, LanguageSwitcher};
