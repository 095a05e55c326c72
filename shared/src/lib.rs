//! # Codepad Shared
//! Wire protocol, room identity, and language profiles shared between the
//! codepad client and server crates.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

mod error;
mod language;
mod messages;
mod room;

pub use error::{ProtocolError, UnknownLanguageError};
pub use language::{LanguageId, LanguageProfile};
pub use messages::SyncMessage;
pub use room::RoomIdentity;
