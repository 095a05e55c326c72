//! # Codepad Sandbox
//! Runs untrusted buffer contents under a language profile and captures
//! their output deterministically.
//!
//! The sandbox owns its runtime-readiness state: interpreters are probed
//! once, asynchronously, at construction, and [`ExecutionSandbox::run`]
//! fails fast with [`SandboxError::RuntimeNotReady`] until the probe for
//! the requested profile has succeeded. User-code failures never escape
//! `run`; they are captured into the [`ExecutionOutcome`].

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

mod console;
mod error;
mod javascript;
mod outcome;
mod python;
mod runtime;
mod sandbox;

pub use console::OutputConsole;
pub use error::SandboxError;
pub use javascript::JavaScriptRuntime;
pub use outcome::ExecutionOutcome;
pub use python::PythonRuntime;
pub use runtime::{Capture, CodeRuntime, ExecutionLimits};
pub use sandbox::{ExecutionSandbox, SandboxConfig};
