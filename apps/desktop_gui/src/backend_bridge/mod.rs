//! Backend worker: owns the tokio runtime and the store client.

pub mod commands;
pub mod runtime;
