//! Core export types: ledger data model, column configuration, field
//! resolution, row materialization, text encoding and the export job
//! state machine.

mod builder;
mod config;
mod encoding;
mod error;
mod fields;
mod job;
mod rows;
mod types;

pub use builder::*;
pub use config::*;
pub use encoding::*;
pub use error::*;
pub use fields::*;
pub use job::*;
pub use rows::*;
pub use types::*;
