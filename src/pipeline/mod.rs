pub mod extraction;
pub mod features; // Raw field map → ordered feature row
pub mod inference;
pub mod processor; // Analysis orchestrator
pub mod recommendations;

pub use processor::{ErrorKind, ProcessingError, Processor};
