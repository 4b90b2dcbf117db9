//! Domain models for the intake system.

mod choices;
mod registration;

pub use choices::*;
pub use registration::*;
