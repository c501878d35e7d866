// charge/mod.rs
// Re-exports for the charge module

mod types;
mod set;

pub use types::*;
pub use set::*;
