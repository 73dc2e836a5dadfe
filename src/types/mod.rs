//! Type definitions for dishhub-admin

mod error;
mod records;
mod summary;

pub use error::*;
pub use records::*;
pub use summary::*;
