//! Wire models for the backend API

mod lga;
mod stats;
mod waste;

pub use lga::*;
pub use stats::*;
pub use waste::*;

pub(crate) use waste::RawWasteType;
