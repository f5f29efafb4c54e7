//! Page view models
//!
//! One state owner per dashboard page. Pages hold the API client, an error
//! sink, and the stale-response guard; the host renders their state and
//! feeds user input back in.

mod comparison;
mod landing;
mod similarity;

pub use comparison::*;
pub use landing::*;
pub use similarity::*;
