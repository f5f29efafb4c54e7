//! Backend API operations

mod comparison;
mod landing;
mod lgas;
mod similarity;
mod waste_types;

pub use comparison::*;
pub use similarity::*;
