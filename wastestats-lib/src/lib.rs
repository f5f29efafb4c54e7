//! WasteStats API client library
//!
//! A Rust async client for the NSW household waste statistics backend: LGA and
//! waste-type catalogues, headline survey statistics, side-by-side LGA
//! comparisons, and recycling-rate similarity searches.

pub mod api;
pub mod error;
pub mod model;

mod client;

pub use client::*;
