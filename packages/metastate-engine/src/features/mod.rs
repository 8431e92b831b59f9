//! Feature slices
//!
//! requirements → schema → classification → batch → reporting

pub mod batch;
pub mod classification;
pub mod reporting;
pub mod requirements;
pub mod schema;
