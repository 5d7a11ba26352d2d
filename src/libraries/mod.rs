pub mod result_formatter;

pub use result_formatter::{NormalizedListing, ResultFormatter};
