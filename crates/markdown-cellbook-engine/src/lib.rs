pub mod io;
pub mod languages;
pub mod models;
pub mod parsing;
pub mod writing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use languages::{decode_fence_tag, encode_language, supported_languages};
pub use models::{cell::*, notebook_file::*};
pub use parsing::parse;
pub use writing::serialize;
