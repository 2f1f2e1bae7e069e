//! Project configuration loading and schema definitions
//!
//! Platform constants consumed by the build configuration resolver.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
