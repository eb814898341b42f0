//! Safe SQL construction: identifiers from introspected metadata only,
//! values as bind parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
