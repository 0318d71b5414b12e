//! Safe SQL builder: identifiers from table layouts only, values as parameters.

mod builder;
pub use builder::*;
