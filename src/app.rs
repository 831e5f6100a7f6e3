//! Application model: the library, the transport session and the list cursor.

mod model;

pub use model::*;
