//! mm-assets: Wall-set mapping from visibility codes to the pieces the view draws.

pub mod mapping;
pub mod registry;

pub use mapping::*;
pub use registry::*;
