pub mod analysis;
pub mod dataset;
pub mod error;
pub mod felt_area;

pub use dataset::*;
pub use error::*;
pub use felt_area::*;
