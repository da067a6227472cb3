pub mod histogram;
pub mod spatial;
pub mod statistics;

pub use histogram::*;
pub use spatial::*;
pub use statistics::*;
