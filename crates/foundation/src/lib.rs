pub mod circle;
pub mod dateline;
pub mod error;
pub mod felt;
pub mod math;

// Foundation crate: small, well-tested geometric primitives only.
pub use circle::*;
pub use dateline::*;
pub use error::*;
pub use felt::*;
