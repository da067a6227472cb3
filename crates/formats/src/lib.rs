pub mod earthquake_csv;
pub mod geojson;
pub mod tectonic;

pub use earthquake_csv::*;
pub use geojson::*;
pub use tectonic::*;
