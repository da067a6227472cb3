pub mod dashboard;
pub mod faults;
pub mod felt_area;
pub mod layer;
pub mod points;
pub mod symbology;
pub mod view;

pub use dashboard::{DashboardConfig, DashboardFrame, DashboardInputs, recompute};
pub use layer::*;
