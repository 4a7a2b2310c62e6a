//! Assignment & Economy Engine
//!
//! Officer task effects on cities, and the monthly resource flow.

pub mod assignment;
pub mod constants;
pub mod monthly;

pub use assignment::{
    apply_assignment, assign_task, cancel_assignment, process_assignments, AssignmentOutcome,
};
pub use monthly::{process_monthly_economy, settle_city, CityLedger};
