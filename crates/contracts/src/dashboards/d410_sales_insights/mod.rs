pub mod comparison;
pub mod compute;
pub mod dto;

pub use comparison::{compare_latest_years, years_above_threshold};
pub use compute::compute_insights;
pub use dto::*;
