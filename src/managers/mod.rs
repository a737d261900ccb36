pub mod credits;
pub mod eligibility;
