pub mod alias_index;
pub mod credits;
pub mod dispatch;
pub mod eligibility;
pub mod logger;
pub mod matcher;
pub mod suggest;
