pub mod client;
pub mod rule;

pub use client::{EpgStationClient, RuleReceipt};
pub use rule::{AddRuleOption, ReserveOption, SaveOption, SearchOption, SearchTime, ALL_WEEK};
