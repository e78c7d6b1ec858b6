pub mod channels;
pub mod lifetime_value_aggregations;
pub mod lifetime_value_history;
