pub mod aggregations;
pub mod channels;
pub mod history;
pub mod sql;
