//! SQL for each table. Free functions over a borrowed `Connection`; the
//! engine decides which pooled connection they run on.

pub mod history;
pub mod users;
