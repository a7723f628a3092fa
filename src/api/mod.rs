pub mod client;
pub mod condition;
pub mod query;
pub mod reports;
pub mod response;

pub use client::{AhrefsClient, DEFAULT_BASE_URL};
pub use condition::{Condition, ConditionSet, ConditionValue, Operator};
pub use query::{Mode, OrderBy, ReportQuery, ReportQueryBuilder, SortDirection};
pub use reports::Report;
pub use response::{ResultTable, extract_records};
