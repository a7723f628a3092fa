use crate::api::condition::ConditionSet;
use crate::api::query::{DEFAULT_LIMIT, Mode, OrderBy, ReportQuery};
use crate::api::reports::Report;
use crate::error::ValidationError;

/// Report fetch parameters. Defaults match the API: domain mode, 1000
/// rows, no column selection, no filters.
#[derive(Debug, Clone)]
pub struct FetchParams {
    pub target: String,
    pub mode: Mode,
    pub limit: u32,
    pub metrics: Option<Vec<String>>,
    pub order_by: Option<OrderBy>,
    pub where_filter: Option<ConditionSet>,
    pub having_filter: Option<ConditionSet>,
}

impl FetchParams {
    pub fn new(target: impl Into<String>) -> Self {
        FetchParams {
            target: target.into(),
            mode: Mode::default(),
            limit: DEFAULT_LIMIT,
            metrics: None,
            order_by: None,
            where_filter: None,
            having_filter: None,
        }
    }

    /// Runs the parameters through the query builder so every validation
    /// rule applies before anything touches the network.
    pub fn into_query(self, report: Report) -> Result<ReportQuery, ValidationError> {
        let mut builder = ReportQuery::builder(report, self.target)
            .mode(self.mode)
            .limit(self.limit);
        if let Some(metrics) = self.metrics {
            builder = builder.metrics(metrics);
        }
        if let Some(order_by) = self.order_by {
            builder = builder.order_by(order_by);
        }
        if let Some(filter) = self.where_filter {
            builder = builder.filter(filter);
        }
        if let Some(having) = self.having_filter {
            builder = builder.having(having);
        }
        builder.build()
    }
}
