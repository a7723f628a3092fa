use crate::api::condition::ConditionSet;
use crate::api::reports::Report;
use crate::error::ValidationError;
use reqwest::Url;
use std::str::FromStr;

pub const DEFAULT_LIMIT: u32 = 1000;

/// Target interpretation mode of a report request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Exact,
    #[default]
    Domain,
    Subdomains,
    Prefix,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Exact, Mode::Domain, Mode::Subdomains, Mode::Prefix];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Exact => "exact",
            Mode::Domain => "domain",
            Mode::Subdomains => "subdomains",
            Mode::Prefix => "prefix",
        }
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .iter()
            .find(|mode| mode.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownMode {
                name: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ValidationError::UnknownDirection {
                name: s.to_string(),
            }),
        }
    }
}

/// Ordered sort columns. Wire form is `column:direction` pairs joined
/// with commas.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    entries: Vec<(String, SortDirection)>,
}

impl OrderBy {
    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        OrderBy {
            entries: vec![(column.into(), direction)],
        }
    }

    pub fn then(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.entries.push((column.into(), direction));
        self
    }

    /// Parses `"col:asc|desc[,col:asc|desc...]"`. Each comma segment is
    /// validated independently.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let mut entries = Vec::new();
        for segment in input.split(',') {
            let (column, direction) =
                segment
                    .split_once(':')
                    .ok_or_else(|| ValidationError::MalformedOrderBy {
                        segment: segment.to_string(),
                    })?;
            if column.trim().is_empty() {
                return Err(ValidationError::MalformedOrderBy {
                    segment: segment.to_string(),
                });
            }
            entries.push((column.to_string(), direction.parse()?));
        }
        Ok(OrderBy { entries })
    }

    pub fn entries(&self) -> &[(String, SortDirection)] {
        &self.entries
    }

    pub fn to_param(&self) -> String {
        self.entries
            .iter()
            .map(|(column, direction)| format!("{}:{}", column, direction.as_str()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A fully validated report request. Construction goes through
/// [`ReportQueryBuilder`]; once built, URL assembly cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    report: Report,
    target: String,
    mode: Mode,
    limit: u32,
    metrics: Option<Vec<String>>,
    order_by: Option<OrderBy>,
    where_filter: Option<ConditionSet>,
    having_filter: Option<ConditionSet>,
}

impl ReportQuery {
    pub fn builder(report: Report, target: impl Into<String>) -> ReportQueryBuilder {
        ReportQueryBuilder {
            report,
            target: target.into(),
            mode: Mode::default(),
            limit: DEFAULT_LIMIT,
            metrics: None,
            order_by: None,
            where_filter: None,
            having_filter: None,
        }
    }

    pub fn report(&self) -> Report {
        self.report
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Key/value pairs in wire order. Optional parameters are omitted
    /// entirely when unset, never sent empty.
    pub fn query_pairs(&self, token: &str) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = vec![
            ("token", token.to_string()),
            ("report", self.report.name().to_string()),
            ("target", self.target.clone()),
            ("mode", self.mode.as_str().to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(metrics) = &self.metrics {
            pairs.push(("select", metrics.join(",")));
        }
        if let Some(order_by) = &self.order_by {
            pairs.push(("order_by", order_by.to_param()));
        }
        if let Some(filter) = &self.where_filter {
            pairs.push(("where", filter.serialize()));
        }
        if let Some(having) = &self.having_filter {
            pairs.push(("having", having.serialize()));
        }
        pairs
    }

    /// Request URL against the given base. Every parameter value is
    /// percent-encoded, including the serialized condition sets. The
    /// target rides through verbatim. Same inputs, same URL.
    pub fn to_url(&self, base_url: &Url, token: &str) -> Url {
        let mut url = base_url.clone();
        {
            let mut serializer = url.query_pairs_mut();
            serializer.clear();
            for (key, value) in self.query_pairs(token) {
                serializer.append_pair(key, &value);
            }
        }
        url
    }
}

#[derive(Debug, Clone)]
pub struct ReportQueryBuilder {
    report: Report,
    target: String,
    mode: Mode,
    limit: u32,
    metrics: Option<Vec<String>>,
    order_by: Option<OrderBy>,
    where_filter: Option<ConditionSet>,
    having_filter: Option<ConditionSet>,
}

impl ReportQueryBuilder {
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Columns for the `select` parameter, comma-joined on the wire.
    pub fn metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics = Some(metrics.into_iter().map(Into::into).collect());
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    /// Row filter, sent as the `where` parameter.
    pub fn filter(mut self, conditions: ConditionSet) -> Self {
        self.where_filter = Some(conditions);
        self
    }

    /// Aggregate filter, sent as the `having` parameter.
    pub fn having(mut self, conditions: ConditionSet) -> Self {
        self.having_filter = Some(conditions);
        self
    }

    pub fn build(self) -> Result<ReportQuery, ValidationError> {
        if self.limit == 0 {
            return Err(ValidationError::InvalidLimit);
        }
        if let Some(metrics) = &self.metrics {
            if metrics.is_empty() || metrics.iter().any(|metric| metric.trim().is_empty()) {
                return Err(ValidationError::EmptyMetrics);
            }
        }
        Ok(ReportQuery {
            report: self.report,
            target: self.target,
            mode: self.mode,
            limit: self.limit,
            metrics: self.metrics,
            order_by: self.order_by,
            where_filter: self.where_filter,
            having_filter: self.having_filter,
        })
    }
}
