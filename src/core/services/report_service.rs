use super::types::FetchParams;
use crate::AppError;
use crate::api::client::AhrefsClient;
use crate::api::reports::Report;
use crate::api::response::ResultTable;
use reqwest::Url;

/// Report service wrapping the API client: one awaited round trip per
/// call, flattened records out. The per-report helpers are thin wrappers
/// over `fetch` for callers that want the endpoint spelled out.
pub struct ReportService {
    client: AhrefsClient,
}

impl ReportService {
    pub fn new(client: AhrefsClient) -> Self {
        Self { client }
    }

    /// Fetch any catalog report with the given parameters.
    pub async fn fetch(
        &self,
        report: Report,
        params: FetchParams,
    ) -> Result<ResultTable, AppError> {
        let query = params.into_query(report)?;
        self.client.fetch(&query).await
    }

    /// Request URL for a dry run. Validates the parameters but sends
    /// nothing.
    pub fn build_url(&self, report: Report, params: FetchParams) -> Result<Url, AppError> {
        let query = params.into_query(report)?;
        Ok(self.client.build_url(&query))
    }

    pub async fn ahrefs_rank(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::AhrefsRank, params).await
    }

    pub async fn anchors(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::Anchors, params).await
    }

    pub async fn anchors_refdomains(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::AnchorsRefdomains, params).await
    }

    pub async fn backlinks(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::Backlinks, params).await
    }

    pub async fn backlinks_new_lost(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::BacklinksNewLost, params).await
    }

    pub async fn backlinks_new_lost_counters(
        &self,
        params: FetchParams,
    ) -> Result<ResultTable, AppError> {
        self.fetch(Report::BacklinksNewLostCounters, params).await
    }

    pub async fn backlinks_one_per_domain(
        &self,
        params: FetchParams,
    ) -> Result<ResultTable, AppError> {
        self.fetch(Report::BacklinksOnePerDomain, params).await
    }

    pub async fn broken_backlinks(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::BrokenBacklinks, params).await
    }

    pub async fn broken_links(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::BrokenLinks, params).await
    }

    pub async fn domain_rating(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::DomainRating, params).await
    }

    pub async fn linked_anchors(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::LinkedAnchors, params).await
    }

    pub async fn linked_domains(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::LinkedDomains, params).await
    }

    pub async fn linked_domains_by_type(
        &self,
        params: FetchParams,
    ) -> Result<ResultTable, AppError> {
        self.fetch(Report::LinkedDomainsByType, params).await
    }

    pub async fn metrics(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::Metrics, params).await
    }

    pub async fn metrics_extended(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::MetricsExtended, params).await
    }

    pub async fn pages(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::Pages, params).await
    }

    pub async fn pages_extended(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::PagesExtended, params).await
    }

    pub async fn pages_info(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::PagesInfo, params).await
    }

    pub async fn refdomains(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::Refdomains, params).await
    }

    pub async fn refdomains_by_type(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::RefdomainsByType, params).await
    }

    pub async fn refdomains_new_lost(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::RefdomainsNewLost, params).await
    }

    pub async fn refdomains_new_lost_counters(
        &self,
        params: FetchParams,
    ) -> Result<ResultTable, AppError> {
        self.fetch(Report::RefdomainsNewLostCounters, params).await
    }

    pub async fn refips(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::Refips, params).await
    }

    pub async fn subscription_info(&self, params: FetchParams) -> Result<ResultTable, AppError> {
        self.fetch(Report::SubscriptionInfo, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_validation_fails_before_any_request() {
        // Unreachable base: a network error here would mean validation
        // ran after the request was sent.
        let client = AhrefsClient::with_base_url("http://127.0.0.1:1", "secret").unwrap();
        let service = ReportService::new(client);

        let mut params = FetchParams::new("ahrefs.com");
        params.limit = 0;
        let err = service.fetch(Report::Backlinks, params).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::InvalidLimit)
        ));
    }

    #[tokio::test]
    async fn test_domain_rating_helper_targets_its_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("report", "domain_rating"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "domain": {"domain_rating": "71", "ahrefs_top": 1234}
            })))
            .mount(&server)
            .await;

        let client = AhrefsClient::with_base_url(&server.uri(), "secret").unwrap();
        let service = ReportService::new(client);
        let table = service
            .domain_rating(FetchParams::new("ahrefs.com"))
            .await
            .unwrap();

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.columns, vec!["ahrefs_top", "domain_rating"]);
    }

    #[tokio::test]
    async fn test_anchors_helper_targets_its_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("report", "anchors"))
            .and(query_param("mode", "subdomains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "anchors": [{"anchor": "seo", "backlinks": 12}]
            })))
            .mount(&server)
            .await;

        let client = AhrefsClient::with_base_url(&server.uri(), "secret").unwrap();
        let service = ReportService::new(client);

        let mut params = FetchParams::new("ahrefs.com");
        params.mode = crate::api::query::Mode::Subdomains;
        let table = service.anchors(params).await.unwrap();

        assert_eq!(table.columns, vec!["anchor", "backlinks"]);
    }

    #[test]
    fn test_build_url_for_dry_run() {
        let client = AhrefsClient::with_base_url("http://example.test", "secret").unwrap();
        let service = ReportService::new(client);

        let url = service
            .build_url(Report::Refips, FetchParams::new("ahrefs.com"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://example.test/?token=secret&report=refips&target=ahrefs.com&mode=domain&limit=1000"
        );

        let mut params = FetchParams::new("ahrefs.com");
        params.metrics = Some(vec!["  ".to_string()]);
        let err = service.build_url(Report::Refips, params).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::EmptyMetrics)
        ));
    }
}
