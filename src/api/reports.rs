use crate::error::ValidationError;
use std::str::FromStr;

/// A report endpoint of the v2 API. Each report knows the wire name sent
/// as the `report` parameter and the key the API nests its results under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    AhrefsRank,
    Anchors,
    AnchorsRefdomains,
    Backlinks,
    BacklinksNewLost,
    BacklinksNewLostCounters,
    BacklinksOnePerDomain,
    BrokenBacklinks,
    BrokenLinks,
    DomainRating,
    LinkedAnchors,
    LinkedDomains,
    LinkedDomainsByType,
    Metrics,
    MetricsExtended,
    Pages,
    PagesExtended,
    PagesInfo,
    Refdomains,
    RefdomainsByType,
    RefdomainsNewLost,
    RefdomainsNewLostCounters,
    Refips,
    SubscriptionInfo,
}

impl Report {
    pub const ALL: [Report; 24] = [
        Report::AhrefsRank,
        Report::Anchors,
        Report::AnchorsRefdomains,
        Report::Backlinks,
        Report::BacklinksNewLost,
        Report::BacklinksNewLostCounters,
        Report::BacklinksOnePerDomain,
        Report::BrokenBacklinks,
        Report::BrokenLinks,
        Report::DomainRating,
        Report::LinkedAnchors,
        Report::LinkedDomains,
        Report::LinkedDomainsByType,
        Report::Metrics,
        Report::MetricsExtended,
        Report::Pages,
        Report::PagesExtended,
        Report::PagesInfo,
        Report::Refdomains,
        Report::RefdomainsByType,
        Report::RefdomainsNewLost,
        Report::RefdomainsNewLostCounters,
        Report::Refips,
        Report::SubscriptionInfo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Report::AhrefsRank => "ahrefs_rank",
            Report::Anchors => "anchors",
            Report::AnchorsRefdomains => "anchors_refdomains",
            Report::Backlinks => "backlinks",
            Report::BacklinksNewLost => "backlinks_new_lost",
            Report::BacklinksNewLostCounters => "backlinks_new_lost_counters",
            Report::BacklinksOnePerDomain => "backlinks_one_per_domain",
            Report::BrokenBacklinks => "broken_backlinks",
            Report::BrokenLinks => "broken_links",
            Report::DomainRating => "domain_rating",
            Report::LinkedAnchors => "linked_anchors",
            Report::LinkedDomains => "linked_domains",
            Report::LinkedDomainsByType => "linked_domains_by_type",
            Report::Metrics => "metrics",
            Report::MetricsExtended => "metrics_extended",
            Report::Pages => "pages",
            Report::PagesExtended => "pages_extended",
            Report::PagesInfo => "pages_info",
            Report::Refdomains => "refdomains",
            Report::RefdomainsByType => "refdomains_by_type",
            Report::RefdomainsNewLost => "refdomains_new_lost",
            Report::RefdomainsNewLostCounters => "refdomains_new_lost_counters",
            Report::Refips => "refips",
            Report::SubscriptionInfo => "subscription_info",
        }
    }

    /// Top-level response key holding this report's records.
    pub fn result_key(&self) -> &'static str {
        match self {
            Report::AhrefsRank | Report::Pages | Report::PagesExtended | Report::PagesInfo => {
                "pages"
            }
            Report::Anchors | Report::LinkedAnchors => "anchors",
            Report::AnchorsRefdomains
            | Report::Refdomains
            | Report::RefdomainsByType
            | Report::RefdomainsNewLost => "refdomains",
            Report::Backlinks
            | Report::BacklinksNewLost
            | Report::BacklinksOnePerDomain
            | Report::BrokenBacklinks => "refpages",
            Report::BacklinksNewLostCounters | Report::RefdomainsNewLostCounters => "counters",
            Report::BrokenLinks => "links",
            Report::DomainRating => "domain",
            Report::LinkedDomains => "domains",
            Report::LinkedDomainsByType => "linked_domains",
            Report::Metrics | Report::MetricsExtended => "metrics",
            Report::Refips => "refips",
            Report::SubscriptionInfo => "info",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Report::AhrefsRank => "URLs and their rankings",
            Report::Anchors => "Anchor text of inbound backlinks",
            Report::AnchorsRefdomains => "Referring domains grouped by anchor text",
            Report::Backlinks => "Inbound backlinks of the target",
            Report::BacklinksNewLost => "New or lost backlinks in a date range",
            Report::BacklinksNewLostCounters => "Counts of new and lost backlinks",
            Report::BacklinksOnePerDomain => "One backlink per referring domain",
            Report::BrokenBacklinks => "Inbound backlinks that point to broken pages",
            Report::BrokenLinks => "Outbound links that are broken",
            Report::DomainRating => "Domain Rating of the target",
            Report::LinkedAnchors => "Anchor text of outbound links",
            Report::LinkedDomains => "Domains the target links to",
            Report::LinkedDomainsByType => "Outlinked domains grouped by type",
            Report::Metrics => "Backlink counts for the target",
            Report::MetricsExtended => "Extended backlink metrics",
            Report::Pages => "Pages crawled on the target",
            Report::PagesExtended => "Pages with extended metrics",
            Report::PagesInfo => "Page-level metadata",
            Report::Refdomains => "Referring domains",
            Report::RefdomainsByType => "Referring domains grouped by type",
            Report::RefdomainsNewLost => "New or lost referring domains",
            Report::RefdomainsNewLostCounters => "Counts of new and lost referring domains",
            Report::Refips => "Referring IP addresses",
            Report::SubscriptionInfo => "API subscription limits and usage",
        }
    }
}

impl FromStr for Report {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Report::ALL
            .iter()
            .find(|report| report.name() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownReport {
                name: s.to_string(),
            })
    }
}
