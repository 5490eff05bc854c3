pub mod cluster_info;
pub mod cluster_metrics;
pub mod running_apps;

use async_trait::async_trait;
use yarn_exporter_common::error::Result;

use crate::types::CollectedMetric;

/// Prefix of every metric translated from the resource manager.
pub const NAMESPACE: &str = "yarn";

/// A source of metrics backed by one upstream endpoint.
///
/// `collect` runs once per scrape and must not keep state between calls. An
/// error discards only this collector's contribution to the scrape.
#[async_trait]
pub trait Collector: Send + Sync {
    fn name(&self) -> &'static str;

    async fn collect(&self) -> Result<Vec<CollectedMetric>>;
}
