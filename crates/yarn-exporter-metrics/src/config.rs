use std::{sync::Arc, time::Duration};

use tracing::info;
use yarn_exporter_client::{DEFAULT_TIMEOUT, YarnClient};
use yarn_exporter_common::error::Result;

use crate::{
    collectors::{
        cluster_info::ClusterInfoCollector, cluster_metrics::ClusterMetricsCollector,
        running_apps::RunningAppsCollector,
    },
    registry::CollectorRegistry,
};

pub const DEFAULT_CLUSTER_NAME: &str = "cluster_0";

#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub yarn_url: String,
    pub cluster_name: String,
    pub collected_apps: Vec<String>,
    pub timeout: Duration,
}

impl ExporterConfig {
    pub fn new(yarn_url: impl Into<String>) -> Self {
        Self {
            yarn_url: yarn_url.into(),
            cluster_name: DEFAULT_CLUSTER_NAME.to_string(),
            collected_apps: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Application names to track, with empty strings dropped. Names are
    /// matched exactly, so surrounding whitespace is significant.
    pub fn tracked_apps(&self) -> Vec<&str> {
        self.collected_apps
            .iter()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Builds the registry served by the exporter. The running-apps collector is
/// only registered when at least one application name is tracked.
pub fn build_registry(config: &ExporterConfig) -> Result<CollectorRegistry> {
    let client = Arc::new(YarnClient::new(&config.yarn_url, config.timeout)?);
    let mut registry = CollectorRegistry::new();

    registry.register(Box::new(ClusterInfoCollector::new(
        Arc::clone(&client),
        config.cluster_name.clone(),
    )));
    registry.register(Box::new(ClusterMetricsCollector::new(
        Arc::clone(&client),
        config.cluster_name.clone(),
    )));

    let tracked_apps = config.tracked_apps();
    if !tracked_apps.is_empty() {
        registry.register(Box::new(RunningAppsCollector::new(
            Arc::clone(&client),
            config.cluster_name.clone(),
            tracked_apps,
        )?));
    }

    info!(
        upstream = %client.base_url(),
        cluster = %config.cluster_name,
        collectors = ?registry.collector_names(),
        "collector registry ready"
    );
    Ok(registry)
}
