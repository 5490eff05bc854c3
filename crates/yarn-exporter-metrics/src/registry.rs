use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, warn};
use yarn_exporter_common::error::Result;

use crate::{
    collectors::Collector,
    exposition,
    types::{CollectedMetric, MetricDescriptor, MetricType},
};

const EXPORTER_NAMESPACE: &str = "yarn_exporter";

/// The set of collectors served on the exposition endpoint.
///
/// Collectors are registered once at startup. Every scrape runs all of them
/// concurrently; a collector that fails is logged and left out of that
/// scrape while the others are still served.
#[derive(Default)]
pub struct CollectorRegistry {
    collectors: Vec<Box<dyn Collector>>,
}

struct CollectorOutcome {
    name: &'static str,
    elapsed: Duration,
    result: Result<Vec<CollectedMetric>>,
}

impl CollectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, collector: Box<dyn Collector>) {
        self.collectors.push(collector);
    }

    pub fn collector_names(&self) -> Vec<&'static str> {
        self.collectors.iter().map(|collector| collector.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }

    pub async fn gather(&self) -> Vec<CollectedMetric> {
        let outcomes = self.run_collectors().await;
        let mut collected = Vec::new();

        match scrape_metrics(&outcomes) {
            Ok(metrics) => collected.extend(metrics),
            Err(err) => warn!(error = %err, "failed to build collector scrape metrics"),
        }

        for outcome in outcomes {
            match outcome.result {
                Ok(metrics) => {
                    debug!(
                        collector = outcome.name,
                        metrics = metrics.len(),
                        elapsed_ms = outcome.elapsed.as_millis() as u64,
                        "collector finished"
                    );
                    collected.extend(metrics);
                }
                Err(err) => {
                    warn!(
                        collector = outcome.name,
                        error = %err,
                        "collector failed, omitting its metrics from this scrape"
                    );
                }
            }
        }

        collected.sort_by(|left, right| left.descriptor.name.cmp(&right.descriptor.name));
        collected
    }

    pub async fn render_prometheus(&self) -> String {
        exposition::encode(&self.gather().await)
    }

    async fn run_collectors(&self) -> Vec<CollectorOutcome> {
        join_all(self.collectors.iter().map(|collector| async move {
            let started_at = Instant::now();
            let result = collector.collect().await;
            CollectorOutcome {
                name: collector.name(),
                elapsed: started_at.elapsed(),
                result,
            }
        }))
        .await
    }
}

fn scrape_metrics(outcomes: &[CollectorOutcome]) -> Result<Vec<CollectedMetric>> {
    let mut success = MetricDescriptor::new(
        EXPORTER_NAMESPACE,
        "collector_success",
        MetricType::Gauge,
        "Whether the collector succeeded during this scrape",
        &["collector"],
    )?
    .build();
    let mut duration = MetricDescriptor::new(
        EXPORTER_NAMESPACE,
        "collector_duration_seconds",
        MetricType::Gauge,
        "Time the collector spent during this scrape",
        &["collector"],
    )?
    .build();

    for outcome in outcomes {
        let succeeded = if outcome.result.is_ok() { 1.0 } else { 0.0 };
        success.add_sample(&[outcome.name], succeeded)?;
        duration.add_sample(&[outcome.name], outcome.elapsed.as_secs_f64())?;
    }

    Ok(vec![success, duration])
}
