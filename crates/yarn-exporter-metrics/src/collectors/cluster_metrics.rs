use std::sync::Arc;

use async_trait::async_trait;
use yarn_exporter_client::{ClusterMetrics, ClusterMetricsResponse, YarnClient};
use yarn_exporter_common::{error::Result, units::megabytes_to_bytes};

use crate::{
    collectors::{Collector, NAMESPACE},
    types::{CollectedMetric, MetricDescriptor, MetricType},
};

pub const CLUSTER_METRICS_PATH: &str = "/ws/v1/cluster/metrics";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Count,
    Megabytes,
}

struct FieldMetric {
    name: &'static str,
    metric_type: MetricType,
    help: &'static str,
    unit: Unit,
    value: fn(&ClusterMetrics) -> i64,
}

// Lifetime totals are counters, point-in-time snapshots are gauges.
const FIELD_METRICS: &[FieldMetric] = &[
    FieldMetric {
        name: "apps_submitted_total",
        metric_type: MetricType::Counter,
        help: "The number of applications submitted",
        unit: Unit::Count,
        value: |metrics| metrics.apps_submitted,
    },
    FieldMetric {
        name: "apps_completed_total",
        metric_type: MetricType::Counter,
        help: "The number of applications completed",
        unit: Unit::Count,
        value: |metrics| metrics.apps_completed,
    },
    FieldMetric {
        name: "apps_failed_total",
        metric_type: MetricType::Counter,
        help: "The number of applications failed",
        unit: Unit::Count,
        value: |metrics| metrics.apps_failed,
    },
    FieldMetric {
        name: "apps_killed_total",
        metric_type: MetricType::Counter,
        help: "The number of applications killed",
        unit: Unit::Count,
        value: |metrics| metrics.apps_killed,
    },
    FieldMetric {
        name: "apps_pending",
        metric_type: MetricType::Gauge,
        help: "The number of applications pending",
        unit: Unit::Count,
        value: |metrics| metrics.apps_pending,
    },
    FieldMetric {
        name: "apps_running",
        metric_type: MetricType::Gauge,
        help: "The number of applications running",
        unit: Unit::Count,
        value: |metrics| metrics.apps_running,
    },
    FieldMetric {
        name: "memory_all_bytes",
        metric_type: MetricType::Gauge,
        help: "The amount of total memory",
        unit: Unit::Megabytes,
        value: |metrics| metrics.total_mb,
    },
    FieldMetric {
        name: "memory_reserved_bytes",
        metric_type: MetricType::Gauge,
        help: "The amount of memory reserved",
        unit: Unit::Megabytes,
        value: |metrics| metrics.reserved_mb,
    },
    FieldMetric {
        name: "memory_available_bytes",
        metric_type: MetricType::Gauge,
        help: "The amount of memory available",
        unit: Unit::Megabytes,
        value: |metrics| metrics.available_mb,
    },
    FieldMetric {
        name: "memory_allocated_bytes",
        metric_type: MetricType::Gauge,
        help: "The amount of memory allocated",
        unit: Unit::Megabytes,
        value: |metrics| metrics.allocated_mb,
    },
    FieldMetric {
        name: "cpu_cores_all",
        metric_type: MetricType::Gauge,
        help: "The total number of virtual cores",
        unit: Unit::Count,
        value: |metrics| metrics.total_virtual_cores,
    },
    FieldMetric {
        name: "cpu_cores_reserved",
        metric_type: MetricType::Gauge,
        help: "The number of reserved virtual cores",
        unit: Unit::Count,
        value: |metrics| metrics.reserved_virtual_cores,
    },
    FieldMetric {
        name: "cpu_cores_available",
        metric_type: MetricType::Gauge,
        help: "The number of available virtual cores",
        unit: Unit::Count,
        value: |metrics| metrics.available_virtual_cores,
    },
    FieldMetric {
        name: "cpu_cores_allocated",
        metric_type: MetricType::Gauge,
        help: "The number of allocated virtual cores",
        unit: Unit::Count,
        value: |metrics| metrics.allocated_virtual_cores,
    },
    FieldMetric {
        name: "containers_allocated",
        metric_type: MetricType::Gauge,
        help: "The number of containers allocated",
        unit: Unit::Count,
        value: |metrics| metrics.containers_allocated,
    },
    FieldMetric {
        name: "containers_reserved",
        metric_type: MetricType::Gauge,
        help: "The number of containers reserved",
        unit: Unit::Count,
        value: |metrics| metrics.containers_reserved,
    },
    FieldMetric {
        name: "containers_pending",
        metric_type: MetricType::Gauge,
        help: "The number of containers pending",
        unit: Unit::Count,
        value: |metrics| metrics.containers_pending,
    },
    FieldMetric {
        name: "nodes_all",
        metric_type: MetricType::Gauge,
        help: "The total number of nodes",
        unit: Unit::Count,
        value: |metrics| metrics.total_nodes,
    },
    FieldMetric {
        name: "nodes_active",
        metric_type: MetricType::Gauge,
        help: "The number of active nodes",
        unit: Unit::Count,
        value: |metrics| metrics.active_nodes,
    },
    FieldMetric {
        name: "nodes_lost",
        metric_type: MetricType::Gauge,
        help: "The number of lost nodes",
        unit: Unit::Count,
        value: |metrics| metrics.lost_nodes,
    },
    FieldMetric {
        name: "nodes_unhealthy",
        metric_type: MetricType::Gauge,
        help: "The number of unhealthy nodes",
        unit: Unit::Count,
        value: |metrics| metrics.unhealthy_nodes,
    },
    FieldMetric {
        name: "nodes_decommissioned_total",
        metric_type: MetricType::Counter,
        help: "The number of nodes decommissioned",
        unit: Unit::Count,
        value: |metrics| metrics.decommissioned_nodes,
    },
    FieldMetric {
        name: "nodes_rebooted_total",
        metric_type: MetricType::Counter,
        help: "The number of nodes rebooted",
        unit: Unit::Count,
        value: |metrics| metrics.rebooted_nodes,
    },
];

/// Translates the cluster-wide scheduler snapshot, one metric per field.
pub struct ClusterMetricsCollector {
    client: Arc<YarnClient>,
    cluster_name: String,
}

impl ClusterMetricsCollector {
    pub fn new(client: Arc<YarnClient>, cluster_name: impl Into<String>) -> Self {
        Self {
            client,
            cluster_name: cluster_name.into(),
        }
    }

    pub fn translate(&self, metrics: &ClusterMetrics) -> Result<Vec<CollectedMetric>> {
        FIELD_METRICS
            .iter()
            .map(|field| {
                let mut collected = MetricDescriptor::new(
                    NAMESPACE,
                    field.name,
                    field.metric_type,
                    field.help,
                    &["cluster"],
                )?
                .build();

                let raw = (field.value)(metrics);
                let value = match field.unit {
                    Unit::Count => raw,
                    Unit::Megabytes => megabytes_to_bytes(raw),
                };
                collected.add_sample(&[self.cluster_name.as_str()], value as f64)?;
                Ok(collected)
            })
            .collect()
    }
}

#[async_trait]
impl Collector for ClusterMetricsCollector {
    fn name(&self) -> &'static str {
        "cluster_metrics"
    }

    async fn collect(&self) -> Result<Vec<CollectedMetric>> {
        let response: ClusterMetricsResponse =
            self.client.get_json(CLUSTER_METRICS_PATH, &[]).await?;
        self.translate(&response.cluster_metrics)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc};

    use yarn_exporter_client::{ClusterMetrics, DEFAULT_TIMEOUT, YarnClient};

    use super::{ClusterMetricsCollector, FIELD_METRICS};
    use crate::types::{CollectedMetric, MetricType};

    fn collector() -> ClusterMetricsCollector {
        let client = Arc::new(YarnClient::new("http://rm:8088", DEFAULT_TIMEOUT).unwrap());
        ClusterMetricsCollector::new(client, "c0")
    }

    fn find<'a>(metrics: &'a [CollectedMetric], name: &str) -> &'a CollectedMetric {
        metrics
            .iter()
            .find(|metric| metric.name() == name)
            .unwrap_or_else(|| panic!("missing metric {name}"))
    }

    #[test]
    fn emits_one_sample_per_field() {
        let metrics = collector().translate(&ClusterMetrics::default()).unwrap();
        assert_eq!(metrics.len(), FIELD_METRICS.len());
        assert_eq!(metrics.len(), 23);

        let names: HashSet<&str> = metrics.iter().map(CollectedMetric::name).collect();
        assert_eq!(names.len(), metrics.len());

        for metric in &metrics {
            assert_eq!(metric.descriptor.variable_labels, vec!["cluster".to_string()]);
            assert_eq!(metric.samples.len(), 1);
            assert_eq!(metric.samples[0].label_values, vec!["c0".to_string()]);
        }
    }

    #[test]
    fn converts_memory_and_passes_counts_through() {
        let snapshot = ClusterMetrics {
            apps_submitted: 5,
            total_mb: 1024,
            reserved_mb: 1,
            available_mb: 512,
            allocated_mb: 0,
            total_virtual_cores: 64,
            active_nodes: 3,
            ..ClusterMetrics::default()
        };
        let metrics = collector().translate(&snapshot).unwrap();

        assert_eq!(find(&metrics, "yarn_memory_all_bytes").samples[0].value, 1_073_741_824.0);
        assert_eq!(find(&metrics, "yarn_memory_reserved_bytes").samples[0].value, 1_048_576.0);
        assert_eq!(find(&metrics, "yarn_memory_available_bytes").samples[0].value, 536_870_912.0);
        assert_eq!(find(&metrics, "yarn_memory_allocated_bytes").samples[0].value, 0.0);
        assert_eq!(find(&metrics, "yarn_apps_submitted_total").samples[0].value, 5.0);
        assert_eq!(find(&metrics, "yarn_cpu_cores_all").samples[0].value, 64.0);
        assert_eq!(find(&metrics, "yarn_nodes_active").samples[0].value, 3.0);
    }

    #[test]
    fn over_allocation_passes_negative_values_through() {
        let snapshot = ClusterMetrics {
            available_mb: -2048,
            available_virtual_cores: -1,
            containers_pending: -3,
            ..ClusterMetrics::default()
        };
        let metrics = collector().translate(&snapshot).unwrap();

        assert_eq!(
            find(&metrics, "yarn_memory_available_bytes").samples[0].value,
            -2_147_483_648.0
        );
        assert_eq!(find(&metrics, "yarn_cpu_cores_available").samples[0].value, -1.0);
        assert_eq!(find(&metrics, "yarn_containers_pending").samples[0].value, -3.0);
    }

    #[test]
    fn every_counter_carries_the_total_suffix() {
        let metrics = collector().translate(&ClusterMetrics::default()).unwrap();
        for metric in &metrics {
            if metric.descriptor.metric_type == MetricType::Counter {
                assert!(metric.name().ends_with("_total"), "{}", metric.name());
            }
        }
    }

    #[test]
    fn lifetime_totals_are_counters() {
        let metrics = collector().translate(&ClusterMetrics::default()).unwrap();
        let counters: HashSet<&str> = metrics
            .iter()
            .filter(|metric| metric.descriptor.metric_type == MetricType::Counter)
            .map(CollectedMetric::name)
            .collect();

        assert_eq!(
            counters,
            HashSet::from([
                "yarn_apps_submitted_total",
                "yarn_apps_completed_total",
                "yarn_apps_failed_total",
                "yarn_apps_killed_total",
                "yarn_nodes_decommissioned_total",
                "yarn_nodes_rebooted_total",
            ])
        );
    }
}
