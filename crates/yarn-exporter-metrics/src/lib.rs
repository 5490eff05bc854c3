pub mod collectors;
pub mod config;
pub mod exposition;
pub mod handlers;
pub mod registry;
pub mod router;
pub mod types;

pub use collectors::{
    Collector, NAMESPACE, cluster_info::ClusterInfoCollector,
    cluster_metrics::ClusterMetricsCollector, running_apps::RunningAppsCollector,
};
pub use config::{ExporterConfig, build_registry};
pub use registry::CollectorRegistry;
pub use router::{ExporterState, exporter_router};
pub use types::{CollectedMetric, MetricDescriptor, MetricSample, MetricType};
