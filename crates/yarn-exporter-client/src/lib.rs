pub mod client;
pub mod types;

pub use client::{DEFAULT_TIMEOUT, YarnClient};
pub use types::{
    AppList, Application, ApplicationsResponse, ClusterId, ClusterInfo, ClusterInfoResponse,
    ClusterMetrics, ClusterMetricsResponse,
};
