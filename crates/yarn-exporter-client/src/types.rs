//! Response bodies of the resource manager REST API (`/ws/v1/cluster/*`).
//!
//! Only the fields the exporter reads are declared; everything else in the
//! upstream payload is ignored during decoding.

use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterInfoResponse {
    #[serde(rename = "clusterInfo")]
    pub cluster_info: ClusterInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfo {
    pub id: ClusterId,
    pub state: String,
    pub ha_state: String,
    pub resource_manager_version: String,
    pub resource_manager_build_version: String,
    pub hadoop_version: String,
    pub hadoop_build_version: String,
}

/// The cluster id is a JSON number on stock Hadoop, but some distributions
/// send it as a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ClusterId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterMetricsResponse {
    #[serde(rename = "clusterMetrics")]
    pub cluster_metrics: ClusterMetrics,
}

/// Java `int`/`long` upstream; available resources go negative when the
/// scheduler over-allocates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterMetrics {
    pub apps_submitted: i64,
    pub apps_completed: i64,
    pub apps_failed: i64,
    pub apps_killed: i64,
    pub apps_pending: i64,
    pub apps_running: i64,
    #[serde(rename = "totalMB")]
    pub total_mb: i64,
    #[serde(rename = "reservedMB")]
    pub reserved_mb: i64,
    #[serde(rename = "availableMB")]
    pub available_mb: i64,
    #[serde(rename = "allocatedMB")]
    pub allocated_mb: i64,
    pub total_virtual_cores: i64,
    pub reserved_virtual_cores: i64,
    pub available_virtual_cores: i64,
    pub allocated_virtual_cores: i64,
    pub containers_allocated: i64,
    pub containers_reserved: i64,
    pub containers_pending: i64,
    pub total_nodes: i64,
    pub active_nodes: i64,
    pub lost_nodes: i64,
    pub unhealthy_nodes: i64,
    pub decommissioned_nodes: i64,
    pub rebooted_nodes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationsResponse {
    /// `null` when no application matches the query.
    pub apps: Option<AppList>,
}

impl ApplicationsResponse {
    pub fn into_applications(self) -> Vec<Application> {
        self.apps.map(|list| list.app).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppList {
    #[serde(default)]
    pub app: Vec<Application>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Application {
    pub name: String,
}
