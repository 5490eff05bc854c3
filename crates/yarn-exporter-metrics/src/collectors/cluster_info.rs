use std::sync::Arc;

use async_trait::async_trait;
use yarn_exporter_client::{ClusterInfo, ClusterInfoResponse, YarnClient};
use yarn_exporter_common::error::Result;

use crate::{
    collectors::{Collector, NAMESPACE},
    types::{CollectedMetric, MetricDescriptor, MetricType},
};

pub const CLUSTER_INFO_PATH: &str = "/ws/v1/cluster/info";

const CLUSTER_INFO_LABELS: [&str; 8] = [
    "cluster_name",
    "cluster_id",
    "state",
    "ha_state",
    "resource_manager_version",
    "resource_manager_build_version",
    "hadoop_version",
    "hadoop_build_version",
];

/// Publishes the cluster identity as labels on a constant `1` gauge.
pub struct ClusterInfoCollector {
    client: Arc<YarnClient>,
    cluster_name: String,
}

impl ClusterInfoCollector {
    pub fn new(client: Arc<YarnClient>, cluster_name: impl Into<String>) -> Self {
        Self {
            client,
            cluster_name: cluster_name.into(),
        }
    }

    pub fn translate(&self, info: &ClusterInfo) -> Result<Vec<CollectedMetric>> {
        let mut cluster_info = MetricDescriptor::new(
            NAMESPACE,
            "cluster_info",
            MetricType::Gauge,
            "Yarn cluster info",
            &CLUSTER_INFO_LABELS,
        )?
        .build();

        let cluster_id = info.id.to_string();
        cluster_info.add_sample(
            &[
                self.cluster_name.as_str(),
                cluster_id.as_str(),
                info.state.as_str(),
                info.ha_state.as_str(),
                info.resource_manager_version.as_str(),
                info.resource_manager_build_version.as_str(),
                info.hadoop_version.as_str(),
                info.hadoop_build_version.as_str(),
            ],
            1.0,
        )?;

        Ok(vec![cluster_info])
    }
}

#[async_trait]
impl Collector for ClusterInfoCollector {
    fn name(&self) -> &'static str {
        "cluster_info"
    }

    async fn collect(&self) -> Result<Vec<CollectedMetric>> {
        let response: ClusterInfoResponse = self.client.get_json(CLUSTER_INFO_PATH, &[]).await?;
        self.translate(&response.cluster_info)
    }
}
