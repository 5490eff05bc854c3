use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use async_trait::async_trait;
use yarn_exporter_client::{Application, ApplicationsResponse, YarnClient};
use yarn_exporter_common::error::{ExporterError, Result};

use crate::{
    collectors::{Collector, NAMESPACE},
    types::{CollectedMetric, MetricDescriptor, MetricType},
};

pub const APPLICATIONS_PATH: &str = "/ws/v1/cluster/apps";

/// Counts running applications for a fixed set of application names.
///
/// Names with no running instance are left out of the output rather than
/// reported as zero.
pub struct RunningAppsCollector {
    client: Arc<YarnClient>,
    cluster_name: String,
    app_names: BTreeSet<String>,
}

impl RunningAppsCollector {
    pub fn new<I, S>(
        client: Arc<YarnClient>,
        cluster_name: impl Into<String>,
        app_names: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let app_names: BTreeSet<String> = app_names.into_iter().map(Into::into).collect();
        if app_names.is_empty() {
            return Err(ExporterError::InvalidArgument(
                "running apps collector needs at least one application name".to_string(),
            ));
        }

        Ok(Self {
            client,
            cluster_name: cluster_name.into(),
            app_names,
        })
    }

    pub fn count_by_name<'a>(&self, apps: &'a [Application]) -> BTreeMap<&'a str, u64> {
        apps.iter()
            .filter(|app| self.app_names.contains(&app.name))
            .fold(BTreeMap::new(), |mut counts, app| {
                *counts.entry(app.name.as_str()).or_insert(0) += 1;
                counts
            })
    }

    pub fn translate(&self, apps: &[Application]) -> Result<Vec<CollectedMetric>> {
        let mut running_apps = MetricDescriptor::new(
            NAMESPACE,
            "apps_running_by_name",
            MetricType::Gauge,
            "The number of running apps, group by app name",
            &["cluster", "app_name"],
        )?
        .build();

        for (name, count) in self.count_by_name(apps) {
            running_apps.add_sample(&[self.cluster_name.as_str(), name], count as f64)?;
        }

        Ok(vec![running_apps])
    }
}

#[async_trait]
impl Collector for RunningAppsCollector {
    fn name(&self) -> &'static str {
        "running_apps"
    }

    async fn collect(&self) -> Result<Vec<CollectedMetric>> {
        let response: ApplicationsResponse = self
            .client
            .get_json(APPLICATIONS_PATH, &[("states", "running")])
            .await?;
        self.translate(&response.into_applications())
    }
}
