use std::{fmt, str::FromStr};

use yarn_exporter_common::error::{ExporterError, Result};

/// The closed set of metric kinds the exporter emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Gauge,
}

impl MetricType {
    pub fn as_prometheus_type(&self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::Gauge => "gauge",
        }
    }
}

impl FromStr for MetricType {
    type Err = ExporterError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "counter" => Ok(Self::Counter),
            "gauge" => Ok(Self::Gauge),
            _ => Err(ExporterError::InvalidKind(format!(
                "metric kind must be one of [gauge, counter], got {value:?}"
            ))),
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_prometheus_type())
    }
}

/// Identity and label schema of a metric.
///
/// `name` is the fully qualified `<namespace>_<name>` form; label names are
/// fixed here and sample values must line up with them by position.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDescriptor {
    pub name: String,
    pub help: String,
    pub metric_type: MetricType,
    pub variable_labels: Vec<String>,
}

impl MetricDescriptor {
    pub fn new(
        namespace: &str,
        name: &str,
        metric_type: MetricType,
        help: &str,
        variable_labels: &[&str],
    ) -> Result<Self> {
        let name = format!("{namespace}_{name}");
        if !is_valid_metric_name(&name) {
            return Err(ExporterError::InvalidMetricName(name));
        }

        if let Some(label) = variable_labels
            .iter()
            .find(|label| !is_valid_label_name(label))
        {
            return Err(ExporterError::InvalidMetricName(format!(
                "{name}: invalid label name {label:?}"
            )));
        }

        Ok(Self {
            name,
            help: help.to_string(),
            metric_type,
            variable_labels: variable_labels.iter().map(|label| (*label).to_string()).collect(),
        })
    }

    pub fn build(&self) -> CollectedMetric {
        CollectedMetric {
            descriptor: self.clone(),
            samples: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub label_values: Vec<String>,
    pub value: f64,
}

/// A descriptor together with the samples gathered for it during one scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedMetric {
    pub descriptor: MetricDescriptor,
    pub samples: Vec<MetricSample>,
}

impl CollectedMetric {
    pub fn add_sample<S: AsRef<str>>(&mut self, label_values: &[S], value: f64) -> Result<()> {
        let expected = self.descriptor.variable_labels.len();
        if label_values.len() != expected {
            return Err(ExporterError::LabelArityMismatch {
                metric: self.descriptor.name.clone(),
                expected,
                actual: label_values.len(),
            });
        }

        self.samples.push(MetricSample {
            label_values: label_values
                .iter()
                .map(|value| value.as_ref().to_string())
                .collect(),
            value,
        });
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Pairs each sample's values with the descriptor's label names.
    pub fn labeled_samples(&self) -> impl Iterator<Item = (Vec<(&str, &str)>, f64)> + '_ {
        self.samples.iter().map(|sample| {
            let labels = self
                .descriptor
                .variable_labels
                .iter()
                .zip(sample.label_values.iter())
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect();
            (labels, sample.value)
        })
    }
}

fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == ':')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

fn is_valid_label_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
