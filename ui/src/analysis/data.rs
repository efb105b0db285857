//! Typed payloads for every analysis endpoint.
//!
//! The server answers each operation with a different JSON shape. Each shape
//! gets its own struct and the whole set is closed under [`AnalysisData`], so
//! renderers match on a variant instead of checking optional fields.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::Operation;

/// Column names grouped the way parameter selects need them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColumnCatalog {
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub all_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TablePreview {
    pub html: String,
    pub rows: u64,
    pub columns: u64,
    #[serde(default)]
    pub numeric_columns: Vec<String>,
    #[serde(default)]
    pub categorical_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatisticsSummary {
    pub summary_html: String,
    pub missing_html: String,
    /// Insertion order is the display order.
    pub basic_stats: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EdaImage {
    #[serde(rename = "type")]
    pub kind: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EdaReport {
    #[serde(default)]
    pub images: Vec<EdaImage>,
    pub summary: StatisticsSummary,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegressionResult {
    pub image: String,
    pub r2_score: f64,
    pub coefficient: f64,
    pub intercept: f64,
    pub x_column: String,
    pub y_column: String,
    pub equation: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClusteringResult {
    pub image: String,
    pub n_clusters: u32,
    /// Cluster label to member count. JSON object keys are strings.
    #[serde(default)]
    pub cluster_sizes: BTreeMap<String, u64>,
    #[serde(default)]
    pub columns_used: Vec<String>,
    pub inertia: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DistributionResult {
    pub image: String,
    #[serde(default)]
    pub columns_plotted: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CorrelationResult {
    pub image: String,
    #[serde(default)]
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScatterResult {
    pub image: String,
    pub x_column: String,
    pub y_column: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistogramResult {
    pub image: String,
    pub column: String,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoxplotResult {
    pub image: String,
    #[serde(default)]
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisData {
    Table(TablePreview),
    Statistics(StatisticsSummary),
    Eda(EdaReport),
    LinearRegression(RegressionResult),
    Clustering(ClusteringResult),
    Distribution(DistributionResult),
    Correlation(CorrelationResult),
    Scatter(ScatterResult),
    Histogram(HistogramResult),
    Boxplot(BoxplotResult),
}

/// One row of the info panel under a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoItem {
    pub label: &'static str,
    pub value: String,
}

impl InfoItem {
    fn number(label: &'static str, value: f64) -> Self {
        Self {
            label,
            value: plain_number(value),
        }
    }
}

/// Shortest decimal form, with integral values printed without a fraction.
fn plain_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl AnalysisData {
    /// Decode the `data` member of a successful envelope for `operation`.
    pub fn decode(operation: Operation, data: Value) -> Result<Self, serde_json::Error> {
        Ok(match operation {
            Operation::Table => Self::Table(serde_json::from_value(data)?),
            Operation::Statistics => Self::Statistics(serde_json::from_value(data)?),
            Operation::Eda => Self::Eda(serde_json::from_value(data)?),
            Operation::LinearRegression => Self::LinearRegression(serde_json::from_value(data)?),
            Operation::Clustering => Self::Clustering(serde_json::from_value(data)?),
            Operation::Distribution => Self::Distribution(serde_json::from_value(data)?),
            Operation::Correlation => Self::Correlation(serde_json::from_value(data)?),
            Operation::Scatter => Self::Scatter(serde_json::from_value(data)?),
            Operation::Histogram => Self::Histogram(serde_json::from_value(data)?),
            Operation::Boxplot => Self::Boxplot(serde_json::from_value(data)?),
        })
    }

    pub fn operation(&self) -> Operation {
        match self {
            Self::Table(_) => Operation::Table,
            Self::Statistics(_) => Operation::Statistics,
            Self::Eda(_) => Operation::Eda,
            Self::LinearRegression(_) => Operation::LinearRegression,
            Self::Clustering(_) => Operation::Clustering,
            Self::Distribution(_) => Operation::Distribution,
            Self::Correlation(_) => Operation::Correlation,
            Self::Scatter(_) => Operation::Scatter,
            Self::Histogram(_) => Operation::Histogram,
            Self::Boxplot(_) => Operation::Boxplot,
        }
    }

    /// The image that export should download after this result renders.
    pub fn primary_image(&self) -> Option<&str> {
        match self {
            Self::Table(_) | Self::Statistics(_) => None,
            Self::Eda(report) => report.images.first().map(|img| img.image.as_str()),
            Self::LinearRegression(r) => Some(&r.image),
            Self::Clustering(r) => Some(&r.image),
            Self::Distribution(r) => Some(&r.image),
            Self::Correlation(r) => Some(&r.image),
            Self::Scatter(r) => Some(&r.image),
            Self::Histogram(r) => Some(&r.image),
            Self::Boxplot(r) => Some(&r.image),
        }
    }

    /// Info panel rows in display order. Empty means the panel stays hidden.
    pub fn info_items(&self) -> Vec<InfoItem> {
        let mut items = Vec::new();
        match self {
            Self::LinearRegression(r) => {
                items.push(InfoItem::number("R² Score", r.r2_score));
                if !r.equation.is_empty() {
                    items.push(InfoItem {
                        label: "Equation",
                        value: r.equation.clone(),
                    });
                }
                items.push(InfoItem::number("Coefficient", r.coefficient));
                items.push(InfoItem::number("Intercept", r.intercept));
            }
            Self::Clustering(r) => {
                items.push(InfoItem::number("Clusters", r.n_clusters as f64));
                items.push(InfoItem::number("Inertia", r.inertia));
            }
            Self::Histogram(r) => {
                items.push(InfoItem::number("Mean", r.mean));
                items.push(InfoItem::number("Median", r.median));
                items.push(InfoItem::number("Std Dev", r.std));
            }
            _ => {}
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clustering_decodes_string_keyed_sizes() {
        let data = json!({
            "image": "aW1n",
            "n_clusters": 3,
            "cluster_sizes": {"0": 10, "1": 12, "2": 8},
            "columns_used": ["a", "b"],
            "inertia": 42.5
        });
        let AnalysisData::Clustering(result) =
            AnalysisData::decode(Operation::Clustering, data).unwrap()
        else {
            panic!("expected clustering");
        };
        assert_eq!(result.cluster_sizes.get("1"), Some(&12));
        assert_eq!(result.columns_used, vec!["a", "b"]);
    }

    #[test]
    fn statistics_keep_server_order() {
        let raw = r#"{
            "summary_html": "<table></table>",
            "missing_html": "<table></table>",
            "basic_stats": {"Total Rows": 10, "Total Columns": 3, "Memory Usage (KB)": 1.25}
        }"#;
        let data: Value = serde_json::from_str(raw).unwrap();
        let AnalysisData::Statistics(stats) =
            AnalysisData::decode(Operation::Statistics, data).unwrap()
        else {
            panic!("expected statistics");
        };
        let keys: Vec<&str> = stats.basic_stats.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Total Rows", "Total Columns", "Memory Usage (KB)"]);
    }

    #[test]
    fn wrong_shape_is_a_decode_error() {
        let err = AnalysisData::decode(Operation::Histogram, json!({"image": "x"}));
        assert!(err.is_err());
    }

    #[test]
    fn regression_info_in_fixed_order() {
        let data = json!({
            "image": "x",
            "r2_score": 0.9876,
            "coefficient": 2.0,
            "intercept": -1.5,
            "x_column": "a",
            "y_column": "b",
            "equation": "y = 2x + -1.5"
        });
        let result = AnalysisData::decode(Operation::LinearRegression, data).unwrap();
        let labels: Vec<&str> = result.info_items().iter().map(|i| i.label).collect();
        assert_eq!(labels, ["R² Score", "Equation", "Coefficient", "Intercept"]);
        assert_eq!(result.info_items()[2].value, "2");
        assert_eq!(result.info_items()[3].value, "-1.5");
    }

    #[test]
    fn charts_without_stats_have_no_info_panel() {
        let data = json!({"image": "x", "x_column": "a", "y_column": "b"});
        let result = AnalysisData::decode(Operation::Scatter, data).unwrap();
        assert!(result.info_items().is_empty());
        assert_eq!(result.primary_image(), Some("x"));
    }

    #[test]
    fn eda_primary_image_is_first() {
        let data = json!({
            "images": [
                {"type": "correlation", "image": "corr"},
                {"type": "pairplot", "image": "pair"}
            ],
            "summary": {"summary_html": "", "missing_html": "", "basic_stats": {}}
        });
        let result = AnalysisData::decode(Operation::Eda, data).unwrap();
        assert_eq!(result.primary_image(), Some("corr"));
        assert_eq!(result.operation(), Operation::Eda);
    }
}
