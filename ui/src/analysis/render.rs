//! View-models the result panel is drawn from.

use crate::core::format::{format_count, format_stat_value};

use super::data::{EdaReport, StatisticsSummary, TablePreview};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportSection {
    Overview(Vec<StatCard>),
    Image {
        title: String,
        kind: String,
        image: String,
    },
    Html {
        title: &'static str,
        icon: &'static str,
        html: String,
    },
}

pub const OVERVIEW_TITLE: &str = "Dataset Overview";
pub const DESCRIPTIVE_TITLE: &str = "Descriptive Statistics";
pub const MISSING_TITLE: &str = "Missing Values";

pub fn table_cards(table: &TablePreview) -> Vec<StatCard> {
    vec![
        StatCard {
            value: format_count(table.rows),
            label: "Total Rows".into(),
        },
        StatCard {
            value: table.columns.to_string(),
            label: "Columns".into(),
        },
        StatCard {
            value: table.numeric_columns.len().to_string(),
            label: "Numeric".into(),
        },
        StatCard {
            value: table.categorical_columns.len().to_string(),
            label: "Categorical".into(),
        },
    ]
}

fn overview_cards(stats: &StatisticsSummary) -> Vec<StatCard> {
    stats
        .basic_stats
        .iter()
        .map(|(label, value)| StatCard {
            value: format_stat_value(value),
            label: label.clone(),
        })
        .collect()
}

pub fn statistics_sections(stats: &StatisticsSummary) -> Vec<ReportSection> {
    vec![
        ReportSection::Overview(overview_cards(stats)),
        ReportSection::Html {
            title: DESCRIPTIVE_TITLE,
            icon: "fa-calculator",
            html: stats.summary_html.clone(),
        },
        ReportSection::Html {
            title: MISSING_TITLE,
            icon: "fa-exclamation-triangle",
            html: stats.missing_html.clone(),
        },
    ]
}

/// Section heading for an EDA image type; unknown types show as-is.
pub fn eda_image_title(kind: &str) -> String {
    match kind {
        "correlation" => "Correlation Matrix",
        "missing" => "Missing Values Analysis",
        "boxplots" => "Box Plots",
        "pairplot" => "Pair Plot",
        other => other,
    }
    .to_string()
}

pub fn eda_sections(report: &EdaReport) -> Vec<ReportSection> {
    let mut sections = vec![ReportSection::Overview(overview_cards(&report.summary))];
    sections.extend(report.images.iter().map(|img| ReportSection::Image {
        title: eda_image_title(&img.kind),
        kind: img.kind.clone(),
        image: img.image.clone(),
    }));
    sections.push(ReportSection::Html {
        title: DESCRIPTIVE_TITLE,
        icon: "fa-calculator",
        html: report.summary.summary_html.clone(),
    });
    sections
}

pub fn image_src(payload: &str) -> String {
    format!("data:image/png;base64,{payload}")
}
