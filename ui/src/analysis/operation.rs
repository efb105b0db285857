use std::fmt;

/// One analysis mode. Each maps to exactly one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Table,
    LinearRegression,
    Clustering,
    Distribution,
    Statistics,
    Eda,
    Correlation,
    Scatter,
    Histogram,
    Boxplot,
}

impl Operation {
    /// Button order on the dashboard.
    pub const ALL: [Operation; 10] = [
        Operation::Table,
        Operation::Statistics,
        Operation::Eda,
        Operation::LinearRegression,
        Operation::Clustering,
        Operation::Distribution,
        Operation::Correlation,
        Operation::Scatter,
        Operation::Histogram,
        Operation::Boxplot,
    ];

    /// Identifier used in exports and logs.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Table => "table",
            Operation::LinearRegression => "linear_regression",
            Operation::Clustering => "clustering",
            Operation::Distribution => "distribution",
            Operation::Statistics => "statistics",
            Operation::Eda => "eda",
            Operation::Correlation => "correlation",
            Operation::Scatter => "scatter",
            Operation::Histogram => "histogram",
            Operation::Boxplot => "boxplot",
        }
    }

    /// Path segment under the API root.
    pub fn slug(self) -> &'static str {
        match self {
            Operation::LinearRegression => "linear-regression",
            other => other.name(),
        }
    }

    /// `<api_root>/<slug>/<file_id>/`
    pub fn endpoint(self, api_root: &str, file_id: &str) -> String {
        format!("{api_root}/{}/{file_id}/", self.slug())
    }

    pub fn title(self) -> &'static str {
        match self {
            Operation::Table => "Data Preview",
            Operation::LinearRegression => "Linear Regression",
            Operation::Clustering => "Clustering (KMeans)",
            Operation::Distribution => "Distribution Plot",
            Operation::Statistics => "Statistical Summary",
            Operation::Eda => "Exploratory Data Analysis",
            Operation::Correlation => "Correlation Matrix",
            Operation::Scatter => "Scatter Plot",
            Operation::Histogram => "Histogram",
            Operation::Boxplot => "Box Plot",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Operation::Table => "fa-table",
            Operation::LinearRegression => "fa-chart-line",
            Operation::Clustering => "fa-project-diagram",
            Operation::Distribution => "fa-chart-area",
            Operation::Statistics => "fa-calculator",
            Operation::Eda => "fa-search-plus",
            Operation::Correlation => "fa-th",
            Operation::Scatter => "fa-braille",
            Operation::Histogram => "fa-chart-bar",
            Operation::Boxplot => "fa-box",
        }
    }

    /// Short caption for the operation button.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Table => "Table Preview",
            Operation::LinearRegression => "Linear Regression",
            Operation::Clustering => "Clustering",
            Operation::Distribution => "Distribution",
            Operation::Statistics => "Statistics",
            Operation::Eda => "Full EDA Report",
            Operation::Correlation => "Correlation",
            Operation::Scatter => "Scatter Plot",
            Operation::Histogram => "Histogram",
            Operation::Boxplot => "Box Plot",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operation_has_its_own_route() {
        let mut slugs: Vec<_> = Operation::ALL.iter().map(|op| op.slug()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), Operation::ALL.len());
    }

    #[test]
    fn endpoints_follow_server_routes() {
        assert_eq!(
            Operation::Statistics.endpoint("/api", "42"),
            "/api/statistics/42/"
        );
        assert_eq!(
            Operation::LinearRegression.endpoint("/api", "42"),
            "/api/linear-regression/42/"
        );
        assert_eq!(Operation::Boxplot.endpoint("/data/api", "f1"), "/data/api/boxplot/f1/");
    }
}
