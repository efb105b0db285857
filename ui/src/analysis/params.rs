//! Parameter schemas for the operations that need user input before loading.

use super::{ColumnCatalog, Operation};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Select {
        options: Vec<String>,
        /// Label of a leading empty option, if the field may be left blank.
        empty_label: Option<&'static str>,
    },
    Number {
        min: i64,
        max: i64,
        default: Option<i64>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl ParamField {
    fn numeric_select(name: &'static str, label: &'static str, columns: &ColumnCatalog) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Select {
                options: columns.numeric_columns.clone(),
                empty_label: None,
            },
        }
    }

    fn number(name: &'static str, label: &'static str, min: i64, max: i64, default: i64) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Number {
                min,
                max,
                default: Some(default),
            },
        }
    }

    /// The value a freshly rendered control holds.
    pub fn initial_value(&self) -> String {
        match &self.kind {
            FieldKind::Select {
                empty_label: Some(_),
                ..
            } => String::new(),
            FieldKind::Select { options, .. } => options.first().cloned().unwrap_or_default(),
            FieldKind::Number { min, default, .. } => default.unwrap_or(*min).to_string(),
        }
    }
}

/// Fields shown before `operation` runs. Empty for operations that load at once.
pub fn schema(operation: Operation, columns: &ColumnCatalog) -> Vec<ParamField> {
    match operation {
        Operation::LinearRegression | Operation::Scatter => vec![
            ParamField::numeric_select("x_column", "X Variable", columns),
            ParamField::numeric_select("y_column", "Y Variable", columns),
        ],
        Operation::Clustering => vec![ParamField::number(
            "n_clusters",
            "Number of Clusters",
            2,
            10,
            3,
        )],
        Operation::Distribution => vec![ParamField {
            name: "column",
            label: "Column",
            kind: FieldKind::Select {
                options: columns.numeric_columns.clone(),
                empty_label: Some("All columns"),
            },
        }],
        Operation::Histogram => vec![
            ParamField::numeric_select("column", "Column", columns),
            ParamField::number("bins", "Number of Bins", 5, 100, 30),
        ],
        _ => Vec::new(),
    }
}

pub fn needs_parameters(operation: Operation) -> bool {
    matches!(
        operation,
        Operation::LinearRegression
            | Operation::Clustering
            | Operation::Distribution
            | Operation::Scatter
            | Operation::Histogram
    )
}

/// Current control values, one entry per field in schema order.
pub type ParamValues = Vec<(String, String)>;

pub fn initial_values(fields: &[ParamField]) -> ParamValues {
    fields
        .iter()
        .map(|field| (field.name.to_string(), field.initial_value()))
        .collect()
}

pub fn set_value(values: &mut ParamValues, name: &str, value: impl Into<String>) {
    let value = value.into();
    match values.iter_mut().find(|(key, _)| key == name) {
        Some(entry) => entry.1 = value,
        None => values.push((name.to_string(), value)),
    }
}

/// Non-empty values in control order.
pub fn collect_parameters(values: &ParamValues) -> ParamValues {
    values
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .cloned()
        .collect()
}

pub fn query_string(params: &ParamValues) -> Result<String, serde_urlencoded::ser::Error> {
    serde_urlencoded::to_string(params)
}
