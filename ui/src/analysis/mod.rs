//! Analysis dashboard: operation catalogue, parameters, results and session.

mod client;
mod data;
mod operation;
mod params;
mod render;
mod session;
mod view;

pub use client::{fetch_columns, fetch_operation};
pub use data::{
    AnalysisData, BoxplotResult, ClusteringResult, ColumnCatalog, CorrelationResult,
    DistributionResult, EdaImage, EdaReport, HistogramResult, InfoItem, RegressionResult,
    ScatterResult, StatisticsSummary, TablePreview,
};
pub use operation::Operation;
pub use params::{FieldKind, ParamField, ParamValues};
pub use session::{
    AnalysisSession, Completion, ExportAction, LoadTicket, PanelState, Selection, LOAD_FAILURE,
};
pub use view::AnalysisView;
