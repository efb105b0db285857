//! Mutable state of the analysis dashboard.
//!
//! Every load is stamped with a generation number when it starts. Only the
//! completion carrying the latest generation may touch the result panel, so a
//! slow response can never overwrite the output of a request issued after it.

use dioxus::logger::tracing::warn;
use time::Date;

use crate::core::download::export_filename;

use super::data::{AnalysisData, ColumnCatalog, InfoItem};
use super::params::{self, ParamField, ParamValues};
use super::Operation;

/// Shown when a load fails without any message of its own.
pub const LOAD_FAILURE: &str = "Failed to load data";

/// Identifies one issued load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub operation: Operation,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelState {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Ready(AnalysisData),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The parameter panel opened; nothing was requested.
    NeedsParameters,
    Load(LoadTicket),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Rendered,
    Failed(String),
    /// A newer load was issued since this ticket; the outcome was dropped.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportAction {
    Download { filename: String, payload: String },
    NothingToExport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSession {
    api_root: String,
    file_id: String,
    columns: ColumnCatalog,
    active: Operation,
    generation: u64,
    panel: PanelState,
    titled: Option<Operation>,
    current_image: Option<String>,
    fields: Vec<ParamField>,
    values: ParamValues,
    params_open: bool,
    fullscreen: bool,
}

impl AnalysisSession {
    pub fn new(api_root: impl Into<String>, file_id: impl Into<String>) -> Self {
        Self {
            api_root: api_root.into(),
            file_id: file_id.into(),
            columns: ColumnCatalog::default(),
            active: Operation::Table,
            generation: 0,
            panel: PanelState::Idle,
            titled: None,
            current_image: None,
            fields: Vec::new(),
            values: Vec::new(),
            params_open: false,
            fullscreen: false,
        }
    }

    pub fn active(&self) -> Operation {
        self.active
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.panel, PanelState::Loading)
    }

    /// Operation whose title heads the panel; set only by a successful render.
    pub fn titled(&self) -> Option<Operation> {
        self.titled
    }

    pub fn current_image(&self) -> Option<&str> {
        self.current_image.as_deref()
    }

    pub fn columns(&self) -> &ColumnCatalog {
        &self.columns
    }

    pub fn params_open(&self) -> bool {
        self.params_open
    }

    pub fn fields(&self) -> &[ParamField] {
        &self.fields
    }

    pub fn value(&self, name: &str) -> &str {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn info_items(&self) -> Vec<InfoItem> {
        match &self.panel {
            PanelState::Ready(data) => data.info_items(),
            _ => Vec::new(),
        }
    }

    /// Replace the column catalogue. An open parameter form is rebuilt.
    pub fn set_columns(&mut self, columns: ColumnCatalog) {
        self.columns = columns;
        if self.params_open {
            self.open_parameters();
        }
    }

    fn open_parameters(&mut self) {
        self.fields = params::schema(self.active, &self.columns);
        self.values = params::initial_values(&self.fields);
        self.params_open = true;
    }

    /// Make `operation` active. Operations with a schema wait for
    /// [`apply_parameters`](Self::apply_parameters).
    pub fn select(&mut self, operation: Operation) -> Selection {
        self.active = operation;
        if params::needs_parameters(operation) {
            self.open_parameters();
            Selection::NeedsParameters
        } else {
            self.params_open = false;
            self.fields.clear();
            self.values.clear();
            Selection::Load(self.begin_load(operation, &Vec::new()))
        }
    }

    pub fn set_parameter(&mut self, name: &str, value: impl Into<String>) {
        params::set_value(&mut self.values, name, value);
    }

    /// Load the active operation with the non-empty form values.
    pub fn apply_parameters(&mut self) -> LoadTicket {
        let collected = params::collect_parameters(&self.values);
        self.begin_load(self.active, &collected)
    }

    pub fn request_url(&self, operation: Operation, parameters: &ParamValues) -> String {
        let endpoint = operation.endpoint(&self.api_root, &self.file_id);
        if parameters.is_empty() {
            return endpoint;
        }
        match params::query_string(parameters) {
            Ok(query) => format!("{endpoint}?{query}"),
            Err(err) => {
                warn!("dropping parameters for {operation}: {err}");
                endpoint
            }
        }
    }

    /// Start a load: spinner on, info and cached image cleared, generation bumped.
    pub fn begin_load(&mut self, operation: Operation, parameters: &ParamValues) -> LoadTicket {
        self.generation += 1;
        self.panel = PanelState::Loading;
        self.current_image = None;
        LoadTicket {
            generation: self.generation,
            operation,
            url: self.request_url(operation, parameters),
        }
    }

    pub fn complete(
        &mut self,
        ticket: &LoadTicket,
        outcome: Result<AnalysisData, String>,
    ) -> Completion {
        if ticket.generation != self.generation {
            return Completion::Stale;
        }
        match outcome {
            Ok(data) => {
                self.current_image = data.primary_image().map(str::to_string);
                self.titled = Some(data.operation());
                self.panel = PanelState::Ready(data);
                Completion::Rendered
            }
            Err(message) => {
                let message = if message.is_empty() {
                    LOAD_FAILURE.to_string()
                } else {
                    message
                };
                self.panel = PanelState::Failed(message.clone());
                Completion::Failed(message)
            }
        }
    }

    pub fn export(&self, today: Date) -> ExportAction {
        match &self.current_image {
            Some(payload) => ExportAction::Download {
                filename: export_filename(self.active.name(), today),
                payload: payload.clone(),
            },
            None => ExportAction::NothingToExport,
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    /// Returns whether fullscreen was on.
    pub fn exit_fullscreen(&mut self) -> bool {
        std::mem::replace(&mut self.fullscreen, false)
    }
}
