use std::collections::BTreeSet;
use std::path::Path;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;

use crate::chat::{ask_in_background, dataset_preview, ChatAssistant};
use crate::color::BrandColors;
use crate::config::AppConfig;
use crate::data::cache::DatasetCache;
use crate::data::compare::{compare, ComparisonOutcome, ComparisonRequest};
use crate::data::export::write_csv;
use crate::data::filter::list_distinct_values;
use crate::data::loader::{Loader, ManualUpload, SourceFormat};
use crate::data::model::Dataset;
use crate::data::normalize::normalize;
use crate::error::{ChatError, DataError};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Comparison,
    Dataset,
    Ask,
}

/// One question and its answer (or error) in the Ask tab.
#[derive(Debug, Clone)]
pub struct ChatEntry {
    pub question: String,
    pub answer: Result<String, String>,
}

/// Ask-tab state. Lives beside the comparison state and never touches it.
#[derive(Default)]
pub struct ChatState {
    pub assistant: Option<Arc<dyn ChatAssistant>>,
    pub question: String,
    pub history: Vec<ChatEntry>,
    pending: Option<(String, Receiver<Result<String, ChatError>>)>,
}

impl ChatState {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,
    loader: Loader,
    cache: DatasetCache,

    /// Current dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,
    /// Cache generation the selections below belong to.
    seen_generation: u64,

    /// Load failure that hides every filter control.
    pub blocking_error: Option<String>,

    /// Brand column whose models anchor each comparison.
    pub base_column: String,
    /// Distinct values of the base column (model picker contents).
    pub base_values: Vec<String>,
    /// Free-text narrowing of the model picker.
    pub model_search: String,
    /// Selected base models in the order they were picked.
    pub selected_models: Vec<String>,
    /// Every non-base column, in sheet order.
    pub competitor_columns: Vec<String>,
    pub selected_competitors: BTreeSet<String>,

    /// Result for the current selections (recomputed on every change).
    pub outcome: Option<Result<ComparisonOutcome, String>>,

    pub brand_colors: BrandColors,
    pub tab: Tab,
    pub chat: ChatState,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state and try the configured start-up sources.
    pub fn new(config: AppConfig) -> Self {
        let mut state = Self::empty(config);
        state.load();
        state
    }

    fn empty(config: AppConfig) -> Self {
        Self {
            loader: config.loader(),
            base_column: config.base_column.clone(),
            chat: ChatState {
                assistant: config.assistant(),
                ..ChatState::default()
            },
            config,
            cache: DatasetCache::new(),
            dataset: None,
            seen_generation: 0,
            blocking_error: None,
            base_values: Vec::new(),
            model_search: String::new(),
            selected_models: Vec::new(),
            competitor_columns: Vec::new(),
            selected_competitors: BTreeSet::new(),
            outcome: None,
            brand_colors: BrandColors::default(),
            tab: Tab::default(),
            status_message: None,
        }
    }

    /// Load from the cache, falling through the ranked sources on first use.
    pub fn load(&mut self) {
        log::debug!("Dataset sources: {:?}", self.loader.source_names());
        match self.cache.get_or_load(&self.loader, &self.config.base_column) {
            Ok(ds) => self.sync_dataset(ds),
            Err(e) => self.fail_load(e),
        }
    }

    /// Forget the cached dataset and load again.
    pub fn reload(&mut self) {
        self.cache.invalidate();
        self.load();
    }

    /// Replace the dataset with a user-picked file.
    pub fn upload(&mut self, path: &Path) {
        let loaded = Loader::new()
            .with_source(ManualUpload {
                path: path.to_path_buf(),
            })
            .load();
        let result = loaded.and_then(|l| {
            normalize(l.raw, &self.config.base_column).map(|ds| (ds, l.source))
        });
        match result {
            Ok((dataset, source)) => self.install_dataset(dataset, source),
            Err(e) => self.fail_load(e),
        }
    }

    /// Put an already-normalized dataset in the cache and show it.
    pub fn install_dataset(&mut self, dataset: Dataset, source: String) {
        let ds = self.cache.replace(dataset, source);
        self.sync_dataset(ds);
    }

    pub fn source(&self) -> Option<&str> {
        self.cache.source()
    }

    fn fail_load(&mut self, e: DataError) {
        log::error!("Failed to load dataset: {e}");
        if e.is_blocking() && self.cache.get().is_none() {
            self.dataset = None;
            self.outcome = None;
            self.blocking_error = Some(e.to_string());
        } else {
            // a failed upload keeps the cached dataset on screen
            self.status_message = Some(format!("Error: {e}"));
        }
    }

    /// Reset selections when the cache holds a dataset we have not seen.
    fn sync_dataset(&mut self, ds: Arc<Dataset>) {
        self.blocking_error = None;
        self.status_message = None;
        if self.seen_generation == self.cache.generation() && self.dataset.is_some() {
            return;
        }
        self.seen_generation = self.cache.generation();
        if ds.is_empty() {
            log::warn!("Dataset has no rows with a '{}' value", self.config.base_column);
        }
        self.brand_colors = BrandColors::new(&ds.columns);
        self.dataset = Some(ds);
        self.model_search.clear();
        let base = self.config.base_column.clone();
        self.set_base_column(&base);
    }

    // -- Selections ---------------------------------------------------------

    /// Switch the base brand. Clears selected models and selects every other
    /// column as competitor.
    pub fn set_base_column(&mut self, column: &str) {
        let Some(ds) = self.dataset.clone() else {
            return;
        };
        self.base_column = column.to_string();
        self.base_values = match list_distinct_values(&ds, column) {
            Ok(values) => values,
            Err(e) => {
                self.blocking_error = Some(e.to_string());
                Vec::new()
            }
        };
        self.selected_models.clear();
        self.competitor_columns = ds
            .columns
            .iter()
            .filter(|c| c.as_str() != column)
            .cloned()
            .collect();
        self.selected_competitors = self.competitor_columns.iter().cloned().collect();
        self.recompare();
    }

    /// Base values matching the search box (case-insensitive substring).
    pub fn visible_base_values(&self) -> Vec<&String> {
        let needle = self.model_search.trim().to_lowercase();
        self.base_values
            .iter()
            .filter(|v| needle.is_empty() || v.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn toggle_model(&mut self, model: &str) {
        if let Some(pos) = self.selected_models.iter().position(|m| m == model) {
            self.selected_models.remove(pos);
        } else {
            self.selected_models.push(model.to_string());
        }
        self.recompare();
    }

    /// Select every model currently visible in the picker.
    pub fn select_visible_models(&mut self) {
        let visible: Vec<String> = self.visible_base_values().into_iter().cloned().collect();
        for value in visible {
            if !self.selected_models.contains(&value) {
                self.selected_models.push(value);
            }
        }
        self.recompare();
    }

    pub fn clear_models(&mut self) {
        self.selected_models.clear();
        self.recompare();
    }

    pub fn toggle_competitor(&mut self, column: &str) {
        if !self.selected_competitors.remove(column) {
            self.selected_competitors.insert(column.to_string());
        }
        self.recompare();
    }

    pub fn select_all_competitors(&mut self) {
        self.selected_competitors = self.competitor_columns.iter().cloned().collect();
        self.recompare();
    }

    pub fn select_no_competitors(&mut self) {
        self.selected_competitors.clear();
        self.recompare();
    }

    /// The request for the current selections. Competitors keep sheet order.
    pub fn request(&self) -> ComparisonRequest {
        ComparisonRequest::new(
            self.base_column.clone(),
            self.selected_models.iter().cloned(),
            self.competitor_columns
                .iter()
                .filter(|c| self.selected_competitors.contains(*c))
                .cloned(),
        )
    }

    /// Recompute `outcome` after a selection change.
    pub fn recompare(&mut self) {
        let Some(ds) = &self.dataset else {
            self.outcome = None;
            return;
        };
        let request = self.request();
        log::debug!("Comparing {request:?}");
        self.outcome = Some(compare(ds, &request).map_err(|e| e.to_string()));
    }

    // -- Export -------------------------------------------------------------

    pub fn export_to(&mut self, path: &Path) {
        let Some(Ok(ComparisonOutcome::Ready(result))) = &self.outcome else {
            self.status_message = Some("Nothing to export yet".to_string());
            return;
        };
        match write_csv(&result.export, path) {
            Ok(()) => {
                self.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    // -- Chat ---------------------------------------------------------------

    /// Send the current question to the assistant on a worker thread.
    pub fn submit_question(&mut self) {
        let question = self.chat.question.trim().to_string();
        if question.is_empty() || self.chat.is_pending() {
            return;
        }
        let (Some(assistant), Some(ds)) = (self.chat.assistant.clone(), &self.dataset) else {
            return;
        };
        let preview = dataset_preview(ds, self.config.preview_rows);
        let rx = ask_in_background(assistant, question.clone(), preview);
        self.chat.pending = Some((question, rx));
        self.chat.question.clear();
    }

    /// Collect a finished answer. Returns `true` while one is still pending.
    pub fn poll_chat(&mut self) -> bool {
        let Some((question, rx)) = &self.chat.pending else {
            return false;
        };
        let answer = match rx.try_recv() {
            Ok(answer) => answer.map_err(|e| e.to_string()),
            Err(TryRecvError::Empty) => return true,
            Err(TryRecvError::Disconnected) => Err("chat worker stopped".to_string()),
        };
        self.chat.history.push(ChatEntry {
            question: question.clone(),
            answer,
        });
        self.chat.pending = None;
        false
    }
}

/// Whether `path` has an extension the loader understands.
pub fn is_supported_upload(path: &Path) -> bool {
    SourceFormat::from_path(path).is_ok()
}
