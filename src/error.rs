use thiserror::Error;

/// Errors raised while obtaining or comparing the cross-reference dataset.
#[derive(Error, Debug)]
pub enum DataError {
    /// No source produced a dataset. Each entry is `"<source>: <reason>"`.
    #[error("no dataset available ({})", .attempts.join("; "))]
    MissingInput { attempts: Vec<String> },

    #[error("column '{0}' not found in dataset header")]
    MissingColumn(String),

    #[error("'{0}' is the base brand and cannot also be a competitor")]
    BaseAsCompetitor(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Errors that must stop the UI from showing any filter controls.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            DataError::MissingInput { .. } | DataError::MissingColumn(_)
        )
    }
}

/// Errors from the external chat-completion API.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("question is empty")]
    EmptyQuestion,

    #[error("chat request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("chat API returned no answer")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, DataError>;
