use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::chat::{ChatAssistant, OpenAiAssistant};
use crate::data::loader::{BundledFile, Loader, RemoteUrl};

pub const DEFAULT_BASE_COLUMN: &str = "TNB Model";

#[derive(Debug, Parser)]
#[command(name = "model-crossref", version)]
#[command(about = "Look up equivalent models across competing brands")]
pub struct Cli {
    /// Spreadsheet shipped with the application (tried first)
    #[arg(long, env = "CROSSREF_DATA", default_value = "Restructured_Data_With_Titus.xlsx")]
    pub data: PathBuf,

    /// Remote copy of the spreadsheet (tried when the local file fails)
    #[arg(long, env = "CROSSREF_DATA_URL")]
    pub url: Option<String>,

    /// Column holding the base brand's model numbers
    #[arg(long, env = "CROSSREF_BASE_COLUMN", default_value = DEFAULT_BASE_COLUMN)]
    pub base_column: String,

    /// API key for the chat assistant (the Ask tab is disabled without one)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat model name
    #[arg(long, env = "CROSSREF_CHAT_MODEL", default_value = "gpt-4o-mini")]
    pub chat_model: String,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "CROSSREF_CHAT_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub chat_base_url: String,

    /// Number of dataset rows sent along with each question
    #[arg(long, default_value_t = 50)]
    pub preview_rows: usize,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare models without opening the window and write the CSV
    Export {
        /// Base model numbers to compare
        #[arg(long, short, num_args = 1.., required = true)]
        models: Vec<String>,

        /// Competitor brand columns (default: every other column)
        #[arg(long, short, num_args = 1..)]
        competitors: Vec<String>,

        /// Brand column to use as base instead of --base-column
        #[arg(long)]
        base: Option<String>,

        /// Output file (default: stdout)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub data_url: Option<String>,
    pub base_column: String,
    pub api_key: Option<String>,
    pub chat_model: String,
    pub chat_base_url: String,
    pub preview_rows: usize,
}

impl From<&Cli> for AppConfig {
    fn from(cli: &Cli) -> Self {
        AppConfig {
            data_path: cli.data.clone(),
            data_url: cli.url.clone().filter(|u| !u.trim().is_empty()),
            base_column: cli.base_column.trim().to_string(),
            api_key: cli.api_key.clone().filter(|k| !k.trim().is_empty()),
            chat_model: cli.chat_model.clone(),
            chat_base_url: cli.chat_base_url.clone(),
            preview_rows: cli.preview_rows,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_path: PathBuf::from("Restructured_Data_With_Titus.xlsx"),
            data_url: None,
            base_column: DEFAULT_BASE_COLUMN.to_string(),
            api_key: None,
            chat_model: "gpt-4o-mini".to_string(),
            chat_base_url: "https://api.openai.com/v1".to_string(),
            preview_rows: 50,
        }
    }
}

impl AppConfig {
    /// Start-up sources in rank order: bundled file, then remote URL.
    pub fn loader(&self) -> Loader {
        let mut loader = Loader::new().with_source(BundledFile {
            path: self.data_path.clone(),
        });
        if let Some(url) = &self.data_url {
            loader = loader.with_source(RemoteUrl::new(url.clone()));
        }
        loader
    }

    /// The chat assistant, if an API key is configured.
    pub fn assistant(&self) -> Option<Arc<dyn ChatAssistant>> {
        let key = self.api_key.clone()?;
        Some(Arc::new(OpenAiAssistant::new(
            key,
            self.chat_model.clone(),
            self.chat_base_url.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn export_subcommand_parses() {
        let cli = Cli::try_parse_from([
            "model-crossref",
            "--data",
            "x.csv",
            "export",
            "--models",
            "100",
            "200",
            "--competitors",
            "Titus",
        ])
        .unwrap();
        let Some(Command::Export { models, competitors, base, out }) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(models, vec!["100", "200"]);
        assert_eq!(competitors, vec!["Titus"]);
        assert!(base.is_none());
        assert!(out.is_none());
    }

    #[test]
    fn loader_ranks_bundled_before_remote() {
        let config = AppConfig {
            data_url: Some("https://example.com/data.xlsx".into()),
            ..AppConfig::default()
        };
        let names = config.loader().source_names();
        assert_eq!(names.len(), 2);
        assert!(names[0].starts_with("bundled"));
        assert!(names[1].starts_with("remote"));
    }

    #[test]
    fn no_key_means_no_assistant() {
        assert!(AppConfig::default().assistant().is_none());
        let config = AppConfig {
            api_key: Some("sk-test".into()),
            ..AppConfig::default()
        };
        assert!(config.assistant().is_some());
    }
}
