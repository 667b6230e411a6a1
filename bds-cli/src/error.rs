use std::io;

use bds_core::error::DeepSearchError;
use bds_extractors::{error::ExtractorError, extractor_config::ConfigError};
use thiserror::Error;

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid credentials: {source}")]
    CoreAuthFail {
        #[from]
        source: bds_extractors::auth::Error,
    },

    #[error("Failed to set up the imageboard client: {source}")]
    ExtractorFail {
        #[from]
        source: ExtractorError,
    },

    #[error("Deep search failed: {source}")]
    SearchFail {
        #[from]
        source: DeepSearchError,
    },

    #[error("Invalid server config: {source}")]
    ServerConfigFail {
        #[from]
        source: ConfigError,
    },

    #[error("Failed to write input to console: {source}")]
    DialoguerIOFail {
        #[from]
        source: dialoguer::Error,
    },

    #[error("Failed to access file: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    #[error("Invalid progress bar template: {source}")]
    ProgressTemplateFail {
        #[from]
        source: indicatif::style::TemplateError,
    },

    #[error("Selected server does not exist: {server}. Use --servers to list the known ones")]
    ServerNotExists { server: String },

    #[error("Custom API {api} needs both --max-per-search and --max-per-page")]
    MissingCustomLimits { api: String },

    #[error("Support for {imageboard} was not compiled into this binary")]
    ImageboardNotEnabled { imageboard: String },

    #[error("No imageboard support was compiled into this binary")]
    NoImageboardsEnabled,
}
