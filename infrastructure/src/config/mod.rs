//! Configuration file loading for companion-classifier
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./companion.toml` or `./.companion.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/companion-classifier/config.toml`
//! 4. Environment: `COMPANION_<SECTION>__<KEY>`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_SENTENCE_LABELS, DEFAULT_TOPIC_LABELS, FileConfig, FileDispatchConfig,
    FileLoggingConfig, FileModelsConfig, FileSentenceModelConfig, FileTopicModelConfig,
};
pub use loader::ConfigLoader;
