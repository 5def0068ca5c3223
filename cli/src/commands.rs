//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// How `classify` prints the stored result
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON
    #[default]
    Pretty,
    /// The exact JSON written to the shared store
    Json,
    /// One line per sentence with each classifier's most likely label
    Summary,
}

/// CLI arguments for companion-classifier
#[derive(Parser, Debug)]
#[command(name = "companion-classifier")]
#[command(author, version, about = "Topic and sentence-type classification for dialogue turns")]
#[command(long_about = r#"
Classifies the sentences of a POS-tagged dialogue turn.

Every sentence is scored by each configured classifier:
1. topic:    naive Bayes over the raw text (greeting, farewell, weather, ...)
2. sentence: decision tree over an eight-position symbolic feature sequence
             (question kind, imperative, declarative)

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./companion.toml         Project-level config
3. ~/.config/companion-classifier/config.toml   Global config
4. COMPANION_<SECTION>__<KEY> environment variables

Example:
  companion-classifier transform --tokens "What is your name ?" --tags "WP VBZ PRP$ NN ."
  companion-classifier classify turn.json
  companion-classifier show-config --sources
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the feature sequence of one tagged sentence
    Transform {
        /// Whitespace-separated tokens
        #[arg(long)]
        tokens: String,

        /// Whitespace-separated Penn Treebank tags, one per token
        #[arg(long)]
        tags: String,

        /// Keep `?`, `!` and `.` as typed instead of QM, EM and DT
        #[arg(long)]
        raw_terminators: bool,
    },

    /// Classify an analyzed-text JSON file through the request dispatcher
    Classify {
        /// File holding `{"sentences": [...]}` as written by the NLP stage
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Request id (also the shared-store entry key)
        #[arg(long, default_value = "cli")]
        id: String,

        #[arg(short, long, value_enum, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Print the effective configuration
    ShowConfig {
        /// Also list the configuration sources
        #[arg(long)]
        sources: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transform() {
        let cli = Cli::parse_from([
            "companion-classifier",
            "transform",
            "--tokens",
            "Close the door !",
            "--tags",
            "VB DT NN .",
            "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Transform {
                tokens,
                raw_terminators,
                ..
            } => {
                assert_eq!(tokens, "Close the door !");
                assert!(!raw_terminators);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_classify_defaults() {
        let cli = Cli::parse_from(["companion-classifier", "--no-config", "classify", "turn.json"]);
        assert!(cli.no_config);
        match cli.command {
            Command::Classify { input, id, output } => {
                assert_eq!(input, PathBuf::from("turn.json"));
                assert_eq!(id, "cli");
                assert!(matches!(output, OutputFormat::Pretty));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
