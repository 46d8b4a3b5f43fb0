use crate::config::{Settings, TomlConfig};
use crate::domain::model::Disease;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "disease-predict")]
#[command(about = "Diabetes, heart disease and Parkinson's screening with pre-trained models")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory containing the model files (overrides [models] base_path)
    #[arg(long, global = true)]
    pub model_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Submit one set of values and print the diagnosis
    Predict {
        /// diabetes, heart or parkinsons
        disease: Disease,

        /// Field values in form order
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Fill in the form interactively
    Form { disease: Disease },

    /// Diagnose every row of a CSV file
    Batch {
        disease: Disease,

        #[arg(short, long)]
        input: String,

        /// Write results here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show model availability and form fields
    Models,

    /// Serve the HTTP JSON API (requires the `server` feature)
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
}

impl CliConfig {
    /// 讀取 --config 指定的 TOML（若有），再套用命令列覆蓋
    pub fn settings(&self) -> Result<Settings> {
        let base = match &self.config {
            Some(path) => Settings::from_toml(&TomlConfig::from_file(path)?),
            None => Settings::default(),
        };

        Ok(base
            .with_model_dir(self.model_dir.as_deref())
            .with_bind(self.bind_override())
            .with_verbose(self.verbose))
    }

    fn bind_override(&self) -> Option<&str> {
        match &self.command {
            Command::Serve { bind } => bind.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;

    #[test]
    fn test_parse_predict_with_negative_values() {
        let cli = CliConfig::try_parse_from([
            "disease-predict",
            "--model-dir",
            "/tmp/models",
            "predict",
            "heart",
            "63",
            "1",
            "3",
            "145",
            "233",
            "1",
            "0",
            "150",
            "0",
            "-2.3",
            "0",
            "0",
            "1",
        ])
        .unwrap();

        match &cli.command {
            Command::Predict { disease, values } => {
                assert_eq!(*disease, Disease::HeartDisease);
                assert_eq!(values.len(), 13);
                assert_eq!(values[9], "-2.3");
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let settings = cli.settings().unwrap();
        assert_eq!(settings.model_dir(), "/tmp/models");
    }

    #[test]
    fn test_unknown_disease_is_rejected() {
        assert!(CliConfig::try_parse_from(["disease-predict", "form", "flu"]).is_err());
    }

    #[test]
    fn test_parse_batch() {
        let cli = CliConfig::try_parse_from([
            "disease-predict",
            "batch",
            "parkinsons",
            "--input",
            "voices.csv",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Batch {
                disease: Disease::Parkinsons,
                output: None,
                ..
            }
        ));
    }

    #[test]
    fn test_verbose_serve_logs_at_debug() {
        let cli = CliConfig::try_parse_from(["disease-predict", "serve", "-v", "--bind", "0.0.0.0:9000"]).unwrap();
        let settings = cli.settings().unwrap();

        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.bind_address(), "0.0.0.0:9000");

        let quiet = CliConfig::try_parse_from(["disease-predict", "serve"]).unwrap();
        assert_eq!(quiet.settings().unwrap().log_level, "info");
    }
}
