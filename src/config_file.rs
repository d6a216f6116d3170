use crate::cli::Args;
use anyhow::{Context, Result};
use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Optional defaults read from `--config <FILE>`
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub quality: Option<i64>,
    pub batch: Option<bool>,
    pub json: Option<bool>,
    pub extensions: Option<String>,
    pub recursive: Option<bool>,
    pub no_progress: Option<bool>,
    pub verbose: Option<bool>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

impl Args {
    /// Parse the process arguments and apply the config file, if any
    pub fn parse_with_config() -> Result<Self> {
        let matches = Args::command().get_matches();
        Self::from_matches_with_config(&matches)
    }

    pub fn from_matches_with_config(matches: &ArgMatches) -> Result<Self> {
        let mut args = Args::from_arg_matches(matches)?;
        args.load_and_merge_config(matches)?;
        Ok(args)
    }

    /// Load configuration from a JSON file and merge with command-line arguments.
    /// Command-line arguments take precedence over config file values.
    pub fn load_and_merge_config(&mut self, matches: &ArgMatches) -> Result<()> {
        if let Some(config_path) = self.config_file.clone() {
            let config = ConfigFile::load(&config_path)?;
            self.merge_from_config(config, matches)?;
        }
        Ok(())
    }

    fn merge_from_config(&mut self, config: ConfigFile, matches: &ArgMatches) -> Result<()> {
        let on_cli = |id: &str| matches.value_source(id) == Some(ValueSource::CommandLine);

        if !on_cli("quality") {
            if let Some(quality) = config.quality {
                if !(1..=100).contains(&quality) {
                    return Err(anyhow::anyhow!(
                        "Invalid quality {} in config file, expected 1-100",
                        quality
                    ));
                }
                self.quality = quality as u8;
            }
        }

        if !on_cli("extensions_str") {
            if let Some(extensions) = config.extensions {
                self.extensions_str = extensions;
            }
        }

        // Boolean flags
        let flags: [(&str, Option<bool>, &mut bool); 5] = [
            ("batch", config.batch, &mut self.batch),
            ("json", config.json, &mut self.json),
            ("recursive", config.recursive, &mut self.recursive),
            ("no_progress", config.no_progress, &mut self.no_progress),
            ("verbose", config.verbose, &mut self.verbose),
        ];
        for (id, value, target) in flags {
            if let Some(value) = value {
                if !on_cli(id) {
                    *target = value;
                }
            }
        }

        Ok(())
    }
}
