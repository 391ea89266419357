//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::TapConfig;
use crate::engine::{SyncConfig, TapEngine};
use crate::error::{Error, Result};
use crate::streams;
use serde_json::json;
use std::io::Write;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check => self.check().await,
            Commands::Discover => self.discover(),
            Commands::Read {
                streams,
                max_records,
                no_fail_fast,
            } => {
                self.read(streams.as_deref(), *max_records, *no_fail_fast)
                    .await
            }
            Commands::Validate => self.validate(),
        }
    }

    /// Load configuration from --config-json or --config
    fn load_config(&self) -> Result<TapConfig> {
        if let Some(ref inline) = self.cli.config_json {
            return TapConfig::from_json(inline);
        }
        let path = self.cli.config.as_ref().ok_or_else(|| {
            Error::config("Config not specified (use --config or --config-json)")
        })?;
        TapConfig::from_file(path)
    }

    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let mut engine = TapEngine::new(config);
        engine.check().await?;
        println!("{}", json!({"status": "ok"}));
        Ok(())
    }

    fn discover(&self) -> Result<()> {
        let catalog: Vec<_> = streams::all_streams()
            .iter()
            .map(|stream| {
                json!({
                    "stream": stream.name(),
                    "key_properties": stream.primary_keys(),
                    "replication_key": stream.replication_key(),
                    "schema": stream.schema().to_json(),
                })
            })
            .collect();

        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "streams": catalog }))?
        );
        Ok(())
    }

    async fn read(
        &self,
        streams_arg: Option<&str>,
        max_records: Option<usize>,
        no_fail_fast: bool,
    ) -> Result<()> {
        let config = self.load_config()?;

        let mut sync_config = SyncConfig::new().with_fail_fast(!no_fail_fast);
        if let Some(max) = max_records {
            sync_config = sync_config.with_max_records(max);
        }

        let mut engine = TapEngine::new(config).with_sync_config(sync_config);

        let messages = match streams_arg {
            Some(names) => {
                let names: Vec<String> = names
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                engine.sync_selected(&names).await?
            }
            None => engine.sync_all().await?,
        };

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for message in &messages {
            writeln!(out, "{}", serde_json::to_string(&message.to_json())?)?;
        }

        let stats = engine.stats();
        info!(
            records = stats.records_emitted,
            streams = stats.streams_synced,
            requests = stats.requests_made,
            duration_ms = stats.duration_ms,
            "read complete"
        );
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;
        println!(
            "{}",
            json!({
                "status": "ok",
                "environment": config.base_url(),
                "start_date": config.start_date.to_string(),
                "end_date": config.end_date.to_string(),
            })
        );
        Ok(())
    }
}
