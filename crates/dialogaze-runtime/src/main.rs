// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use dialogaze_config::{load_config_or_default, validate_config};
use dialogaze_encoding::PipelineKind;
use dialogaze_observability::{debug_flags_help, init_logging, CrateDebugFlags, DEBUG_ENV};
use dialogaze_runtime::{load_pipeline, logging_options, open_endpoints, RuntimeLoop};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Component {
    /// Predict the addressee of each turn
    Addressee,
    /// Predict and schedule the speaker's gaze for each turn
    Vfoa,
}

impl From<Component> for PipelineKind {
    fn from(component: Component) -> Self {
        match component {
            Component::Addressee => PipelineKind::Addressee,
            Component::Vfoa => PipelineKind::Vfoa,
        }
    }
}

/// dialogaze - addressee and speaker-gaze prediction for multi-party dialogue
#[derive(Parser, Debug)]
#[command(
    name = "dialogaze",
    version,
    author,
    long_about = None,
    after_help = debug_flags_help()
)]
struct Args {
    /// Component to run
    #[arg(value_enum)]
    component: Component,

    /// Path to dialogaze.toml (default: discovered from the working directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host the inbound SUB socket connects to
    #[arg(long)]
    in_ip: Option<String>,

    #[arg(long)]
    in_port: Option<u16>,

    /// Inbound subscription topic
    #[arg(long)]
    in_topic_name: Option<String>,

    /// Host the outbound PUB socket binds to
    #[arg(long)]
    out_ip: Option<String>,

    #[arg(long)]
    out_port: Option<u16>,

    /// Outbound topic prefix
    #[arg(long)]
    out_topic_name: Option<String>,

    /// Sleep between empty polls, in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    #[arg(long)]
    addressee_model: Option<PathBuf>,

    #[arg(long)]
    vfoa_turn_count_model: Option<PathBuf>,

    #[arg(long)]
    vfoa_duration_share_model: Option<PathBuf>,

    #[arg(long)]
    vfoa_direction_model: Option<PathBuf>,

    /// Normalized gaze shares at or below this are dropped
    #[arg(long)]
    share_threshold: Option<f64>,

    #[arg(long)]
    log_level: Option<String>,

    /// Enable debug logging for a crate (repeatable), e.g. `--debug dialogaze-io`
    #[arg(long = "debug", value_name = "CRATE")]
    debug: Vec<String>,

    /// Enable debug logging for all crates
    #[arg(long, default_value_t = false)]
    debug_all: bool,
}

impl Args {
    /// Overrides in the key form the config loader expects.
    fn config_overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        let mut put = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                overrides.insert(key.to_string(), value);
            }
        };
        let path = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string());

        put("in_ip", self.in_ip.clone());
        put("in_port", self.in_port.map(|p| p.to_string()));
        put("in_topic_name", self.in_topic_name.clone());
        put("out_ip", self.out_ip.clone());
        put("out_port", self.out_port.map(|p| p.to_string()));
        put("out_topic_name", self.out_topic_name.clone());
        put("poll_interval_ms", self.poll_interval_ms.map(|v| v.to_string()));
        put("addressee_model", path(&self.addressee_model));
        put("vfoa_turn_count_model", path(&self.vfoa_turn_count_model));
        put("vfoa_duration_share_model", path(&self.vfoa_duration_share_model));
        put("vfoa_direction_model", path(&self.vfoa_direction_model));
        put("share_threshold", self.share_threshold.map(|v| v.to_string()));
        put("log_level", self.log_level.clone());
        overrides
    }

    fn debug_flags(&self) -> CrateDebugFlags {
        let mut flags = CrateDebugFlags::default();
        for crate_name in &self.debug {
            flags.enable(crate_name);
        }
        if self.debug_all {
            flags.enable_all();
        }
        if let Ok(value) = std::env::var(DEBUG_ENV) {
            flags.merge_env_value(&value);
        }
        flags
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let kind = PipelineKind::from(args.component);

    // 1. Configuration
    let config = load_config_or_default(args.config.as_deref(), Some(&args.config_overrides()))
        .context("Failed to load configuration")?;
    validate_config(&config)?;

    // 2. Logging
    let _logging = init_logging(&args.debug_flags(), &logging_options(&config.logging))?;
    info!("dialogaze {} starting ({} component)", dialogaze_runtime::VERSION, kind);

    // 3. Models
    let pipeline = load_pipeline(kind, &config.models, &config.scheduler)
        .with_context(|| format!("Failed to load {} models", kind))?;
    info!("✓ {} models loaded", kind);

    // 4. Transport
    let (subscriber, publisher) = open_endpoints(&config)?;

    // 5. Signal handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Shutdown signal received...");
        r.store(false, Ordering::SeqCst);
    })?;

    // 6. Loop
    let mut runtime = RuntimeLoop::new(
        pipeline,
        subscriber,
        publisher,
        Duration::from_millis(config.runtime.poll_interval_ms),
    );
    info!("🔄 Running (Press Ctrl+C to stop)...");
    runtime.run(&running);

    // 7. Release the outbound endpoint
    let (_subscriber, mut publisher, stats) = runtime.into_parts();
    if let Err(e) = publisher.close() {
        warn!("Failed to close publisher: {}", e);
    }

    // 8. Stats
    info!(
        "✅ Shutdown complete: {} received, {} published, {} dropped",
        stats.received, stats.published, stats.dropped
    );
    Ok(())
}
