//! Subscriber setup for the calculators' `tracing` events
//!
//! The library itself only emits events. Applications call [`init_logging`]
//! once with the `[logging]` section of their config.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Level for this crate's events (`error` .. `trace`); `RUST_LOG` wins if set
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Extra JSON log file
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Roll `file_path` over daily instead of appending to one file
    #[serde(default = "default_rotation")]
    pub rotation: bool,

    #[serde(default)]
    pub include_spans: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_rotation() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            file_path: None,
            rotation: default_rotation(),
            include_spans: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

fn build_filter(config: &LogConfig) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(format!("steptracker={}", config.level))?),
    }
}

/// One formatting layer for any writer, shared by stdout and file output
fn fmt_layer<S, W>(
    format: LogFormat,
    include_spans: bool,
    writer: W,
) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer).with_target(true);
    match format {
        LogFormat::Pretty => layer
            .pretty()
            .with_span_events(if include_spans {
                FmtSpan::ENTER | FmtSpan::CLOSE
            } else {
                FmtSpan::NONE
            })
            .boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(include_spans)
            .with_span_list(include_spans)
            .boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

fn file_writer(config: &LogConfig) -> anyhow::Result<Option<BoxMakeWriter>> {
    let Some(path) = &config.file_path else {
        return Ok(None);
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let writer = if config.rotation {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("steptracker.log");
        BoxMakeWriter::new(tracing_appender::rolling::daily(dir, file_name))
    } else {
        let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
        BoxMakeWriter::new(Mutex::new(file))
    };
    Ok(Some(writer))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let file_layer = file_writer(config)?
        .map(|writer| fmt_layer(LogFormat::Json, config.include_spans, writer));

    tracing_subscriber::registry()
        .with(build_filter(config)?)
        .with(fmt_layer(config.format, config.include_spans, std::io::stdout))
        .with(file_layer)
        .try_init()?;

    tracing::info!(
        level = %config.level,
        format = ?config.format,
        file = ?config.file_path,
        "Logging initialized"
    );
    Ok(())
}
