//! Observer handler: renders every event it receives to an output sink.
//!
//! Stands in for any downstream consumer (projection builder, audit log,
//! persistence writer). It does not select on kind; every event is written.

use core::marker::PhantomData;
use core::str::FromStr;

use herald_events::{Event, Handler, HandlerResult};
use serde_json::json;
use thiserror::Error;

use crate::sink::OutputSink;

/// How events are rendered.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `<kind> relates=[<id>, ...] payload=<json>`
    #[default]
    Text,
    /// One JSON object per event: kind, relates, payload, occurred_at.
    Json,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown output format `{0}` (expected `text` or `json`)")]
pub struct UnknownOutputFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownOutputFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(UnknownOutputFormat(s.to_string())),
        }
    }
}

impl OutputFormat {
    pub fn render<E: Event>(self, event: &E) -> String {
        match self {
            OutputFormat::Text => {
                let relates = event
                    .relates()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "{} relates=[{}] payload={}",
                    event.kind(),
                    relates,
                    event.payload()
                )
            }
            OutputFormat::Json => json!({
                "kind": event.kind(),
                "relates": event.relates(),
                "payload": event.payload(),
                "occurred_at": event.occurred_at(),
            })
            .to_string(),
        }
    }
}

/// Writes a rendering of each received event to its sink.
pub struct PrintEventHandler<S, E> {
    sink: S,
    format: OutputFormat,
    _event: PhantomData<fn(&E)>,
}

impl<S, E> PrintEventHandler<S, E> {
    pub fn new(sink: S) -> Self {
        Self::with_format(sink, OutputFormat::default())
    }

    pub fn with_format(sink: S, format: OutputFormat) -> Self {
        Self {
            sink,
            format,
            _event: PhantomData,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

impl<S, E> core::fmt::Debug for PrintEventHandler<S, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrintEventHandler")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl<S, E> Handler<E> for PrintEventHandler<S, E>
where
    S: OutputSink,
    E: Event,
{
    fn handle(&self, event: &E) -> HandlerResult {
        self.sink.write_line(&self.format.render(event))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "print_events"
    }
}
