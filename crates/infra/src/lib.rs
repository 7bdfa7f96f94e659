//! Infrastructure layer: output sinks, the observer handler, and wiring.

pub mod observer;
pub mod pipeline;
pub mod sink;


pub use observer::{OutputFormat, PrintEventHandler, UnknownOutputFormat};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use sink::{MemorySink, OutputSink, TracingSink, WriterSink};
