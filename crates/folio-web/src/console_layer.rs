#![forbid(unsafe_code)]

//! A `tracing` layer that writes one line per event to a console.
//!
//! The browser has no stdout, so events are formatted here and handed to a
//! [`ConsoleSink`]. On `wasm32` the sink is the devtools console; native
//! builds (and tests) can supply any sink.
//!
//! Line format: `LEVEL target: message key=value key=value`.

use core::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Destination for formatted log lines.
pub trait ConsoleSink: Send + Sync + 'static {
    fn write(&self, level: Level, line: &str);
}

/// Formats every event it sees and forwards the line to its sink.
#[derive(Debug, Clone, Default)]
pub struct ConsoleLayer<W> {
    sink: W,
}

impl<W: ConsoleSink> ConsoleLayer<W> {
    #[must_use]
    pub const fn new(sink: W) -> Self {
        Self { sink }
    }
}

impl<S, W> Layer<S> for ConsoleLayer<W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: ConsoleSink,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let line = format_event(event);
        self.sink.write(*event.metadata().level(), &line);
    }
}

/// Render an event as a single console line.
#[must_use]
pub fn format_event(event: &Event<'_>) -> String {
    let meta = event.metadata();
    let mut visitor = LineVisitor::default();
    event.record(&mut visitor);

    let mut line = format!("{} {}: {}", meta.level(), meta.target(), visitor.message);
    for (name, value) in &visitor.fields {
        let _ = write!(line, " {name}={value}");
    }
    line
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: Vec<(&'static str, String)>,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            self.fields.push((field.name(), value.to_owned()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push((field.name(), format!("{value:?}")));
        }
    }
}
