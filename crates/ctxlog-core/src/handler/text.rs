//! Text handler: one `key=value` line per record

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::Mutex;

use super::traits::{qualify, BoundAttrs, Handler, HandlerOptions, HandlerResult};
use crate::context::Context;
use crate::types::{Attr, Level, Record, Value};

pub(crate) type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// A handler that writes `key=value` lines
///
/// ```text
/// time=14:03:07.221 level=INFO msg="request served" req_id=abc status=200
/// ```
///
/// Keys of grouped attributes are joined with dots (`http.status=200`).
/// Values containing spaces, quotes or `=` are quoted.
#[derive(Clone)]
pub struct TextHandler {
    writer: SharedWriter,
    options: HandlerOptions,
    bound: BoundAttrs,
}

impl TextHandler {
    /// Create a text handler writing to `writer`
    pub fn new(writer: impl Write + Send + 'static, options: HandlerOptions) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
            options,
            bound: BoundAttrs::default(),
        }
    }

    /// Create a text handler writing to stderr
    pub fn stderr(options: HandlerOptions) -> Self {
        Self::new(io::stderr(), options)
    }

    /// Create a text handler writing to stdout
    pub fn stdout(options: HandlerOptions) -> Self {
        Self::new(io::stdout(), options)
    }

    /// The options this handler was built with
    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    fn derive(&self, bound: BoundAttrs) -> Arc<dyn Handler> {
        Arc::new(Self {
            writer: Arc::clone(&self.writer),
            options: self.options.clone(),
            bound,
        })
    }

    /// Render a record as one line, without the trailing newline
    pub(crate) fn format(&self, record: &Record) -> String {
        let mut line = String::with_capacity(128);
        let _ = write!(line, "time={} level={}", format_time(record.time), record.level);

        if self.options.add_source {
            if let Some(source) = record.source {
                let _ = write!(line, " source={}:{}", source.file(), source.line());
            }
        }

        line.push_str(" msg=");
        push_text(&mut line, &record.message);

        for (groups, attr) in &self.bound.attrs {
            push_attr(&mut line, groups, attr);
        }
        for attr in &record.attrs {
            push_attr(&mut line, &self.bound.groups, attr);
        }

        line
    }
}

impl Handler for TextHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        level >= self.options.level
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> HandlerResult<()> {
        let mut line = self.format(record);
        line.push('\n');

        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        self.derive(self.bound.with_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        self.derive(self.bound.with_group(name))
    }
}

impl std::fmt::Debug for TextHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextHandler")
            .field("options", &self.options)
            .field("groups", &self.bound.groups)
            .field("bound_attrs", &self.bound.attrs.len())
            .finish()
    }
}

fn push_attr(line: &mut String, groups: &[String], attr: &Attr) {
    match &attr.value {
        Value::Group(members) => {
            let mut nested = groups.to_vec();
            nested.push(attr.key.clone());
            for member in members {
                push_attr(line, &nested, member);
            }
        }
        value => {
            line.push(' ');
            push_text(line, &qualify(groups, &attr.key));
            line.push('=');
            push_text(line, &value.to_string());
        }
    }
}

fn push_text(line: &mut String, text: &str) {
    let needs_quotes = text.is_empty()
        || text
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '=' || c.is_control());
    if needs_quotes {
        let _ = write!(line, "{:?}", text);
    } else {
        line.push_str(text);
    }
}

/// Time of day in UTC as `HH:MM:SS.mmm`
pub(crate) fn format_time(time: SystemTime) -> String {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs();
            let millis = d.subsec_millis();
            let hours = (secs % 86400) / 3600;
            let mins = (secs % 3600) / 60;
            let secs = secs % 60;
            format!("{:02}:{:02}:{:02}.{:03}", hours, mins, secs, millis)
        })
        .unwrap_or_else(|_| "??:??:??.???".to_string())
}
