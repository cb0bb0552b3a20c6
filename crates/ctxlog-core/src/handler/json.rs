//! JSON handler: one object per line

use std::io::{self, Write};
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::Mutex;
use serde_json::{json, Map, Number};

use super::text::SharedWriter;
use super::traits::{BoundAttrs, Handler, HandlerOptions, HandlerResult};
use crate::context::Context;
use crate::types::{Attr, Level, Record, Value, MISSING_VALUE};

/// A handler that writes each record as a JSON object on its own line
///
/// `time` is milliseconds since the Unix epoch. Groups become nested
/// objects; a duplicated key keeps the last value written.
#[derive(Clone)]
pub struct JsonHandler {
    writer: SharedWriter,
    options: HandlerOptions,
    bound: BoundAttrs,
}

impl JsonHandler {
    /// Create a JSON handler writing to `writer`
    pub fn new(writer: impl Write + Send + 'static, options: HandlerOptions) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
            options,
            bound: BoundAttrs::default(),
        }
    }

    /// Create a JSON handler writing to stderr
    pub fn stderr(options: HandlerOptions) -> Self {
        Self::new(io::stderr(), options)
    }

    /// Create a JSON handler writing to stdout
    pub fn stdout(options: HandlerOptions) -> Self {
        Self::new(io::stdout(), options)
    }

    fn derive(&self, bound: BoundAttrs) -> Arc<dyn Handler> {
        Arc::new(Self {
            writer: Arc::clone(&self.writer),
            options: self.options.clone(),
            bound,
        })
    }

    /// Build the JSON object for a record
    pub(crate) fn to_object(&self, record: &Record) -> serde_json::Value {
        let mut root = Map::new();
        let millis = record
            .time
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);

        root.insert("time".to_string(), json!(millis));
        root.insert("level".to_string(), json!(record.level.to_string()));
        if self.options.add_source {
            if let Some(source) = record.source {
                root.insert(
                    "source".to_string(),
                    json!({ "file": source.file(), "line": source.line() }),
                );
            }
        }
        root.insert("msg".to_string(), json!(record.message));

        for (groups, attr) in &self.bound.attrs {
            insert_at(&mut root, groups, attr);
        }
        for attr in &record.attrs {
            insert_at(&mut root, &self.bound.groups, attr);
        }

        serde_json::Value::Object(root)
    }
}

impl Handler for JsonHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        level >= self.options.level
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> HandlerResult<()> {
        let mut line = serde_json::to_vec(&self.to_object(record))?;
        line.push(b'\n');

        let mut writer = self.writer.lock();
        writer.write_all(&line)?;
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

impl std::fmt::Debug for JsonHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonHandler")
            .field("options", &self.options)
            .field("groups", &self.bound.groups)
            .field("bound_attrs", &self.bound.attrs.len())
            .finish()
    }
}

fn insert_at(root: &mut Map<String, serde_json::Value>, groups: &[String], attr: &Attr) {
    let mut target = root;
    for group in groups {
        let slot = target
            .entry(group.clone())
            .or_insert_with(|| serde_json::Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = serde_json::Value::Object(Map::new());
        }
        let Some(map) = slot.as_object_mut() else {
            return;
        };
        target = map;
    }
    target.insert(attr.key.clone(), to_json(&attr.value));
}

fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => json!(s),
        Value::Int(v) => json!(v),
        Value::Uint(v) => json!(v),
        Value::Float(v) => Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| json!(v.to_string())),
        Value::Bool(v) => json!(v),
        Value::Duration(d) => json!(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)),
        Value::Group(attrs) => {
            let mut map = Map::new();
            for attr in attrs {
                map.insert(attr.key.clone(), to_json(&attr.value));
            }
            serde_json::Value::Object(map)
        }
        Value::Missing => json!(MISSING_VALUE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::text::tests::SharedBuf;
    use std::time::Duration;

    #[test]
    fn test_json_line() {
        let buf = SharedBuf::default();
        let handler = JsonHandler::new(buf.clone(), HandlerOptions::default());
        let mut record = Record::new(Level::INFO, "hello").with_attrs(vec![
            Attr::new("k", "v"),
            Attr::new("n", 3),
            Attr::new("ok", true),
        ]);
        record.time = SystemTime::UNIX_EPOCH + Duration::from_millis(1500);

        handler.handle(&Context::background(), &record).unwrap();

        let out = buf.contents();
        assert!(out.ends_with('\n'));
        let parsed: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(
            parsed,
            json!({ "time": 1500, "level": "INFO", "msg": "hello", "k": "v", "n": 3, "ok": true })
        );
    }

    #[test]
    fn test_json_groups_nest() {
        let handler = JsonHandler::new(io::sink(), HandlerOptions::default());
        let derived = JsonHandler {
            bound: handler
                .bound
                .with_attrs(vec![Attr::new("service", "api")])
                .with_group("http")
                .with_attrs(vec![Attr::new("method", "GET")]),
            ..handler.clone()
        };
        let record = Record::new(Level::WARN, "slow").with_attrs(vec![
            Attr::new("status", 200u16),
            Attr::group("timing", vec![Attr::new("ms", 12.5)]),
        ]);

        let object = derived.to_object(&record);
        assert_eq!(object["service"], json!("api"));
        assert_eq!(object["http"]["method"], json!("GET"));
        assert_eq!(object["http"]["status"], json!(200));
        assert_eq!(object["http"]["timing"]["ms"], json!(12.5));
        assert_eq!(object["level"], json!("WARN"));
    }

    #[test]
    fn test_json_special_values() {
        let handler = JsonHandler::new(io::sink(), HandlerOptions::default());
        let record = Record::new(Level(2), "m").with_attrs(vec![
            Attr::new("orphan", Value::Missing),
            Attr::new("wait", Duration::from_micros(3)),
            Attr::new("nan", f64::NAN),
        ]);

        let object = handler.to_object(&record);
        assert_eq!(object["level"], json!("INFO+2"));
        assert_eq!(object["orphan"], json!("!MISSING"));
        assert_eq!(object["wait"], json!(3000));
        assert_eq!(object["nan"], json!("NaN"));
    }

    #[test]
    fn test_json_duration_saturates() {
        let handler = JsonHandler::new(io::sink(), HandlerOptions::default());
        let record = Record::new(Level::INFO, "m")
            .with_attrs(vec![Attr::new("forever", Duration::MAX)]);

        let object = handler.to_object(&record);
        assert_eq!(object["forever"], json!(u64::MAX));
    }

    #[test]
    fn test_json_derivation_leaves_receiver() {
        let buf = SharedBuf::default();
        let handler = JsonHandler::new(buf.clone(), HandlerOptions::default());
        let _derived = handler.with_attrs(vec![Attr::new("extra", 1)]);

        handler
            .handle(&Context::background(), &Record::new(Level::INFO, "m"))
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(buf.contents().trim_end()).unwrap();
        assert!(parsed.get("extra").is_none());
    }
}
