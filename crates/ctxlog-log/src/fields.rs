//! Attribute translation into `log::kv` pairs

use std::borrow::Cow;

use ctxlog_core::{Attr, Value, MISSING_VALUE};
use log::kv::{self, Key, Source, VisitSource};

/// Bound fields followed by a record's attributes, as a `log::kv::Source`
///
/// Group values are flattened: each member becomes its own pair under a
/// dotted key (`req.id`), nested groups included. A group with an empty key
/// contributes its members at the enclosing level; an empty group emits
/// nothing.
pub(crate) struct Fields<'a> {
    pairs: Vec<(Cow<'a, str>, &'a Value)>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(bound: &'a [Attr], record: &'a [Attr]) -> Self {
        let mut pairs = Vec::with_capacity(bound.len() + record.len());
        flatten(None, bound.iter().chain(record), &mut pairs);
        Self { pairs }
    }
}

fn flatten<'a>(
    prefix: Option<&str>,
    attrs: impl Iterator<Item = &'a Attr>,
    out: &mut Vec<(Cow<'a, str>, &'a Value)>,
) {
    for attr in attrs {
        let key: Cow<'a, str> = match prefix {
            Some(prefix) if !attr.key.is_empty() => Cow::Owned(format!("{}.{}", prefix, attr.key)),
            Some(prefix) => Cow::Owned(prefix.to_string()),
            None => Cow::Borrowed(attr.key.as_str()),
        };
        match &attr.value {
            Value::Group(members) => {
                let prefix = (!key.is_empty()).then_some(key.as_ref());
                flatten(prefix, members.iter(), out);
            }
            value => out.push((key, value)),
        }
    }
}

impl Source for Fields<'_> {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), kv::Error> {
        for (key, value) in &self.pairs {
            visitor.visit_pair(Key::from_str(key), field_value(value))?;
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.pairs.len()
    }
}

/// The `log::kv` form of a non-group value
///
/// Primitives keep their kind; durations go through `Debug`.
pub(crate) fn field_value(value: &Value) -> kv::Value<'_> {
    match value {
        Value::String(s) => kv::Value::from(s.as_str()),
        Value::Int(v) => kv::Value::from(*v),
        Value::Uint(v) => kv::Value::from(*v),
        Value::Float(v) => kv::Value::from(*v),
        Value::Bool(v) => kv::Value::from(*v),
        Value::Duration(d) => kv::Value::from_debug(d),
        Value::Group(_) => kv::Value::from_display(value),
        Value::Missing => kv::Value::from(MISSING_VALUE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Default)]
    struct Collect(Vec<(String, String)>);

    impl<'kvs> VisitSource<'kvs> for Collect {
        fn visit_pair(&mut self, key: Key<'kvs>, value: kv::Value<'kvs>) -> Result<(), kv::Error> {
            self.0.push((key.to_string(), value.to_string()));
            Ok(())
        }
    }

    fn collect(fields: &Fields<'_>) -> Vec<(String, String)> {
        let mut collect = Collect::default();
        fields.visit(&mut collect).unwrap();
        collect.0
    }

    fn kv(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_fields_order() {
        let bound = vec![Attr::new("service", "api")];
        let record = vec![Attr::new("k", "v"), Attr::new("k", "w")];
        let fields = Fields::new(&bound, &record);

        assert_eq!(fields.count(), 3);
        assert_eq!(
            collect(&fields),
            vec![kv("service", "api"), kv("k", "v"), kv("k", "w")]
        );
    }

    #[test]
    fn test_group_values_flattened() {
        let record = vec![
            Attr::group(
                "req",
                vec![
                    Attr::new("id", 7),
                    Attr::group("peer", vec![Attr::new("ip", "10.0.0.1")]),
                ],
            ),
            Attr::group("", vec![Attr::new("inline", true)]),
            Attr::group("empty", vec![]),
        ];
        let fields = Fields::new(&[], &record);

        assert_eq!(fields.count(), 3);
        assert_eq!(
            collect(&fields),
            vec![kv("req.id", "7"), kv("req.peer.ip", "10.0.0.1"), kv("inline", "true")]
        );
    }

    #[test]
    fn test_primitive_kinds_preserved() {
        assert_eq!(field_value(&Value::Int(-3)).to_i64(), Some(-3));
        assert_eq!(field_value(&Value::Uint(7)).to_u64(), Some(7));
        assert_eq!(field_value(&Value::Bool(true)).to_bool(), Some(true));
        assert_eq!(field_value(&Value::Float(0.5)).to_f64(), Some(0.5));
        assert_eq!(
            field_value(&Value::from("s")).to_borrowed_str(),
            Some("s")
        );
    }

    #[test]
    fn test_other_values_rendered() {
        assert_eq!(field_value(&Value::Missing).to_string(), "!MISSING");
        assert_eq!(
            field_value(&Value::Duration(Duration::from_millis(2))).to_string(),
            "2ms"
        );
    }
}
