//! Immutable request-scoped key/value carrier

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Request-scoped execution context
///
/// A context is a persistent chain of bindings. [`Context::with_value`] never
/// touches the receiver: it returns a child that shares the parent's chain,
/// so contexts form a tree of derivations and can be cloned and sent across
/// threads freely.
///
/// Values are keyed by a marker type. Two keys are the same key exactly when
/// they are the same type, so a private zero-size key type cannot collide
/// with anything else stored in the tree.
///
/// # Example
///
/// ```
/// use ctxlog_core::Context;
///
/// struct RequestId;
///
/// let root = Context::background();
/// let ctx = root.with_value::<RequestId, _>("req-42".to_string());
///
/// assert_eq!(ctx.get::<RequestId, String>().map(String::as_str), Some("req-42"));
/// assert!(root.get::<RequestId, String>().is_none());
/// ```
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Binding>>,
}

struct Binding {
    key: TypeId,
    key_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Binding>>,
}

impl Context {
    /// The empty root context
    pub fn background() -> Self {
        Self { head: None }
    }

    /// Derive a child context with `value` stored under key type `K`
    ///
    /// A later binding under the same key shadows earlier ones for lookups
    /// through the child; the parent keeps seeing its own value.
    pub fn with_value<K, V>(&self, value: V) -> Self
    where
        K: 'static,
        V: Any + Send + Sync,
    {
        Self {
            head: Some(Arc::new(Binding {
                key: TypeId::of::<K>(),
                key_name: type_name::<K>(),
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// The nearest value stored under key type `K`, whatever its type
    pub fn value<K: 'static>(&self) -> Option<&(dyn Any + Send + Sync)> {
        let key = TypeId::of::<K>();
        let mut node = self.head.as_deref();
        while let Some(binding) = node {
            if binding.key == key {
                return Some(binding.value.as_ref());
            }
            node = binding.parent.as_deref();
        }
        None
    }

    /// The nearest value under key type `K`, if it has type `V`
    pub fn get<K: 'static, V: 'static>(&self) -> Option<&V> {
        self.value::<K>().and_then(|v| v.downcast_ref::<V>())
    }

    /// Number of bindings in the chain, shadowed ones included
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self.head.as_deref();
        while let Some(binding) = node {
            depth += 1;
            node = binding.parent.as_deref();
        }
        depth
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = Vec::new();
        let mut node = self.head.as_deref();
        while let Some(binding) = node {
            keys.push(binding.key_name);
            node = binding.parent.as_deref();
        }
        f.debug_struct("Context").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct KeyA;
    struct KeyB;

    #[test]
    fn test_background_is_empty() {
        let ctx = Context::background();
        assert!(ctx.value::<KeyA>().is_none());
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_with_value_does_not_touch_parent() {
        let parent = Context::background().with_value::<KeyA, _>(1u32);
        let child = parent.with_value::<KeyB, _>("b");

        assert_eq!(child.get::<KeyA, u32>(), Some(&1));
        assert_eq!(child.get::<KeyB, &str>(), Some(&"b"));
        assert!(parent.get::<KeyB, &str>().is_none());
        assert_eq!(parent.depth(), 1);
        assert_eq!(child.depth(), 2);
    }

    #[test]
    fn test_shadowing() {
        let parent = Context::background().with_value::<KeyA, _>(1u32);
        let child = parent.with_value::<KeyA, _>(2u32);

        assert_eq!(child.get::<KeyA, u32>(), Some(&2));
        assert_eq!(parent.get::<KeyA, u32>(), Some(&1));
    }

    #[test]
    fn test_keys_distinct_by_type() {
        let ctx = Context::background()
            .with_value::<KeyA, _>("a")
            .with_value::<KeyB, _>("b");

        assert_eq!(ctx.get::<KeyA, &str>(), Some(&"a"));
        assert_eq!(ctx.get::<KeyB, &str>(), Some(&"b"));
    }

    #[test]
    fn test_wrong_value_type() {
        let ctx = Context::background().with_value::<KeyA, _>(5i64);
        assert!(ctx.value::<KeyA>().is_some());
        assert!(ctx.get::<KeyA, String>().is_none());
    }

    #[test]
    fn test_siblings_independent() {
        let parent = Context::background().with_value::<KeyA, _>(0u8);
        let left = parent.with_value::<KeyB, _>(1u8);
        let right = parent.with_value::<KeyB, _>(2u8);

        assert_eq!(left.get::<KeyB, u8>(), Some(&1));
        assert_eq!(right.get::<KeyB, u8>(), Some(&2));
        assert_eq!(left.get::<KeyA, u8>(), right.get::<KeyA, u8>());
    }

    #[test]
    fn test_debug_lists_keys() {
        let ctx = Context::background().with_value::<KeyA, _>(1u8);
        assert!(format!("{:?}", ctx).contains("KeyA"));
    }
}
