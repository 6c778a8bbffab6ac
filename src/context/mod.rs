//! Request-scoped context values
//!
//! A [`Context`] is an immutable chain of key/value bindings. Adding a
//! binding creates a child context that points at its parent; the parent is
//! never modified, so a context can be handed to other threads and extended
//! independently by each of them.
//!
//! Keys are matched by type and value: a binding made with a key of type
//! `K` is only visible to lookups using a `K` that compares equal. Crates
//! keep their bindings private by using a private key type.
//!
//! # Example
//!
//! ```
//! use ctxlog::Context;
//!
//! #[derive(PartialEq)]
//! struct RequestId;
//!
//! let root = Context::background();
//! let ctx = root.with_value(RequestId, "req-42".to_string());
//!
//! assert_eq!(ctx.value::<_, String>(&RequestId).map(String::as_str), Some("req-42"));
//! assert!(root.value::<_, String>(&RequestId).is_none());
//! ```

pub mod binding;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

struct Node {
    parent: Option<Arc<Node>>,
    key: Box<dyn Any + Send + Sync>,
    value: Arc<dyn Any + Send + Sync>,
}

#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// The empty root context
    pub fn background() -> Self {
        Self::default()
    }

    /// A child context with `value` bound under `key`
    ///
    /// A binding shadows any binding with an equal key further up the chain.
    #[must_use]
    pub fn with_value<K, V>(&self, key: K, value: V) -> Context
    where
        K: Any + PartialEq + Send + Sync,
        V: Any + Send + Sync,
    {
        Context {
            head: Some(Arc::new(Node {
                parent: self.head.clone(),
                key: Box::new(key),
                value: Arc::new(value),
            })),
        }
    }

    /// The value bound under `key` in the nearest matching binding
    ///
    /// Returns `None` if no binding matches, or if the nearest matching
    /// binding holds a value that is not a `V`.
    pub fn value<K, V>(&self, key: &K) -> Option<&V>
    where
        K: Any + PartialEq,
        V: Any,
    {
        self.nodes()
            .find(|node| node.key.downcast_ref::<K>() == Some(key))
            .and_then(|node| node.value.downcast_ref::<V>())
    }

    /// Number of bindings in the chain
    pub fn depth(&self) -> usize {
        self.nodes().count()
    }

    pub fn is_background(&self) -> bool {
        self.head.is_none()
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(self.head.as_deref(), |node| node.parent.as_deref())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("depth", &self.depth())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Key(&'static str);

    #[derive(Debug, PartialEq)]
    struct OtherKey(&'static str);

    #[test]
    fn test_background_is_empty() {
        let ctx = Context::background();
        assert!(ctx.is_background());
        assert_eq!(ctx.depth(), 0);
        assert!(ctx.value::<_, i32>(&Key("a")).is_none());
    }

    #[test]
    fn test_parent_not_mutated() {
        let parent = Context::background().with_value(Key("a"), 1_i32);
        let child = parent.with_value(Key("b"), 2_i32);

        assert_eq!(parent.depth(), 1);
        assert_eq!(child.depth(), 2);
        assert!(parent.value::<_, i32>(&Key("b")).is_none());
        assert_eq!(child.value::<_, i32>(&Key("a")), Some(&1));
    }

    #[test]
    fn test_nearest_binding_shadows() {
        let ctx = Context::background()
            .with_value(Key("a"), 1_i32)
            .with_value(Key("a"), 2_i32);
        assert_eq!(ctx.value::<_, i32>(&Key("a")), Some(&2));
    }

    #[test]
    fn test_key_type_must_match() {
        let ctx = Context::background().with_value(OtherKey("a"), 1_i32);
        assert!(ctx.value::<_, i32>(&Key("a")).is_none());
        assert_eq!(ctx.value::<_, i32>(&OtherKey("a")), Some(&1));
    }

    #[test]
    fn test_wrong_value_type_is_absent() {
        let ctx = Context::background().with_value(Key("a"), "text");
        assert!(ctx.value::<_, i32>(&Key("a")).is_none());
    }

    #[test]
    fn test_siblings_are_independent() {
        let root = Context::background().with_value(Key("shared"), 0_i32);
        let left = root.with_value(Key("side"), 1_i32);
        let right = root.with_value(Key("side"), 2_i32);

        assert_eq!(left.value::<_, i32>(&Key("side")), Some(&1));
        assert_eq!(right.value::<_, i32>(&Key("side")), Some(&2));
        assert_eq!(root.depth(), 1);
    }

    #[test]
    fn test_context_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Context>();
    }
}
