use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::mem::{self, ManuallyDrop};
use std::ptr;

/// What a nested value turns out to be once opened up.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<L, C> {
    Leaf(L),
    Container(C),
}

/// Capability needed to take part in flattening: tell leaves apart from
/// containers and hand over a container's children in order.
///
/// Implementations must not be cyclic; a value that contains itself makes
/// the walk non-terminating.
pub trait Nested: Sized {
    type Leaf;
    type Children: IntoIterator<Item = Self>;

    fn into_node(self) -> Node<Self::Leaf, Self::Children>;
}

/// Owned nesting of arbitrary depth.
///
/// Dropping, cloning and comparing walk the value with a heap work list, so
/// they are safe at any depth. `Debug` and `Serialize` still recurse once per
/// level.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NestedValue<T> {
    Leaf(T),
    Container(Vec<NestedValue<T>>),
}

impl<T> NestedValue<T> {
    pub fn leaf(value: T) -> Self {
        NestedValue::Leaf(value)
    }

    pub fn container(children: impl IntoIterator<Item = NestedValue<T>>) -> Self {
        NestedValue::Container(children.into_iter().collect())
    }

    pub fn empty() -> Self {
        NestedValue::Container(Vec::new())
    }

    /// Wrap `self` in `levels` singleton containers.
    pub fn wrapped(self, levels: usize) -> Self {
        let mut value = self;
        for _ in 0..levels {
            value = NestedValue::Container(vec![value]);
        }
        value
    }

    pub fn is_container(&self) -> bool {
        matches!(self, NestedValue::Container(_))
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];

        while let Some(value) = pending.pop() {
            match value {
                NestedValue::Leaf(_) => count += 1,
                NestedValue::Container(children) => pending.extend(children.iter()),
            }
        }

        count
    }

    /// Number of container levels above the deepest element; a bare leaf has
    /// depth 0 and an empty container depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0usize)];

        while let Some((value, level)) = pending.pop() {
            match value {
                NestedValue::Leaf(_) => deepest = deepest.max(level),
                NestedValue::Container(children) => {
                    deepest = deepest.max(level + 1);
                    pending.extend(children.iter().map(|child| (child, level + 1)));
                }
            }
        }

        deepest
    }
}

impl<T> From<T> for NestedValue<T> {
    fn from(value: T) -> Self {
        NestedValue::Leaf(value)
    }
}

impl<T> Nested for NestedValue<T> {
    type Leaf = T;
    type Children = Vec<NestedValue<T>>;

    fn into_node(self) -> Node<T, Vec<NestedValue<T>>> {
        let mut this = ManuallyDrop::new(self);
        match &mut *this {
            // SAFETY: `this` is never dropped, so the leaf is moved out exactly once.
            NestedValue::Leaf(value) => Node::Leaf(unsafe { ptr::read(value) }),
            // The emptied `Vec` left behind owns no allocation.
            NestedValue::Container(children) => Node::Container(mem::take(children)),
        }
    }
}

impl<T> Drop for NestedValue<T> {
    fn drop(&mut self) {
        let mut pending = match self {
            NestedValue::Leaf(_) => return,
            NestedValue::Container(children) => mem::take(children),
        };

        // Each popped value is emptied before it goes out of scope, so its own
        // drop never descends.
        while let Some(mut value) = pending.pop() {
            if let NestedValue::Container(children) = &mut value {
                pending.append(children);
            }
        }
    }
}

impl<T: Clone> Clone for NestedValue<T> {
    fn clone(&self) -> Self {
        let children = match self {
            NestedValue::Leaf(value) => return NestedValue::Leaf(value.clone()),
            NestedValue::Container(children) => children,
        };

        // One frame per open container: its remaining source children and the
        // copies made so far.
        let mut frames = vec![(children.iter(), Vec::with_capacity(children.len()))];

        while let Some((source, copies)) = frames.last_mut() {
            match source.next() {
                Some(NestedValue::Leaf(value)) => copies.push(NestedValue::Leaf(value.clone())),
                Some(NestedValue::Container(children)) => {
                    frames.push((children.iter(), Vec::with_capacity(children.len())));
                }
                None => {
                    let finished = NestedValue::Container(mem::take(copies));
                    frames.pop();
                    match frames.last_mut() {
                        Some((_, parent)) => parent.push(finished),
                        None => return finished,
                    }
                }
            }
        }

        NestedValue::empty()
    }
}

impl<T: PartialEq> PartialEq for NestedValue<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some(pair) = pending.pop() {
            match pair {
                (NestedValue::Leaf(a), NestedValue::Leaf(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (NestedValue::Container(a), NestedValue::Container(b)) => {
                    if a.len() != b.len() {
                        return false;
                    }
                    pending.extend(a.iter().zip(b.iter()));
                }
                _ => return false,
            }
        }

        true
    }
}

/// JSON arrays are containers; objects, strings, numbers, booleans and null
/// are all leaves.
impl Nested for Value {
    type Leaf = Value;
    type Children = Vec<Value>;

    fn into_node(self) -> Node<Value, Vec<Value>> {
        match self {
            Value::Array(children) => Node::Container(children),
            other => Node::Leaf(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> NestedValue<i32> {
        // [1, [2, 3], 4, [5, [6], 7]]
        NestedValue::container([
            NestedValue::leaf(1),
            NestedValue::container([NestedValue::leaf(2), NestedValue::leaf(3)]),
            NestedValue::leaf(4),
            NestedValue::container([
                NestedValue::leaf(5),
                NestedValue::container([NestedValue::leaf(6)]),
                NestedValue::leaf(7),
            ]),
        ])
    }

    #[test]
    fn test_leaf_count_and_depth() {
        let value = sample();
        assert_eq!(value.leaf_count(), 7);
        assert_eq!(value.depth(), 3);

        assert_eq!(NestedValue::leaf(1).depth(), 0);
        assert_eq!(NestedValue::<i32>::empty().depth(), 1);
        assert_eq!(NestedValue::<i32>::empty().leaf_count(), 0);
    }

    #[test]
    fn test_wrapped_depth() {
        let value = NestedValue::leaf("x").wrapped(50);
        assert_eq!(value.depth(), 50);
        assert_eq!(value.leaf_count(), 1);
    }

    #[test]
    fn test_deep_value_survives_inspection_and_drop() {
        let deep = NestedValue::leaf(1).wrapped(1_000_000);
        assert_eq!(deep.leaf_count(), 1);
        assert_eq!(deep.depth(), 1_000_000);
        drop(deep);
    }

    #[test]
    fn test_deep_value_clone_and_compare() {
        let deep = NestedValue::leaf(1).wrapped(1_000_000);
        let copy = deep.clone();
        assert!(copy == deep);
        assert!(copy != NestedValue::leaf(2).wrapped(1_000_000));
        assert!(copy != NestedValue::leaf(1).wrapped(999_999));
    }

    #[test]
    fn test_clone_keeps_shape() {
        let value = sample();
        let copy = value.clone();
        assert_eq!(copy, value);
        assert_eq!(copy.depth(), 3);
        assert_eq!(NestedValue::<i32>::empty().clone(), NestedValue::empty());
        assert_eq!(NestedValue::leaf(4).clone(), NestedValue::leaf(4));
    }

    #[test]
    fn test_equality_checks_order_and_shape() {
        let a = NestedValue::container([NestedValue::leaf(1), NestedValue::leaf(2)]);
        let b = NestedValue::container([NestedValue::leaf(2), NestedValue::leaf(1)]);
        let c = NestedValue::container([NestedValue::container([NestedValue::leaf(1)]), NestedValue::leaf(2)]);
        assert!(a != b);
        assert!(a != c);
        assert!(NestedValue::leaf(1) != NestedValue::container([NestedValue::leaf(1)]));
    }

    #[test]
    fn test_into_node() {
        assert_eq!(NestedValue::leaf(9).into_node(), Node::Leaf(9));
        assert!(matches!(sample().into_node(), Node::Container(c) if c.len() == 4));
    }

    #[test]
    fn test_json_arrays_are_containers() {
        assert!(matches!(json!([1, 2]).into_node(), Node::Container(c) if c.len() == 2));
        assert_eq!(json!({"a": [1]}).into_node(), Node::Leaf(json!({"a": [1]})));
        assert_eq!(json!(null).into_node(), Node::Leaf(Value::Null));
    }

    #[test]
    fn test_deserialize_untagged() {
        let value: NestedValue<i64> = serde_json::from_str("[1, [2, [3]], []]").unwrap();
        assert_eq!(value.leaf_count(), 3);
        assert_eq!(value.depth(), 3);
    }
}
