//! Object Module - Object model for the managed heap
//!
//! Two shapes share one identity and one enumeration slot:
//! - `Scalar` - integer leaf, no outgoing references
//! - `Pair` - two references (`head`, `tail`) to other objects
//!
//! Every object carries a transient mark bit and the intrusive link that
//! threads it into the heap-wide enumeration.

pub mod handle;

pub use handle::ObjectId;

/// Variant tag of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Integer leaf
    Scalar,
    /// Head/tail reference pair
    Pair,
}

/// Payload of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectValue {
    Scalar(i32),
    Pair { head: ObjectId, tail: ObjectId },
}

impl ObjectValue {
    /// Variant tag
    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectValue::Scalar(_) => ObjectKind::Scalar,
            ObjectValue::Pair { .. } => ObjectKind::Pair,
        }
    }
}

/// Heap object record
#[derive(Debug, Clone)]
pub struct Object {
    /// Variant payload
    pub(crate) value: ObjectValue,
    /// Set during marking, cleared by sweep
    pub(crate) marked: bool,
    /// Next object in the heap enumeration
    pub(crate) next: Option<ObjectId>,
}

impl Object {
    pub(crate) fn new(value: ObjectValue, next: Option<ObjectId>) -> Self {
        Self {
            value,
            marked: false,
            next,
        }
    }

    /// Variant tag
    #[inline]
    pub fn kind(&self) -> ObjectKind {
        self.value.kind()
    }

    /// Payload
    #[inline]
    pub fn value(&self) -> &ObjectValue {
        &self.value
    }

    /// Mark bit; false outside a collection
    #[inline]
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// Enumeration link
    #[inline]
    pub fn next(&self) -> Option<ObjectId> {
        self.next
    }

    /// Outgoing references, head before tail
    pub fn references(&self) -> impl Iterator<Item = ObjectId> {
        let refs = match self.value {
            ObjectValue::Scalar(_) => [None, None],
            ObjectValue::Pair { head, tail } => [Some(head), Some(tail)],
        };
        refs.into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_has_no_references() {
        let obj = Object::new(ObjectValue::Scalar(42), None);
        assert_eq!(obj.kind(), ObjectKind::Scalar);
        assert!(!obj.is_marked());
        assert_eq!(obj.references().count(), 0);
    }

    #[test]
    fn test_pair_references_head_then_tail() {
        let head = ObjectId::new(0, 0);
        let tail = ObjectId::new(1, 0);
        let obj = Object::new(ObjectValue::Pair { head, tail }, Some(tail));
        assert_eq!(obj.kind(), ObjectKind::Pair);
        assert_eq!(obj.references().collect::<Vec<_>>(), vec![head, tail]);
        assert_eq!(obj.next(), Some(tail));
    }
}
