//! Type-erased response entities.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A response body object, shared between clones of a response.
#[derive(Clone)]
pub struct Entity {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Entity {
    #[must_use]
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Entity {
            value: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Name of the concrete type, for diagnostics.
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    #[inline]
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Whether both handles point at the same object.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Entity) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
