//! A single key/typed-value slot

use vigil_domain::{StoreType, StoreValue};

/// One slot of the store
///
/// The key is owned by the store. The value is `None` only between
/// [`Store::allocate`](crate::Store) releasing the previous value and the
/// caller assigning the new one, which happens inside a single `&mut` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    key: String,
    value: Option<StoreValue>,
}

impl Entry {
    pub(crate) fn vacant(key: &str) -> Self {
        Self {
            key: key.to_string(),
            value: None,
        }
    }

    /// Get the entry's key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the entry's value
    pub fn value(&self) -> Option<&StoreValue> {
        self.value.as_ref()
    }

    /// Get mutable access to the entry's value
    ///
    /// Replacing the value with another variant changes the entry's type.
    pub fn value_mut(&mut self) -> Option<&mut StoreValue> {
        self.value.as_mut()
    }

    /// Get the entry's type
    pub fn kind(&self) -> Option<StoreType> {
        self.value.as_ref().map(StoreValue::kind)
    }

    /// Element count for array entries
    pub fn array_len(&self) -> Option<usize> {
        self.value.as_ref().and_then(StoreValue::array_len)
    }

    pub(crate) fn assign(&mut self, value: StoreValue) {
        self.value = Some(value);
    }

    /// Drop the value payload: owned buffers are freed and held color
    /// references released. The key is kept.
    pub(crate) fn release(&mut self) {
        self.value = None;
    }
}
