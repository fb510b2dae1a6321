//! Fixed-capacity typed key-value table

use crate::{Entry, StoreError};
use vigil_domain::reserved::STORE_MAX_CAPACITY;
use vigil_domain::{ColorRef, StoreType, StoreValue};

/// Fixed-capacity table of typed entries
///
/// Entries keep their insertion order for their whole life: a write to an
/// existing key reuses its slot, a write to a new key appends.
#[derive(Debug)]
pub struct Store {
    entries: Vec<Entry>,
    capacity: usize,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create a store with the maximum capacity
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(STORE_MAX_CAPACITY),
            capacity: STORE_MAX_CAPACITY,
        }
    }

    /// Create a store holding at most `capacity` entries
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCapacity`] when `capacity` is zero or
    /// above [`STORE_MAX_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Result<Self, StoreError> {
        if capacity == 0 || capacity > STORE_MAX_CAPACITY {
            return Err(StoreError::InvalidCapacity {
                requested: capacity,
                max: STORE_MAX_CAPACITY,
            });
        }
        Ok(Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        })
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in table order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Get the entry at `index` in table order
    pub fn entry_at(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Get mutable access to the entry at `index` in table order
    pub fn entry_at_mut(&mut self, index: usize) -> Option<&mut Entry> {
        self.entries.get_mut(index)
    }

    /// Find the entry for `key`
    ///
    /// Absence is not an error; callers decide what it means.
    pub fn find(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.key() == key)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key() == key)
    }

    /// Get the slot for `key`, reusing an existing one or appending a new one
    ///
    /// An existing slot has its value released before it is returned. The
    /// caller must assign a value before giving up its `&mut self` borrow.
    pub(crate) fn allocate(&mut self, key: &str) -> Result<&mut Entry, StoreError> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }

        if let Some(index) = self.position(key) {
            let entry = &mut self.entries[index];
            entry.release();
            return Ok(entry);
        }

        if self.entries.len() >= self.capacity {
            return Err(StoreError::StoreFull {
                capacity: self.capacity,
            });
        }

        self.entries.push(Entry::vacant(key));
        let last = self.entries.len() - 1;
        Ok(&mut self.entries[last])
    }

    /// Look up `key` and check it holds a value of type `expected`
    ///
    /// This is the validation gate behind every typed getter.
    pub fn get_typed(&self, key: &str, expected: StoreType) -> Result<&Entry, StoreError> {
        let entry = self
            .find(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        match entry.kind() {
            Some(actual) if actual == expected => Ok(entry),
            Some(actual) => Err(StoreError::TypeMismatch {
                key: key.to_string(),
                expected,
                actual,
            }),
            None => Err(StoreError::NotFound(key.to_string())),
        }
    }

    /// Insert or replace the value for `key`
    ///
    /// When the store is full the value is dropped, which releases any color
    /// references it holds, and the table is left unchanged.
    pub fn set(&mut self, key: &str, value: StoreValue) -> Result<(), StoreError> {
        let entry = self.allocate(key)?;
        entry.assign(value);
        Ok(())
    }

    /// Get a clone of the value for `key`, whatever its type
    pub fn get(&self, key: &str) -> Result<StoreValue, StoreError> {
        self.find(key)
            .and_then(Entry::value)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    /// Get the integer stored under `key`
    pub fn get_integer(&self, key: &str) -> Result<i32, StoreError> {
        match self.get_typed(key, StoreType::Integer)?.value() {
            Some(StoreValue::Integer(value)) => Ok(*value),
            _ => Err(StoreError::NotFound(key.to_string())),
        }
    }

    /// Store an integer under `key`
    pub fn set_integer(&mut self, key: &str, value: i32) -> Result<(), StoreError> {
        self.set(key, StoreValue::Integer(value))
    }

    /// Get a copy of the string stored under `key`
    pub fn get_string(&self, key: &str) -> Result<String, StoreError> {
        match self.get_typed(key, StoreType::String)?.value() {
            Some(StoreValue::String(value)) => Ok(value.clone()),
            _ => Err(StoreError::NotFound(key.to_string())),
        }
    }

    /// Store a copy of `value` under `key`
    pub fn set_string(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set(key, StoreValue::String(value.to_string()))
    }

    /// Get a new hold on the color stored under `key`
    pub fn get_color(&self, key: &str) -> Result<ColorRef, StoreError> {
        match self.get_typed(key, StoreType::Color)?.value() {
            Some(StoreValue::Color(color)) => Ok(ColorRef::clone(color)),
            _ => Err(StoreError::NotFound(key.to_string())),
        }
    }

    /// Hold `color` under `key`
    pub fn set_color(&mut self, key: &str, color: ColorRef) -> Result<(), StoreError> {
        self.set(key, StoreValue::Color(color))
    }

    /// Get a copy of the integer array stored under `key`
    pub fn get_integer_array(&self, key: &str) -> Result<Vec<i32>, StoreError> {
        match self.get_typed(key, StoreType::IntegerArray)?.value() {
            Some(StoreValue::IntegerArray(values)) => Ok(values.clone()),
            _ => Err(StoreError::NotFound(key.to_string())),
        }
    }

    /// Store an integer array under `key`
    pub fn set_integer_array(&mut self, key: &str, values: Vec<i32>) -> Result<(), StoreError> {
        self.set(key, StoreValue::IntegerArray(values))
    }

    /// Get new holds on every color of the array stored under `key`
    pub fn get_color_array(&self, key: &str) -> Result<Vec<ColorRef>, StoreError> {
        match self.get_typed(key, StoreType::ColorArray)?.value() {
            Some(StoreValue::ColorArray(colors)) => Ok(colors.clone()),
            _ => Err(StoreError::NotFound(key.to_string())),
        }
    }

    /// Hold every color of `colors` under `key`
    pub fn set_color_array(&mut self, key: &str, colors: Vec<ColorRef>) -> Result<(), StoreError> {
        self.set(key, StoreValue::ColorArray(colors))
    }

    /// Release every value and key; the store is empty afterwards
    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            entry.release();
        }
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use vigil_domain::Color;

    fn color(name: &str) -> ColorRef {
        Color::parse(name).unwrap().into_ref()
    }

    #[test]
    fn test_capacity_bounds() {
        assert!(Store::with_capacity(0).is_err());
        assert!(Store::with_capacity(STORE_MAX_CAPACITY + 1).is_err());
        assert_eq!(Store::with_capacity(3).unwrap().capacity(), 3);
        assert_eq!(Store::new().capacity(), STORE_MAX_CAPACITY);
    }

    #[test]
    fn test_allocate_appends_then_reuses() {
        let mut store = Store::new();
        store.allocate("a").unwrap().assign(StoreValue::Integer(1));
        store.allocate("b").unwrap().assign(StoreValue::Integer(2));
        assert_eq!(store.len(), 2);

        let slot = store.allocate("a").unwrap();
        assert_eq!(slot.key(), "a");
        assert!(slot.value().is_none(), "reused slot is released");
        slot.assign(StoreValue::String("one".into()));

        assert_eq!(store.len(), 2);
        assert_eq!(store.entry_at(0).unwrap().kind(), Some(StoreType::String));
    }

    #[test]
    fn test_allocate_rejects_empty_key() {
        let mut store = Store::new();
        assert_eq!(store.set_integer("", 1), Err(StoreError::EmptyKey));
        assert!(store.is_empty());
    }

    #[test]
    fn test_find_is_exact() {
        let mut store = Store::new();
        store.set_integer("key", 1).unwrap();
        assert!(store.find("key").is_some());
        assert!(store.find("Key").is_none());
        assert!(store.find("key ").is_none());
    }

    #[test]
    fn test_get_typed_gate() {
        let mut store = Store::new();
        store.set_string("fruit", "pear").unwrap();

        assert_eq!(
            store.get_typed("missing", StoreType::String).unwrap_err(),
            StoreError::NotFound("missing".into())
        );
        assert_eq!(
            store.get_typed("fruit", StoreType::Color).unwrap_err(),
            StoreError::TypeMismatch {
                key: "fruit".into(),
                expected: StoreType::Color,
                actual: StoreType::String,
            }
        );
        assert_eq!(store.get_typed("fruit", StoreType::String).unwrap().key(), "fruit");
    }

    #[test]
    fn test_overwrite_releases_color_holds() {
        let mut store = Store::new();
        let red = color("red");
        store.set_color("c", red.clone()).unwrap();
        store
            .set_color_array("palette", vec![red.clone(), red.clone()])
            .unwrap();
        assert_eq!(Arc::strong_count(&red), 4);

        store.set_integer("c", 7).unwrap();
        assert_eq!(Arc::strong_count(&red), 3);

        store.set_integer_array("palette", vec![]).unwrap();
        assert_eq!(Arc::strong_count(&red), 1);
    }

    #[test]
    fn test_full_store_drops_value() {
        let mut store = Store::with_capacity(1).unwrap();
        store.set_integer("only", 1).unwrap();

        let blue = color("blue");
        let err = store.set_color("other", blue.clone()).unwrap_err();
        assert_eq!(err, StoreError::StoreFull { capacity: 1 });
        assert_eq!(Arc::strong_count(&blue), 1, "rejected value is released");
        assert_eq!(store.len(), 1);
        assert!(store.find("other").is_none());
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut store = Store::new();
        let green = color("green");
        store.set_color("g", green.clone()).unwrap();
        store.set_string("s", "x").unwrap();

        store.clear();
        assert!(store.is_empty());
        assert_eq!(Arc::strong_count(&green), 1);
        assert!(matches!(store.get_string("s"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_generic_get() {
        let mut store = Store::new();
        store.set_integer_array("arr", vec![4, 5]).unwrap();
        assert_eq!(store.get("arr").unwrap(), StoreValue::IntegerArray(vec![4, 5]));
        assert!(store.get("nope").is_err());
    }

    proptest! {
        #[test]
        fn length_never_exceeds_capacity(
            capacity in 1usize..=STORE_MAX_CAPACITY,
            keys in proptest::collection::vec("[a-e]{1,2}", 0..64),
        ) {
            let mut store = Store::with_capacity(capacity).unwrap();
            let mut distinct: Vec<String> = Vec::new();
            for (i, key) in keys.iter().enumerate() {
                let result = store.set_integer(key, i as i32);
                if distinct.contains(key) {
                    prop_assert!(result.is_ok(), "overwrite never fails");
                } else if distinct.len() < capacity {
                    prop_assert!(result.is_ok());
                    distinct.push(key.clone());
                } else {
                    prop_assert_eq!(result, Err(StoreError::StoreFull { capacity }));
                }
                prop_assert_eq!(store.len(), distinct.len());
                prop_assert!(store.len() <= capacity);
            }
            let order: Vec<&str> = store.iter().map(Entry::key).collect();
            let expected: Vec<&str> = distinct.iter().map(String::as_str).collect();
            prop_assert_eq!(order, expected);
        }
    }
}
