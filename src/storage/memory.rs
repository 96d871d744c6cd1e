use std::collections::HashMap;

use crate::Error;

use super::KeyValueStore;

/// A [KeyValueStore] that keeps values in memory.
///
/// An optional quota limits the total number of bytes across all stored
/// values, which makes it possible to exercise failed writes.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKeyValueStore {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl InMemoryKeyValueStore {
    /// Create an empty store without a quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total size of the stored values to `quota` bytes.
    pub fn with_quota(self, quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..self
        }
    }

    fn size_without(&self, key: &str) -> usize {
        self.values
            .iter()
            .filter(|(stored_key, _)| stored_key.as_str() != key)
            .map(|(_, value)| value.len())
            .sum()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        if let Some(quota) = self.quota {
            let size = self.size_without(key) + value.len();

            if size > quota {
                return Err(Error::StorageQuotaExceeded {
                    key: key.to_owned(),
                    size: value.len(),
                    quota,
                });
            }
        }

        self.values.insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, storage::KeyValueStore};

    use super::InMemoryKeyValueStore;

    #[test]
    fn set_replaces_value() {
        let mut store = InMemoryKeyValueStore::new();

        store.set("user-theme", "blue-theme").unwrap();
        store.set("user-theme", "brown-theme").unwrap();

        assert_eq!(
            store.get("user-theme"),
            Ok(Some("brown-theme".to_owned()))
        );
    }

    #[test]
    fn set_over_quota_fails_and_keeps_value() {
        let mut store = InMemoryKeyValueStore::new().with_quota(10);
        store.set("user-theme", "blue-theme").unwrap();

        let result = store.set("user-theme", "dark-blue-theme");

        assert_eq!(
            result,
            Err(Error::StorageQuotaExceeded {
                key: "user-theme".to_owned(),
                size: 15,
                quota: 10
            })
        );
        assert_eq!(store.get("user-theme"), Ok(Some("blue-theme".to_owned())));
    }
}
