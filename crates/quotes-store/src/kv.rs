use std::collections::HashMap;

use crate::error::Result;

/// String-keyed storage surface.
///
/// [`crate::Store`] is the durable implementation; [`SessionStorage`] lives
/// only as long as the process.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Process-lifetime key-value map. Nothing written here outlives the session.
#[derive(Debug, Default)]
pub struct SessionStorage {
    values: HashMap<String, String>,
}

impl SessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_storage_roundtrip() {
        let mut session = SessionStorage::new();
        assert!(session.get("lastViewedQuote").unwrap().is_none());

        session.set("lastViewedQuote", "A").unwrap();
        assert_eq!(session.get("lastViewedQuote").unwrap().as_deref(), Some("A"));

        session.set("lastViewedQuote", "B").unwrap();
        assert_eq!(session.get("lastViewedQuote").unwrap().as_deref(), Some("B"));
    }

    #[test]
    fn test_session_storage_fresh_per_instance() {
        let mut first = SessionStorage::new();
        first.set("k", "v").unwrap();

        let second = SessionStorage::new();
        assert!(second.get("k").unwrap().is_none());
    }
}
