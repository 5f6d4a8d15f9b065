use contracts::shared::metrics::MetricKind;
use std::collections::HashMap;

/// Key-value capability for free-text insight notes attached to tables.
///
/// Injected by the host; the engine never reaches for global storage.
pub trait NotesStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Session-scoped store, dropped with the session
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotesStore {
    entries: HashMap<String, String>,
}

impl InMemoryNotesStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotesStore for InMemoryNotesStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        if value.trim().is_empty() {
            self.entries.remove(key);
        } else {
            self.entries.insert(key.to_string(), value.to_string());
        }
    }
}

/// Storage key for the notes of one table/metric tab, e.g.
/// `insights:d400_month_on_month:revenue`
pub fn notes_key(table_id: &str, metric: MetricKind) -> String {
    format!("insights:{}:{}", table_id, metric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_and_clear() {
        let mut store = InMemoryNotesStore::new();
        let key = notes_key("d400_month_on_month", MetricKind::Atv);
        assert_eq!(key, "insights:d400_month_on_month:atv");
        assert_eq!(store.get(&key), None);

        store.set(&key, "ATV dipped after the March promo");
        assert_eq!(store.get(&key).as_deref(), Some("ATV dipped after the March promo"));

        store.set(&key, "  ");
        assert_eq!(store.get(&key), None);
    }

    #[test]
    fn test_store_behind_trait_object() {
        let mut store: Box<dyn NotesStore> = Box::new(InMemoryNotesStore::new());
        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }
}
