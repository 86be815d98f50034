//! Saved-profile list persisted as a JSON array under one storage key.
//!
//! Every operation degrades instead of failing. Reads skip what they cannot
//! parse: a corrupted value loads as an empty list and a malformed entry is
//! left out. Writes never rewrite a value they could not fully parse, so a
//! save or delete over corrupted data reports `Failed` and leaves it as is.

use super::LocalStorage;
use crate::profile::{CharacterProfile, ProfileKey};
use serde_json::Value;

/// Storage key holding the saved-profile array.
pub const DEFAULT_STORAGE_KEY: &str = "savedCharacters";

/// Result of [`ProfileStore::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No saved profile had this name.
    Inserted,
    /// A saved profile with this name was overwritten.
    Replaced,
    /// The profile has a blank name and was not saved.
    Unnamed,
    /// The storage backend failed or the stored list is corrupted; nothing
    /// was written.
    Failed,
}

impl SaveOutcome {
    #[must_use]
    pub fn is_saved(self) -> bool {
        matches!(self, SaveOutcome::Inserted | SaveOutcome::Replaced)
    }
}

/// Result of [`ProfileStore::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    NotFound,
    Failed,
}

/// The saved-profile list.
#[derive(Debug, Clone)]
pub struct ProfileStore<S> {
    storage: S,
    key: String,
}

impl<S: LocalStorage> ProfileStore<S> {
    /// Store under [`DEFAULT_STORAGE_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Insert `profile`, or replace the saved profile with the same name.
    ///
    /// The whole list is rewritten, so a stored value that does not parse
    /// cleanly is left untouched and the save fails.
    pub fn save(&self, profile: &CharacterProfile) -> SaveOutcome {
        let key = profile.key();
        if key.is_blank() {
            tracing::warn!("refusing to save a profile without a name");
            return SaveOutcome::Unnamed;
        }

        let mut outcome = SaveOutcome::Failed;
        let result = self.storage.update_item(&self.key, &mut |current| {
            let mut profiles = match current.map(parse_strict).transpose() {
                Ok(profiles) => profiles.unwrap_or_default(),
                Err(e) => {
                    tracing::error!(error = %e, "saved profiles are corrupted, not overwriting");
                    outcome = SaveOutcome::Failed;
                    return None;
                }
            };
            outcome = upsert(&mut profiles, profile, &key);
            match serde_json::to_string(&profiles) {
                Ok(json) => Some(json),
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize saved profiles");
                    outcome = SaveOutcome::Failed;
                    None
                }
            }
        });

        match result {
            Ok(()) => {
                tracing::debug!(name = %key, ?outcome, "saved profile");
                outcome
            }
            Err(e) => {
                tracing::error!(name = %key, error = %e, "failed to save profile");
                SaveOutcome::Failed
            }
        }
    }

    /// Every saved profile, in save order.
    pub fn load_all(&self) -> Vec<CharacterProfile> {
        match self.storage.get_item(&self.key) {
            Ok(Some(json)) => parse_lenient(&json),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "failed to read saved profiles");
                Vec::new()
            }
        }
    }

    /// The saved profile named `name` (trimmed, case-sensitive).
    pub fn get(&self, name: &str) -> Option<CharacterProfile> {
        let key = ProfileKey::new(name);
        self.load_all().into_iter().find(|p| p.key() == key)
    }

    /// Remove the saved profile named `name`. Other entries are untouched.
    ///
    /// Like [`save`](Self::save), a corrupted stored value is never rewritten.
    pub fn delete(&self, name: &str) -> DeleteOutcome {
        let key = ProfileKey::new(name);
        let mut outcome = DeleteOutcome::NotFound;
        let result = self.storage.update_item(&self.key, &mut |current| {
            let mut profiles = match parse_strict(current?) {
                Ok(profiles) => profiles,
                Err(e) => {
                    tracing::error!(error = %e, "saved profiles are corrupted, not overwriting");
                    outcome = DeleteOutcome::Failed;
                    return None;
                }
            };
            let before = profiles.len();
            profiles.retain(|p| p.key() != key);
            if profiles.len() == before {
                outcome = DeleteOutcome::NotFound;
                return None;
            }
            match serde_json::to_string(&profiles) {
                Ok(json) => {
                    outcome = DeleteOutcome::Removed;
                    Some(json)
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize saved profiles");
                    outcome = DeleteOutcome::Failed;
                    None
                }
            }
        });

        match result {
            Ok(()) => {
                tracing::debug!(name = %key, ?outcome, "delete profile");
                outcome
            }
            Err(e) => {
                tracing::error!(name = %key, error = %e, "failed to delete profile");
                DeleteOutcome::Failed
            }
        }
    }
}

/// Parse the whole list, failing on the first malformed entry.
fn parse_strict(json: &str) -> Result<Vec<CharacterProfile>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parse what can be parsed: entries that fail are skipped with a warning.
fn parse_lenient(json: &str) -> Vec<CharacterProfile> {
    let entries: Vec<Value> = match serde_json::from_str(json) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "saved profiles are corrupted, treating as empty");
            return Vec::new();
        }
    };
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed saved profile");
                None
            }
        })
        .collect()
}

fn upsert(
    profiles: &mut Vec<CharacterProfile>,
    profile: &CharacterProfile,
    key: &ProfileKey,
) -> SaveOutcome {
    match profiles.iter_mut().find(|p| p.key() == *key) {
        Some(existing) => {
            *existing = profile.clone();
            SaveOutcome::Replaced
        }
        None => {
            profiles.push(profile.clone());
            SaveOutcome::Inserted
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use proptest::prelude::*;

    fn store() -> ProfileStore<MemoryStorage> {
        ProfileStore::new(MemoryStorage::new())
    }

    fn profile(name: &str, age: u32) -> CharacterProfile {
        CharacterProfile {
            age,
            ..CharacterProfile::named(name)
        }
    }

    #[test]
    fn empty_storage_loads_empty() {
        assert!(store().load_all().is_empty());
    }

    #[test]
    fn save_twice_keeps_one_entry_with_latest_values() {
        let store = store();
        assert_eq!(store.save(&profile("Aria", 20)), SaveOutcome::Inserted);
        assert_eq!(store.save(&profile("Aria", 21)), SaveOutcome::Replaced);

        let saved = store.load_all();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].age, 21);
    }

    #[test]
    fn names_match_after_trimming_but_case_sensitively() {
        let store = store();
        assert_eq!(store.save(&profile("Aria", 20)), SaveOutcome::Inserted);
        assert_eq!(store.save(&profile("  Aria ", 22)), SaveOutcome::Replaced);
        assert_eq!(store.save(&profile("aria", 23)), SaveOutcome::Inserted);
        assert_eq!(store.load_all().len(), 2);
        assert_eq!(store.get("Aria").map(|p| p.age), Some(22));
    }

    #[test]
    fn unnamed_profiles_are_not_saved() {
        let store = store();
        assert_eq!(store.save(&profile("   ", 20)), SaveOutcome::Unnamed);
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn delete_leaves_others_untouched() {
        let store = store();
        store.save(&profile("Aria", 20));
        store.save(&profile("Brom", 40));
        store.save(&profile("Cyra", 60));

        assert_eq!(store.delete("Brom"), DeleteOutcome::Removed);
        assert_eq!(store.delete("Brom"), DeleteOutcome::NotFound);

        let names: Vec<String> = store.load_all().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Aria".to_string(), "Cyra".to_string()]);
    }

    fn stored(store: &ProfileStore<MemoryStorage>) -> Option<String> {
        store.storage().get_item(DEFAULT_STORAGE_KEY).ok().flatten()
    }

    #[test]
    fn corrupted_value_loads_empty_and_is_never_overwritten() {
        let store = store();
        assert!(store.storage().set_item(DEFAULT_STORAGE_KEY, "{oops").is_ok());

        assert!(store.load_all().is_empty());
        assert!(store.get("Aria").is_none());
        assert_eq!(store.delete("Aria"), DeleteOutcome::Failed);
        assert_eq!(store.save(&profile("Aria", 20)), SaveOutcome::Failed);
        assert_eq!(stored(&store).as_deref(), Some("{oops"));

        let truncated = r#"[{"name":"Aria","age":30},"#;
        assert!(store.storage().set_item(DEFAULT_STORAGE_KEY, truncated).is_ok());
        assert_eq!(store.save(&profile("Cyra", 20)), SaveOutcome::Failed);
        assert_eq!(stored(&store).as_deref(), Some(truncated));
    }

    #[test]
    fn malformed_entries_are_skipped_on_load_and_kept_on_save() {
        let store = store();
        let mixed = r#"[{"name":"Aria","age":30},{"name":"Brom","age":40,"race":"Dragon"},{"name":"Cyra","age":2.5}]"#;
        assert!(store.storage().set_item(DEFAULT_STORAGE_KEY, mixed).is_ok());

        let names: Vec<String> = store.load_all().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Aria".to_string()]);
        assert_eq!(store.get("Aria").map(|p| p.age), Some(30));

        assert_eq!(store.save(&profile("Dara", 20)), SaveOutcome::Failed);
        assert_eq!(store.delete("Aria"), DeleteOutcome::Failed);
        assert_eq!(stored(&store).as_deref(), Some(mixed));
    }

    #[test]
    fn removing_the_value_recovers_saving() {
        let store = store();
        assert!(store.storage().set_item(DEFAULT_STORAGE_KEY, "{oops").is_ok());
        assert!(store.storage().remove_item(DEFAULT_STORAGE_KEY).is_ok());
        assert_eq!(store.save(&profile("Aria", 20)), SaveOutcome::Inserted);
        assert_eq!(store.load_all(), vec![profile("Aria", 20)]);
    }

    #[test]
    fn custom_key_is_isolated() {
        let storage = MemoryStorage::new();
        let store = ProfileStore::with_key(&storage, "otherKey");
        store.save(&profile("Aria", 20));
        assert_eq!(store.key(), "otherKey");

        let default_store = ProfileStore::new(&storage);
        assert!(default_store.load_all().is_empty());
    }

    proptest! {
        #[test]
        fn upsert_is_idempotent(name in "[A-Za-z]{1,12}", ages in prop::collection::vec(0u32..500, 1..6)) {
            let store = store();
            for age in &ages {
                store.save(&profile(&name, *age));
            }
            let saved = store.load_all();
            prop_assert_eq!(saved.len(), 1);
            prop_assert_eq!(Some(saved[0].age), ages.last().copied());
        }
    }
}
