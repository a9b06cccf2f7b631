// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key-binding configuration store.
//!
//! A [`BindingStore`] maps action names to the chords that trigger them. It is the
//! host's own configuration: this crate reads it and, on first run, seeds missing
//! navigation actions with defaults. Nothing else is persisted.
//!
//! With the `std` feature the store round-trips through a RON file:
//!
//! ```no_run
//! # #[cfg(feature = "std")]
//! # fn main() -> Result<(), wayfinder_input::binding::StoreError> {
//! use wayfinder_input::binding::BindingStore;
//! let store = BindingStore::load_or_seed("config/input.ron")?;
//! assert!(!store.bindings("NavSelect").is_empty());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "std"))]
//! # fn main() {}
//! ```

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::action::NavAction;
use crate::key::KeyChord;

/// Anything that can enumerate the chords bound to a named action.
pub trait BindingSource {
    /// Chords bound to `action`, in configuration order. Unknown actions yield an empty list.
    fn bindings_for(&self, action: &str) -> Vec<KeyChord>;
}

/// Action name → chords, as stored by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingStore {
    actions: BTreeMap<String, Vec<KeyChord>>,
}

impl BindingStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding exactly the default navigation bindings.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.seed_defaults();
        store
    }

    /// Add defaults for every standard and extended navigation action that has no entry.
    ///
    /// Actions already present (even with an empty list) are left untouched.
    /// Returns whether anything was added.
    pub fn seed_defaults(&mut self) -> bool {
        let mut added = false;
        for action in NavAction::STANDARD.into_iter().chain(NavAction::EXTENDED) {
            if self.actions.contains_key(action.name()) {
                continue;
            }
            let chords = action.default_keys().iter().copied().map(KeyChord::new).collect();
            self.actions.insert(action.name().to_string(), chords);
            log::debug!("seeded default bindings for {}", action.name());
            added = true;
        }
        added
    }

    /// Whether `action` has an entry (possibly empty).
    pub fn contains(&self, action: &str) -> bool {
        self.actions.contains_key(action)
    }

    /// Chords bound to `action`.
    pub fn bindings(&self, action: &str) -> &[KeyChord] {
        self.actions.get(action).map(Vec::as_slice).unwrap_or_default()
    }

    /// Replace the chords bound to `action`.
    pub fn set(&mut self, action: impl Into<String>, chords: Vec<KeyChord>) {
        self.actions.insert(action.into(), chords);
    }

    /// Append a chord to `action`, creating the entry if needed. Duplicates are ignored.
    pub fn add(&mut self, action: impl Into<String>, chord: KeyChord) {
        let chords = self.actions.entry(action.into()).or_default();
        if !chords.contains(&chord) {
            chords.push(chord);
        }
    }

    /// Remove `action` entirely, returning its chords.
    pub fn remove(&mut self, action: &str) -> Option<Vec<KeyChord>> {
        self.actions.remove(action)
    }

    /// Names of actions triggered by exactly `chord`.
    pub fn actions_for_chord(&self, chord: KeyChord) -> impl Iterator<Item = &str> + '_ {
        self.actions
            .iter()
            .filter(move |(_, chords)| chords.contains(&chord))
            .map(|(name, _)| name.as_str())
    }

    /// Iterate over all `(action, chords)` entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[KeyChord])> + '_ {
        self.actions.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl BindingSource for BindingStore {
    fn bindings_for(&self, action: &str) -> Vec<KeyChord> {
        self.bindings(action).to_vec()
    }
}

#[cfg(feature = "std")]
pub use persist::StoreError;

#[cfg(feature = "std")]
mod persist {
    use super::BindingStore;
    use alloc::string::String;
    use serde::{Deserialize, Serialize};
    use std::fs;
    use std::path::Path;

    const SCHEMA_VERSION: &str = "1";

    /// Errors loading or saving a [`BindingStore`].
    #[derive(Debug, thiserror::Error)]
    pub enum StoreError {
        /// Reading or writing the file failed.
        #[error("binding file i/o failed")]
        Io(#[from] std::io::Error),
        /// The file is not valid RON for a binding store.
        #[error("binding file is malformed")]
        Parse(#[from] ron::error::SpannedError),
        /// The store could not be encoded.
        #[error("binding store could not be serialized")]
        Serialize(#[from] ron::Error),
    }

    /// On-disk layout.
    #[derive(Debug, Serialize, Deserialize)]
    struct BindingFile {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema_version: Option<String>,
        #[serde(default)]
        bindings: BindingStore,
    }

    impl BindingStore {
        /// Parse a store from RON text.
        pub fn from_ron_str(text: &str) -> Result<Self, StoreError> {
            let file: BindingFile = ron::from_str(text)?;
            Ok(file.bindings)
        }

        /// Encode the store as pretty RON text.
        pub fn to_ron_string(&self) -> Result<String, StoreError> {
            let file = BindingFile {
                schema_version: Some(SCHEMA_VERSION.into()),
                bindings: self.clone(),
            };
            Ok(ron::ser::to_string_pretty(
                &file,
                ron::ser::PrettyConfig::default(),
            )?)
        }

        /// Load a store from `path`.
        pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
            let text = fs::read_to_string(path)?;
            Self::from_ron_str(&text)
        }

        /// Write the store to `path`, creating parent directories as needed.
        pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
            let path = path.as_ref();
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, self.to_ron_string()?)?;
            Ok(())
        }

        /// Load the store at `path`, seed any missing navigation actions and save it
        /// back when seeding changed something (including when the file did not exist).
        pub fn load_or_seed(path: impl AsRef<Path>) -> Result<Self, StoreError> {
            let path = path.as_ref();
            let mut store = if path.exists() {
                Self::load(path)?
            } else {
                log::debug!("no binding file at {}, seeding defaults", path.display());
                Self::new()
            };
            if store.seed_defaults() {
                store.save(path)?;
            }
            Ok(store)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{Key, Modifiers};
    use alloc::vec;

    #[test]
    fn seeding_keeps_existing_entries() {
        let mut store = BindingStore::new();
        store.set("NavSelect", vec![KeyChord::new(Key::Char('E'))]);
        store.set("NavPrevious", vec![]);
        assert!(store.seed_defaults(), "other actions were missing");
        assert_eq!(store.bindings("NavSelect"), &[KeyChord::new(Key::Char('E'))]);
        assert!(store.bindings("NavPrevious").is_empty(), "explicit empty entry stays empty");
        assert_eq!(store.bindings("NavBack").len(), 2);
        assert!(!store.seed_defaults(), "second seeding is a no-op");
    }

    #[test]
    fn chord_lookup_is_exact() {
        let mut store = BindingStore::with_defaults();
        store.add("Sprint", KeyChord::new(Key::Tab).with(Modifiers::SHIFT));
        let plain: Vec<_> = store.actions_for_chord(KeyChord::new(Key::Tab)).collect();
        assert_eq!(plain, vec!["NavNext"]);
        let shifted: Vec<_> = store
            .actions_for_chord(KeyChord::new(Key::Tab).with(Modifiers::SHIFT))
            .collect();
        assert_eq!(shifted, vec!["Sprint"]);
        // Escape is shared by Back and MainMenu.
        let esc: Vec<_> = store.actions_for_chord(KeyChord::new(Key::Escape)).collect();
        assert_eq!(esc, vec!["NavBack", "NavMainMenu"]);
    }

    #[test]
    fn add_ignores_duplicates() {
        let mut store = BindingStore::new();
        store.add("Jump", KeyChord::new(Key::SpaceBar));
        store.add("Jump", KeyChord::new(Key::SpaceBar));
        assert_eq!(store.bindings_for("Jump").len(), 1);
        assert!(store.bindings_for("Missing").is_empty(), "unknown action");
    }

    #[cfg(feature = "std")]
    #[test]
    fn load_or_seed_creates_then_preserves_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("input.ron");
        let first = BindingStore::load_or_seed(&path).unwrap();
        assert!(path.exists(), "seeding writes the file");
        assert_eq!(first, BindingStore::with_defaults());

        // A user rebind survives the next startup.
        let mut edited = first.clone();
        edited.set("NavNext", vec![KeyChord::new(Key::Char('N'))]);
        edited.save(&path).unwrap();
        let second = BindingStore::load_or_seed(&path).unwrap();
        assert_eq!(second.bindings("NavNext"), &[KeyChord::new(Key::Char('N'))]);
    }

    #[cfg(feature = "std")]
    #[test]
    fn malformed_file_is_an_error() {
        let err = BindingStore::from_ron_str("(bindings: 42)").unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)), "got {err:?}");
    }
}
