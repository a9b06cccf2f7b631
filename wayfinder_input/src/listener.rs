// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-widget routed action listeners.
//!
//! A widget declares which named actions it listens for and on which edge (key down,
//! key up or both). When a chord reaches the widget, [`ActionListeners::handle`] looks
//! it up in the binding configuration and reports every listened action it triggers.
//!
//! Chords that trigger none of the listened actions fall through to the
//! additional-reply policy, which lets a widget swallow (or explicitly let through)
//! actions it does not act on itself.
//!
//! ```
//! use wayfinder_input::binding::BindingStore;
//! use wayfinder_input::key::{Key, KeyChord};
//! use wayfinder_input::listener::ActionListeners;
//!
//! let store = BindingStore::with_defaults();
//! let mut listeners = ActionListeners::new();
//! listeners.listen("NavBack", true, false);
//!
//! let reply = listeners.handle(KeyChord::new(Key::Escape), true, &store);
//! assert!(reply.handled);
//! assert_eq!(reply.fired, vec!["NavBack"]);
//!
//! // Key up is not listened for.
//! assert!(!listeners.handle(KeyChord::new(Key::Escape), false, &store).handled);
//! ```

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::binding::BindingSource;
use crate::key::KeyChord;

/// Which edges a listener reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Edges {
    down: bool,
    up: bool,
}

/// Policy for chords that trigger none of the listened actions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AdditionalReplyMode {
    /// Handle only chords bound to one of the listed actions.
    #[default]
    HandleSpecified,
    /// Handle every chord except those bound to one of the listed actions.
    HandleAllExceptSpecified,
}

/// Result of [`ActionListeners::handle`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionReply<'a> {
    /// Listened actions triggered by the chord, in name order.
    pub fired: Vec<&'a str>,
    /// Whether the chord should be considered consumed.
    pub handled: bool,
}

/// The set of actions a widget listens for, plus its additional-reply policy.
#[derive(Clone, Debug, Default)]
pub struct ActionListeners {
    listeners: BTreeMap<String, Edges>,
    additional_mode: AdditionalReplyMode,
    additional: Vec<String>,
}

impl ActionListeners {
    /// No listeners, handling nothing additional.
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for `action` on key down and/or key up. Replaces an existing listener.
    pub fn listen(&mut self, action: impl Into<String>, on_key_down: bool, on_key_up: bool) {
        self.listeners.insert(
            action.into(),
            Edges {
                down: on_key_down,
                up: on_key_up,
            },
        );
    }

    /// Stop listening for `action`. Returns false if it was not listened for.
    pub fn stop_listening(&mut self, action: &str) -> bool {
        self.listeners.remove(action).is_some()
    }

    /// Whether `action` is listened for.
    pub fn is_listening(&self, action: &str) -> bool {
        self.listeners.contains_key(action)
    }

    /// Configure the additional-reply policy.
    pub fn set_additional_replies(
        &mut self,
        mode: AdditionalReplyMode,
        actions: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.additional_mode = mode;
        self.additional = actions.into_iter().map(Into::into).collect();
    }

    /// Resolve `chord` against `source` and report the listened actions it fires.
    ///
    /// `is_down` selects the edge. Each listened action fires at most once.
    pub fn handle<'a>(
        &'a self,
        chord: KeyChord,
        is_down: bool,
        source: &impl BindingSource,
    ) -> ActionReply<'a> {
        let mut reply = ActionReply::default();
        for (action, edges) in &self.listeners {
            if !source.bindings_for(action).contains(&chord) {
                continue;
            }
            let wanted = if is_down { edges.down } else { edges.up };
            if wanted {
                reply.fired.push(action.as_str());
                reply.handled = true;
            }
        }
        if reply.handled {
            return reply;
        }

        let mut desires = self.additional_mode == AdditionalReplyMode::HandleAllExceptSpecified;
        for action in &self.additional {
            if source.bindings_for(action).contains(&chord) {
                desires = self.additional_mode == AdditionalReplyMode::HandleSpecified;
                log::trace!("additional reply policy matched {action}: handled = {desires}");
                break;
            }
        }
        reply.handled = desires;
        reply
    }
}
