use std::collections::HashMap;

use crate::models::{ContactProfile, ParsedMessage};

/// Folds authored messages into per-contact profiles during the parse pass
///
/// Profiles keep first-appearance order; two raw names with the same
/// normalized key share one profile.
#[derive(Debug, Default)]
pub struct ContactAggregator {
    profiles: Vec<ContactProfile>,
    index: HashMap<String, usize>,
}

impl ContactAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update or create the profile for this message's sender. System messages are ignored
    pub fn record(&mut self, message: &ParsedMessage) {
        if message.is_system_message {
            return;
        }

        match self.index.get(&message.sender_key) {
            Some(&i) => self.profiles[i].record(message),
            None => {
                self.index
                    .insert(message.sender_key.clone(), self.profiles.len());
                self.profiles.push(ContactProfile::from_message(message));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn into_profiles(self) -> Vec<ContactProfile> {
        self.profiles
    }
}
