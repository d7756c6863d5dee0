use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// A person a face can be bound to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// In-session snapshot of the external contact directory.
///
/// Ad hoc contacts created from free text during tagging join the
/// snapshot, so one name binds one contact for the whole session.
#[derive(Debug, Clone, Default)]
pub struct ContactDirectory {
    contacts: Vec<Contact>,
}

impl ContactDirectory {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Contact::new).collect())
    }

    /// Demo directory used when no contacts file is supplied.
    pub fn sample() -> Self {
        Self::from_names(["Ricardo", "Daniel", "Juan"])
    }

    /// Load a directory from a JSON array of `{"name": ...}` entries.
    pub fn load(path: &Path) -> Result<Self> {
        #[derive(Deserialize)]
        struct Entry {
            name: String,
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading contacts at {}", path.display()))?;
        let entries: Vec<Entry> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing contacts {}", path.display()))?;
        Ok(Self::from_names(entries.into_iter().map(|e| e.name)))
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Case-insensitive substring search over contact names. An empty
    /// query matches the whole snapshot. Read-only.
    pub fn search(&self, query: &str) -> Vec<Contact> {
        let needle = query.to_lowercase();
        self.contacts
            .iter()
            .filter(|contact| contact.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Case-insensitive exact match against the snapshot, or a fresh ad
    /// hoc contact that joins it.
    pub fn resolve_or_create(&mut self, name: &str) -> Contact {
        let lowered = name.to_lowercase();
        if let Some(existing) = self
            .contacts
            .iter()
            .find(|contact| contact.name.to_lowercase() == lowered)
        {
            return existing.clone();
        }
        let contact = Contact::new(name);
        self.contacts.push(contact.clone());
        contact
    }
}
