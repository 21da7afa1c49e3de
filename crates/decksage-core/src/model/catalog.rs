use crate::model::card::{CardRecord, Role, Tag};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

const BUILTIN_CARDS_JSON: &str = include_str!("../../assets/cards.json");

/// Read-only card database keyed by card name.
///
/// The built-in catalog is embedded in the binary and parsed once; callers
/// may also supply their own JSON with the same shape.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: BTreeMap<String, CardRecord>,
}

#[derive(Deserialize)]
struct CatalogEntry {
    elixir: f32,
    #[serde(default)]
    roles: BTreeSet<Role>,
    #[serde(default)]
    tags: BTreeSet<Tag>,
}

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// The embedded card database. Parsed lazily on first access.
    pub fn builtin() -> &'static Catalog {
        BUILTIN.get_or_init(|| {
            Catalog::from_json_str(BUILTIN_CARDS_JSON).expect("built-in card catalog parses")
        })
    }

    /// Parse a catalog from a JSON object mapping card name to attributes.
    pub fn from_json_str(raw: &str) -> serde_json::Result<Self> {
        let entries: BTreeMap<String, CatalogEntry> = serde_json::from_str(raw)?;
        let cards = entries
            .into_iter()
            .map(|(name, entry)| {
                let record = CardRecord {
                    name: name.clone(),
                    elixir: entry.elixir,
                    roles: entry.roles,
                    tags: entry.tags,
                };
                (name, record)
            })
            .collect();
        Ok(Self { cards })
    }

    pub fn get(&self, name: &str) -> Option<&CardRecord> {
        self.cards.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    /// Card names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cards.keys().map(String::as_str)
    }

    pub fn cards(&self) -> impl Iterator<Item = &CardRecord> {
        self.cards.values()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
