//! Keyed storage for the composite headers.
//!
//! Permissions-Policy and Content-Security-Policy both carry a fixed set of
//! named sub-policies. Instead of one field per name, each set is a [`Slot`]
//! enum with an explicit canonical order, stored in a [`SlotMap`].
//!
//! # Design Decisions
//! - Iteration always follows `Slot::ORDER`, never map or declaration order
//! - Every slot is present from construction; `get_mut` re-inserts the
//!   slot default if a caller ever built a sparse map
//! - Deserialization applies each listed slot as a patch over that slot's
//!   own default, so per-slot defaults survive partial config files

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A named sub-policy within a composite header.
pub trait Slot: Copy + Ord + fmt::Debug + 'static {
    /// Per-slot configuration.
    type Entry: Clone + fmt::Debug + PartialEq + Serialize;

    /// Partial entry read from configuration files.
    type Patch: DeserializeOwned;

    /// Canonical emission order.
    const ORDER: &'static [Self];

    /// Wire token of the slot (e.g. `camera`, `script-src`).
    fn token(self) -> &'static str;

    fn default_entry(self) -> Self::Entry;

    fn apply(entry: &mut Self::Entry, patch: Self::Patch);

    fn from_token(token: &str) -> Option<Self> {
        Self::ORDER.iter().copied().find(|slot| slot.token() == token)
    }
}

/// All slots of one composite header, each with its entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotMap<K: Slot> {
    entries: BTreeMap<K, K::Entry>,
}

impl<K: Slot> SlotMap<K> {
    pub fn get(&self, slot: K) -> Option<&K::Entry> {
        self.entries.get(&slot)
    }

    pub fn get_mut(&mut self, slot: K) -> &mut K::Entry {
        self.entries
            .entry(slot)
            .or_insert_with(|| slot.default_entry())
    }

    /// Replace the entry of `slot`.
    pub fn set(&mut self, slot: K, entry: K::Entry) {
        self.entries.insert(slot, entry);
    }

    /// Entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &K::Entry)> + '_ {
        K::ORDER
            .iter()
            .filter_map(move |slot| self.entries.get(slot).map(|entry| (*slot, entry)))
    }
}

impl<K: Slot> Default for SlotMap<K> {
    fn default() -> Self {
        Self {
            entries: K::ORDER
                .iter()
                .map(|slot| (*slot, slot.default_entry()))
                .collect(),
        }
    }
}

impl<K: Slot> Serialize for SlotMap<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (slot, entry) in self.iter() {
            map.serialize_entry(slot.token(), entry)?;
        }
        map.end()
    }
}

impl<'de, K: Slot> Deserialize<'de> for SlotMap<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SlotMapVisitor(PhantomData))
    }
}

struct SlotMapVisitor<K>(PhantomData<K>);

impl<'de, K: Slot> Visitor<'de> for SlotMapVisitor<K> {
    type Value = SlotMap<K>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table keyed by directive or feature name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = SlotMap::<K>::default();
        while let Some(token) = access.next_key::<String>()? {
            let slot = K::from_token(&token)
                .ok_or_else(|| de::Error::custom(format!("unknown name `{}`", token)))?;
            let patch = access.next_value::<K::Patch>()?;
            K::apply(map.get_mut(slot), patch);
        }
        Ok(map)
    }
}
