//! Relics awarded for clearing floors.
//!
//! Relics are run-level trophies. Combat never reads them; the runtime draws
//! one from the table when a reward floor is cleared and keeps it on the run.

/// Stable relic identifier such as `ember_charm`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RelicId(pub String);

impl RelicId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RelicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelicDefinition {
    pub id: RelicId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

/// Ordered relic table. Order matters: reward draws index into it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelicTable {
    relics: Vec<RelicDefinition>,
}

impl RelicTable {
    pub fn new(relics: Vec<RelicDefinition>) -> Self {
        Self { relics }
    }

    pub fn canonical() -> Self {
        Self::new(canonical_relics())
    }

    pub fn get(&self, index: usize) -> Option<&RelicDefinition> {
        self.relics.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&RelicDefinition> {
        self.relics.iter().find(|relic| relic.id.as_str() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RelicDefinition> {
        self.relics.iter()
    }

    pub fn len(&self) -> usize {
        self.relics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relics.is_empty()
    }
}

/// The relics that ship with the game.
pub fn canonical_relics() -> Vec<RelicDefinition> {
    [
        ("ember_charm", "Ember Charm", "A coal that never cools."),
        ("iron_bangle", "Iron Bangle", "Dented by a hundred parries."),
        ("tower_key", "Tower Key", "Opens a door nobody has found."),
        ("raven_quill", "Raven Quill", "Writes the names of the fallen."),
        ("moon_flask", "Moon Flask", "Always half full."),
    ]
    .into_iter()
    .map(|(id, name, description)| RelicDefinition {
        id: RelicId::new(id),
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}
