//! Append-only combat log.

/// Who an entry is attributed to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogSource {
    /// Something the player did.
    Player,
    /// Enemy actions, status ticks and outcomes.
    System,
    /// Turn boundary marker.
    Separator,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLogEntry {
    pub source: LogSource,
    /// Turn the entry was written on.
    pub turn: u32,
    pub message: String,
}

/// Ordered log of an encounter. Entries are only ever appended.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLog {
    entries: Vec<CombatLogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: LogSource, turn: u32, message: impl Into<String>) {
        self.entries.push(CombatLogEntry {
            source,
            turn,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[CombatLogEntry] {
        &self.entries
    }

    /// Entries appended at or after `index`.
    pub fn since(&self, index: usize) -> &[CombatLogEntry] {
        self.entries.get(index..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&CombatLogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatLogEntry> {
        self.entries.iter()
    }

    /// Entries written by one source.
    pub fn by_source(&self, source: LogSource) -> impl Iterator<Item = &CombatLogEntry> {
        self.entries.iter().filter(move |entry| entry.source == source)
    }
}
