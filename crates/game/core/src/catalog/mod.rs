//! Enemy pattern catalog.
//!
//! The catalog is built once (from the canonical table or from content files)
//! and then shared read-only with every encounter. Nothing mutates it after
//! construction, so it needs no locking.

mod canonical;
mod pattern;

pub use canonical::canonical_enemies;
pub use pattern::{DEFAULT_MULTI_HIT_COUNT, Pattern, PatternStep, PatternStepKind, step_index};

use std::collections::HashMap;

use crate::error::{ErrorSeverity, GameError};

/// Stable enemy identifier such as `punisher_v1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EnemyId(pub String);

impl EnemyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptive role tag. Never consumed by combat math.
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
pub enum EnemyRole {
    Damage,
    Defense,
    Counter,
    MultiHit,
}

/// Static definition of an enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDefinition {
    pub id: EnemyId,
    pub name: String,
    pub role: EnemyRole,
    /// HP before floor growth is added.
    pub base_hp: u32,
    pub pattern: Pattern,
}

impl EnemyDefinition {
    /// Step used on the given 1-based turn.
    pub fn step_for_turn(&self, turn: u32) -> &PatternStep {
        &self.pattern[step_index(turn)]
    }

    /// Starting HP on a floor.
    pub fn hp_on_floor(&self, floor: u32, hp_per_floor: u32) -> u32 {
        self.base_hp
            .saturating_add(floor.saturating_mul(hp_per_floor))
            .max(1)
    }
}

/// Errors raised while assembling a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("enemy '{0}' is defined more than once")]
    DuplicateEnemy(EnemyId),

    #[error("catalog contains no enemies")]
    Empty,

    #[error("enemy '{0}' has zero base hp")]
    ZeroHp(EnemyId),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateEnemy(_) => "CATALOG_DUPLICATE_ENEMY",
            Self::Empty => "CATALOG_EMPTY",
            Self::ZeroHp(_) => "CATALOG_ZERO_HP",
        }
    }
}

/// Immutable lookup table of enemy definitions.
///
/// Insertion order is preserved so that seeded selection over the catalog is
/// reproducible.
#[derive(Clone, Debug, Default)]
pub struct EnemyCatalog {
    enemies: Vec<EnemyDefinition>,
    index: HashMap<EnemyId, usize>,
}

impl EnemyCatalog {
    /// Builds a catalog, rejecting duplicate ids and empty input.
    pub fn new(enemies: Vec<EnemyDefinition>) -> Result<Self, CatalogError> {
        if enemies.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(enemies.len());
        for (position, enemy) in enemies.iter().enumerate() {
            if enemy.base_hp == 0 {
                return Err(CatalogError::ZeroHp(enemy.id.clone()));
            }
            if index.insert(enemy.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateEnemy(enemy.id.clone()));
            }
        }

        Ok(Self { enemies, index })
    }

    /// The four enemies that ship with the game.
    pub fn canonical() -> Self {
        let enemies = canonical_enemies();
        let index = enemies
            .iter()
            .enumerate()
            .map(|(position, enemy)| (enemy.id.clone(), position))
            .collect();
        Self { enemies, index }
    }

    pub fn lookup(&self, id: &str) -> Option<&EnemyDefinition> {
        self.index
            .get(&EnemyId::new(id))
            .and_then(|&position| self.enemies.get(position))
    }

    pub fn get(&self, position: usize) -> Option<&EnemyDefinition> {
        self.enemies.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnemyDefinition> {
        self.enemies.iter()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}
