//! Deterministic combat rules for the tower climb.
//!
//! `tower-core` defines the canonical rules (enemy patterns, intent
//! resolution, status stacks, cards, battle state and the turn engine) and
//! exposes pure APIs reused by the content loaders and the runtime. All
//! battle mutation flows through [`engine::CombatEngine`], and supporting
//! crates depend on the types re-exported here.
pub mod card;
pub mod catalog;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod intent;
pub mod rng;
pub mod scaling;
pub mod state;
pub mod status;

pub use card::{ActionCard, CardId, CardKind, Deck};
pub use catalog::{
    CatalogError, EnemyCatalog, EnemyDefinition, EnemyId, EnemyRole, Pattern, PatternStep,
    PatternStepKind,
};
pub use config::{CardTuning, CombatConfig, StatusTuning};
pub use engine::{
    ActionOutcome, CombatEngine, CombatError, EncounterSpec, ExecuteError, TransitionPhase,
    TransitionPhaseError, start_encounter,
};
pub use env::CombatEnv;
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use intent::{Intent, ResolvedStep, resolve_step, telegraph};
pub use rng::{PcgRng, RngOracle, SeedContext, compute_seed};
pub use scaling::resolve_x;
pub use state::{
    BattleFields, BattleState, Combatant, CombatLog, CombatLogEntry, EncounterOutcome,
    EncounterPhase, LogSource,
};
pub use status::{Side, StatusBook, StatusInstance, StatusType, TurnStartOutcome};
