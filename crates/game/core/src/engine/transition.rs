//! Transition trait and the three-phase driver.

use crate::env::CombatEnv;
use crate::state::BattleState;

use super::errors::{TransitionPhase, TransitionPhaseError};

/// Defines how one player-facing operation mutates the battle state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. The hooks
/// receive read-only access to the environment and must stay side-effect
/// free.
pub trait CombatTransition {
    type Error;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &BattleState, _env: &CombatEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the operation by mutating the state directly. Implementations
    /// should assume that `pre_validate` has already run successfully.
    fn apply(&self, state: &mut BattleState, env: &CombatEnv<'_>) -> Result<(), Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &BattleState, _env: &CombatEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the battle state
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
pub(super) fn drive_transition<T>(
    transition: &T,
    state: &mut BattleState,
    env: &CombatEnv<'_>,
) -> Result<(), TransitionPhaseError<T::Error>>
where
    T: CombatTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(())
}
