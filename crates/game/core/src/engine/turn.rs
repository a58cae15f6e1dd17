//! Turn mechanics shared by the engine operations.
//!
//! Every function here mutates a working copy of the battle state. Death is
//! checked after each damage application, and the first side to reach zero
//! HP ends the encounter on the spot.

use crate::card::{ActionCard, CardKind};
use crate::combat::{HitModifiers, absorb, apply_damage, calculate_attack_damage};
use crate::env::CombatEnv;
use crate::error::ErrorContext;
use crate::intent::telegraph;
use crate::state::{BattleState, EncounterOutcome, EncounterPhase, LogSource};
use crate::status::{Side, StatusType};

use super::errors::CombatError;

/// What one attack hit did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct HitReport {
    pub damage: u32,
    pub blocked: u32,
}

pub(super) fn context(state: &BattleState) -> ErrorContext {
    ErrorContext::new(state.turn).with_floor(state.floor)
}

/// Resolves one attack hit from `attacker` against the other side.
pub(super) fn strike(
    state: &mut BattleState,
    env: &CombatEnv<'_>,
    attacker: Side,
    base: u32,
) -> HitReport {
    let defender = attacker.opponent();
    let modifiers = HitModifiers {
        attacker_weak: state.statuses.has(attacker, StatusType::Weak),
        defender_vulnerable: state.statuses.has(defender, StatusType::Vulnerable),
    };
    let damage = calculate_attack_damage(base, modifiers, &env.config().statuses);

    let target = state.combatant_mut(defender);
    let absorption = absorb(target.block, damage);
    target.block = absorption.remaining_block;
    target.hp = apply_damage(target.hp, absorption.hp_loss);

    HitReport {
        damage,
        blocked: absorption.blocked,
    }
}

/// Moves the encounter into a terminal phase and records why.
pub(super) fn conclude(state: &mut BattleState, outcome: EncounterOutcome) {
    let (phase, message) = match outcome {
        EncounterOutcome::Victory => (
            EncounterPhase::Victory,
            format!("{} is defeated.", state.enemy_name),
        ),
        EncounterOutcome::Defeat => (EncounterPhase::Defeat, "You have fallen.".to_string()),
        EncounterOutcome::Abandoned => (EncounterPhase::Abandoned, "You surrender.".to_string()),
    };

    let source = if outcome == EncounterOutcome::Abandoned {
        LogSource::Player
    } else {
        LogSource::System
    };
    state.log.push(source, state.turn, message);
    state.phase = phase;
}

/// Applies a played card's effect. The card has already left the hand and
/// its cost has been paid.
pub(super) fn resolve_card(state: &mut BattleState, env: &CombatEnv<'_>, card: ActionCard) {
    let tuning = &env.config().cards;
    let name = card.kind.display_name();
    let turn = state.turn;

    match card.kind {
        CardKind::StrongAttack => {
            let was_vulnerable = state.statuses.has(Side::Enemy, StatusType::Vulnerable);
            let hit = strike(state, env, Side::Player, tuning.strong_attack_damage);
            let mut message = format!("You play {name}: {}", describe_hit(hit));

            if !state.enemy.is_defeated() {
                if was_vulnerable && tuning.strong_attack_stun > 0 {
                    // The stun spends the mark, so it cannot be refreshed every turn.
                    state.statuses.apply_status(
                        Side::Enemy,
                        StatusType::Stun,
                        tuning.strong_attack_stun,
                    );
                    state
                        .statuses
                        .reduce(Side::Enemy, StatusType::Vulnerable, u32::MAX);
                    message.push_str(&format!(
                        ", stun {}, vulnerable spent",
                        tuning.strong_attack_stun
                    ));
                } else {
                    state.statuses.apply_status(
                        Side::Enemy,
                        StatusType::Vulnerable,
                        tuning.strong_attack_vulnerable,
                    );
                    message
                        .push_str(&format!(", vulnerable {}", tuning.strong_attack_vulnerable));
                }
            }
            message.push('.');
            state.log.push(LogSource::Player, turn, message);
        }

        CardKind::DoubleAttack => {
            let mut hits = Vec::new();
            for _ in 0..tuning.double_attack_hits {
                hits.push(describe_hit(strike(
                    state,
                    env,
                    Side::Player,
                    tuning.double_attack_hit,
                )));
                if state.enemy.is_defeated() {
                    break;
                }
            }

            let mut message = format!("You play {name}: {}", hits.join(", "));
            if !state.enemy.is_defeated() {
                state.statuses.apply_status(
                    Side::Enemy,
                    StatusType::Bleed,
                    tuning.double_attack_bleed,
                );
                message.push_str(&format!(", bleed {}", tuning.double_attack_bleed));
            }
            message.push('.');
            state.log.push(LogSource::Player, turn, message);
        }

        CardKind::Defend => {
            state.player.block = state.player.block.saturating_add(tuning.defend_block);
            state.log.push(
                LogSource::Player,
                turn,
                format!("You play {name}: gain {} block.", tuning.defend_block),
            );
        }

        CardKind::Counter => {
            state.player.block = state.player.block.saturating_add(tuning.counter_block);
            state.counter_armed = true;
            state.log.push(
                LogSource::Player,
                turn,
                format!(
                    "You play {name}: gain {} block and brace to strike back.",
                    tuning.counter_block
                ),
            );
        }
    }

    if state.enemy.is_defeated() {
        conclude(state, EncounterOutcome::Victory);
    }
}

fn describe_hit(hit: HitReport) -> String {
    if hit.blocked > 0 {
        format!("hit for {} ({} blocked)", hit.damage, hit.blocked)
    } else {
        format!("hit for {}", hit.damage)
    }
}

/// Starts the turn in `state.turn`: separator, intent telegraph, player
/// turn-start statuses, action points and draw.
pub(super) fn open_turn(state: &mut BattleState, env: &CombatEnv<'_>) -> Result<(), CombatError> {
    let config = env.config();
    let turn = state.turn;

    state
        .log
        .push(LogSource::Separator, turn, format!("Turn {turn}"));

    state.phase = EncounterPhase::AwaitingIntentTelegraph;
    let enemy = env
        .catalog()
        .lookup(state.enemy_id.as_str())
        .ok_or_else(|| CombatError::unknown_enemy(state.enemy_id.as_str()))?;
    state.intent = telegraph(enemy, turn, state.floor);

    state.player.block = 0;
    state.counter_armed = false;

    let label = state.side_label(Side::Player).to_string();
    let start = state
        .statuses
        .consume_turn_start(Side::Player, &label, &config.statuses);
    for line in start.lines {
        state.log.push(LogSource::System, turn, line);
    }
    if start.bleed_damage > 0 {
        state.player.hp = apply_damage(state.player.hp, start.bleed_damage);
        if state.player.is_defeated() {
            conclude(state, EncounterOutcome::Defeat);
            return Ok(());
        }
    }

    state.ap = if start.skipped { 0 } else { config.ap_per_turn };
    state
        .deck
        .draw_to(config.effective_hand_size(), state.seed, env.rng());

    state.phase = EncounterPhase::AwaitingPlayerAction;
    Ok(())
}

/// Ends the player's turn, runs the enemy's turn and opens the next one
/// unless the encounter ended.
pub(super) fn close_turn(state: &mut BattleState, env: &CombatEnv<'_>) -> Result<(), CombatError> {
    let tuning = &env.config().statuses;

    state.phase = EncounterPhase::ResolvingPlayerAction;
    state
        .log
        .push(LogSource::Player, state.turn, "You end the turn.");
    state.deck.discard_hand();
    state.statuses.decay_end_of_turn(Side::Player, tuning);

    state.phase = EncounterPhase::ResolvingEnemyAction;
    enemy_turn(state, env);
    if state.is_terminal() {
        return Ok(());
    }
    state.statuses.decay_end_of_turn(Side::Enemy, tuning);

    state.phase = EncounterPhase::CheckingEnd;
    state.turn = state.turn.saturating_add(1);
    open_turn(state, env)
}

/// Executes the telegraphed intent exactly as stored.
fn enemy_turn(state: &mut BattleState, env: &CombatEnv<'_>) {
    let config = env.config();
    let turn = state.turn;
    let name = state.enemy_name.clone();

    state.enemy.block = 0;

    let start = state
        .statuses
        .consume_turn_start(Side::Enemy, &name, &config.statuses);
    for line in start.lines {
        state.log.push(LogSource::System, turn, line);
    }
    if start.bleed_damage > 0 {
        state.enemy.hp = apply_damage(state.enemy.hp, start.bleed_damage);
        if state.enemy.is_defeated() {
            conclude(state, EncounterOutcome::Victory);
            return;
        }
    }
    if start.skipped {
        return;
    }

    let step = state.intent.step;
    let block = step.block();
    if block > 0 {
        state.enemy.block = state.enemy.block.saturating_add(block);
        state
            .log
            .push(LogSource::System, turn, format!("{name} gains {block} block."));
    }

    for base in step.hits() {
        let hit = strike(state, env, Side::Enemy, base);
        let message = if hit.blocked > 0 {
            format!("{name} attacks for {} ({} blocked).", hit.damage, hit.blocked)
        } else {
            format!("{name} attacks for {}.", hit.damage)
        };
        state.log.push(LogSource::System, turn, message);

        if state.player.is_defeated() {
            conclude(state, EncounterOutcome::Defeat);
            return;
        }

        if state.counter_armed {
            retaliate(state, env);
            if state.enemy.is_defeated() {
                conclude(state, EncounterOutcome::Victory);
                return;
            }
        }
    }
}

/// Counter stance response to one enemy hit. Absorbed by enemy block but
/// unaffected by weak or vulnerable.
fn retaliate(state: &mut BattleState, env: &CombatEnv<'_>) {
    let tuning = &env.config().cards;
    let absorption = absorb(state.enemy.block, tuning.counter_retaliation);
    state.enemy.block = absorption.remaining_block;
    state.enemy.hp = apply_damage(state.enemy.hp, absorption.hp_loss);
    state
        .statuses
        .apply_status(Side::Enemy, StatusType::Weak, tuning.counter_weak);

    let turn = state.turn;
    state.log.push(
        LogSource::System,
        turn,
        format!(
            "Counter strikes back for {}, weak {}.",
            tuning.counter_retaliation, tuning.counter_weak
        ),
    );
}
