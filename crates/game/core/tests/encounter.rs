use tower_core::{
    BattleFields, BattleState, CardId, CardKind, CombatConfig, CombatEngine, CombatEnv,
    CombatError, EncounterOutcome, EncounterPhase, EncounterSpec, EnemyCatalog, EnemyDefinition,
    EnemyId, EnemyRole, ErrorSeverity, GameError, LogSource, PatternStep, ResolvedStep, Side,
    StatusType, TransitionPhase, start_encounter,
};

fn deck_of(kind: CardKind) -> CombatConfig {
    CombatConfig {
        starter_deck: vec![kind; 13],
        ..CombatConfig::default()
    }
}

fn start(catalog: &EnemyCatalog, config: &CombatConfig, enemy: &str, floor: u32) -> BattleState {
    let env = CombatEnv::new(catalog, config);
    start_encounter(&env, &EncounterSpec::new(enemy, floor).with_seed(7)).unwrap()
}

fn card_of(state: &BattleState, kind: CardKind) -> CardId {
    state
        .hand()
        .iter()
        .find(|card| card.kind == kind)
        .map(|card| card.id)
        .expect("card kind in hand")
}

fn fragile_catalog() -> EnemyCatalog {
    EnemyCatalog::new(vec![EnemyDefinition {
        id: EnemyId::new("paper_v1"),
        name: "Paper".to_string(),
        role: EnemyRole::Damage,
        base_hp: 5,
        pattern: [PatternStep::scaled_attack(); 3],
    }])
    .unwrap()
}

#[test]
fn encounter_opens_awaiting_player() {
    let catalog = EnemyCatalog::canonical();
    let config = CombatConfig::default();
    let state = start(&catalog, &config, "punisher_v1", 1);

    assert_eq!(state.phase, EncounterPhase::AwaitingPlayerAction);
    assert_eq!(state.turn, 1);
    assert_eq!(state.enemy.hp, 44);
    assert_eq!(state.player.hp, 60);
    assert_eq!(state.ap, 3);
    assert_eq!(state.hand().len(), 5);
    assert_eq!(state.intent.step, ResolvedStep::Attack { damage: 6 });

    let sources: Vec<_> = state.log.iter().map(|entry| entry.source).collect();
    assert_eq!(sources, vec![LogSource::System, LogSource::Separator]);
}

#[test]
fn unknown_enemy_is_rejected() {
    let catalog = EnemyCatalog::canonical();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &config);

    let err = start_encounter(&env, &EncounterSpec::new("slime_v9", 1)).unwrap_err();
    assert!(matches!(err, CombatError::UnknownEnemy { .. }));
    assert_eq!(err.severity(), ErrorSeverity::Validation);
}

#[test]
fn punisher_cycles_and_executes_what_it_telegraphs() {
    let catalog = EnemyCatalog::canonical();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "punisher_v1", 1);

    let mut intents = vec![state.intent.step];
    let mut hp_after = Vec::new();
    for _ in 0..3 {
        let telegraphed = state.intent.step;
        let before = state.player.hp;
        CombatEngine::new(&mut state, env).end_turn().unwrap();
        assert_eq!(before - state.player.hp, telegraphed.total_damage());
        intents.push(state.intent.step);
        hp_after.push(state.player.hp);
    }

    assert_eq!(
        intents,
        vec![
            ResolvedStep::Attack { damage: 6 },
            ResolvedStep::Attack { damage: 6 },
            ResolvedStep::Block { block: 6 },
            ResolvedStep::Attack { damage: 6 },
        ]
    );
    assert_eq!(hp_after, vec![54, 48, 48]);
    assert_eq!(state.turn, 4);
}

#[test]
fn punisher_on_floor_ten_hits_for_eleven() {
    let catalog = EnemyCatalog::canonical();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "punisher_v1", 10);

    assert_eq!(state.intent.x, 11);
    assert_eq!(state.intent.step, ResolvedStep::Attack { damage: 11 });

    CombatEngine::new(&mut state, env).end_turn().unwrap();
    assert_eq!(state.player.hp, 49);
}

#[test]
fn feiyancha_double_hit_ignores_floor() {
    let catalog = EnemyCatalog::canonical();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &config);

    for floor in [0, 25] {
        let mut state = start(&catalog, &config, "feiyancha_v1", floor);
        assert_eq!(
            state.intent.step,
            ResolvedStep::MultiHitAttack { per_hit: 4, hits: 2 }
        );

        let outcome = CombatEngine::new(&mut state, env).end_turn().unwrap();
        assert_eq!(state.player.hp, 52);
        let hits = outcome
            .entries
            .iter()
            .filter(|entry| entry.message == "Feiyancha attacks for 4.")
            .count();
        assert_eq!(hits, 2);
    }
}

#[test]
fn unaffordable_card_leaves_state_untouched() {
    let catalog = EnemyCatalog::canonical();
    let config = deck_of(CardKind::StrongAttack);
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "punisher_v1", 1);

    let first = card_of(&state, CardKind::StrongAttack);
    CombatEngine::new(&mut state, env).play_card(first).unwrap();
    assert_eq!(state.ap, 1);

    let snapshot = state.clone();
    let fingerprint = state.fingerprint();
    let second = card_of(&state, CardKind::StrongAttack);
    let err = CombatEngine::new(&mut state, env)
        .play_card(second)
        .unwrap_err();

    assert_eq!(
        err.combat_error(),
        &CombatError::insufficient_action_points(2, 1, err.context().unwrap().clone())
    );
    assert_eq!(err.phase(), TransitionPhase::PreValidate);
    assert!(err.severity().is_recoverable());
    assert_eq!(state, snapshot);
    assert_eq!(hex::encode(state.fingerprint()), hex::encode(fingerprint));
}

#[test]
fn card_not_in_hand_is_unknown() {
    let catalog = EnemyCatalog::canonical();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "bulwark_v1", 2);
    let snapshot = state.clone();

    let err = CombatEngine::new(&mut state, env)
        .play_card(CardId(999))
        .unwrap_err();

    assert!(matches!(err.combat_error(), CombatError::UnknownCard { .. }));
    assert_eq!(err.error_code(), "COMBAT_UNKNOWN_CARD");
    assert_eq!(state, snapshot);
}

#[test]
fn lethal_card_wins_without_enemy_action() {
    let catalog = fragile_catalog();
    let config = deck_of(CardKind::StrongAttack);
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "paper_v1", 0);
    let log_before = state.log.len();

    let card = card_of(&state, CardKind::StrongAttack);
    let outcome = CombatEngine::new(&mut state, env).play_card(card).unwrap();

    assert_eq!(outcome.outcome, Some(EncounterOutcome::Victory));
    assert_eq!(state.phase, EncounterPhase::Victory);
    assert_eq!(state.player.hp, 60);
    assert!(
        state
            .log
            .since(log_before)
            .iter()
            .all(|entry| !entry.message.contains("attacks"))
    );
    assert_eq!(state.log.last().unwrap().message, "Paper is defeated.");

    let err = CombatEngine::new(&mut state, env).end_turn().unwrap_err();
    assert!(matches!(
        err.combat_error(),
        CombatError::EncounterAlreadyTerminal {
            outcome: EncounterOutcome::Victory,
            ..
        }
    ));
}

#[test]
fn surrender_is_terminal_and_skips_the_enemy() {
    let catalog = EnemyCatalog::canonical();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "thornback_v1", 3);
    let log_before = state.log.len();
    let hp_before = state.player.hp;

    let outcome = CombatEngine::new(&mut state, env).surrender().unwrap();

    assert_eq!(outcome.outcome, Some(EncounterOutcome::Abandoned));
    assert_eq!(state.phase, EncounterPhase::Abandoned);
    assert_eq!(state.player.hp, hp_before);

    let appended = state.log.since(log_before);
    assert_eq!(appended.len(), 1);
    assert_eq!(appended[0].source, LogSource::Player);
    assert_eq!(appended[0].message, "You surrender.");

    let card = state.hand()[0].id;
    let err = CombatEngine::new(&mut state, env)
        .play_card(card)
        .unwrap_err();
    assert!(matches!(
        err.combat_error(),
        CombatError::EncounterAlreadyTerminal { .. }
    ));
    let err = CombatEngine::new(&mut state, env).surrender().unwrap_err();
    assert!(matches!(
        err.combat_error(),
        CombatError::EncounterAlreadyTerminal { .. }
    ));
}

#[test]
fn lethal_enemy_hit_is_defeat() {
    let catalog = EnemyCatalog::canonical();
    let config = CombatConfig {
        player_max_hp: 5,
        ..CombatConfig::default()
    };
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "punisher_v1", 0);

    let outcome = CombatEngine::new(&mut state, env).end_turn().unwrap();

    assert_eq!(outcome.outcome, Some(EncounterOutcome::Defeat));
    assert_eq!(state.player.hp, 0);
    assert_eq!(state.turn, 1);
    assert_eq!(state.log.last().unwrap().message, "You have fallen.");
}

#[test]
fn strong_attack_marks_then_stuns() {
    let catalog = EnemyCatalog::canonical();
    let config = deck_of(CardKind::StrongAttack);
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "punisher_v1", 1);

    // Turn 1: 10 damage, vulnerable 2.
    let card = card_of(&state, CardKind::StrongAttack);
    CombatEngine::new(&mut state, env).play_card(card).unwrap();
    assert_eq!(state.enemy.hp, 34);
    assert_eq!(state.statuses.stacks(Side::Enemy, StatusType::Vulnerable), 2);
    assert!(!state.statuses.has(Side::Enemy, StatusType::Stun));

    CombatEngine::new(&mut state, env).end_turn().unwrap();
    assert_eq!(state.player.hp, 54);
    assert_eq!(state.statuses.stacks(Side::Enemy, StatusType::Vulnerable), 1);

    // Turn 2: vulnerable hit for 15, stun 1, mark spent.
    let card = card_of(&state, CardKind::StrongAttack);
    CombatEngine::new(&mut state, env).play_card(card).unwrap();
    assert_eq!(state.enemy.hp, 19);
    assert_eq!(state.statuses.stacks(Side::Enemy, StatusType::Stun), 1);
    assert!(!state.statuses.has(Side::Enemy, StatusType::Vulnerable));

    let outcome = CombatEngine::new(&mut state, env).end_turn().unwrap();
    assert_eq!(state.player.hp, 54);
    assert!(
        outcome
            .entries
            .iter()
            .any(|entry| entry.message == "Punisher is stunned and loses the turn.")
    );
    assert!(!state.statuses.has(Side::Enemy, StatusType::Stun));

    // Turn 3: no mark left, so the stun does not repeat.
    let card = card_of(&state, CardKind::StrongAttack);
    CombatEngine::new(&mut state, env).play_card(card).unwrap();
    assert_eq!(state.enemy.hp, 9);
    assert!(!state.statuses.has(Side::Enemy, StatusType::Stun));
    assert_eq!(state.statuses.stacks(Side::Enemy, StatusType::Vulnerable), 2);

    let outcome = CombatEngine::new(&mut state, env).end_turn().unwrap();
    assert!(
        outcome
            .entries
            .iter()
            .all(|entry| !entry.message.contains("stunned"))
    );
    assert_eq!(state.enemy.block, 6);
}

#[test]
fn stunned_player_gets_no_action_points_but_draws() {
    let catalog = EnemyCatalog::canonical();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "punisher_v1", 1);
    state.statuses.apply_status(Side::Player, StatusType::Stun, 1);

    let outcome = CombatEngine::new(&mut state, env).end_turn().unwrap();

    assert_eq!(state.turn, 2);
    assert_eq!(state.phase, EncounterPhase::AwaitingPlayerAction);
    assert_eq!(state.player.hp, 54);
    assert_eq!(state.ap, 0);
    assert_eq!(state.hand().len(), 5);
    assert!(!state.statuses.has(Side::Player, StatusType::Stun));
    assert!(
        outcome
            .entries
            .iter()
            .any(|entry| entry.source == LogSource::System
                && entry.message == "Player is stunned and loses the turn.")
    );

    let card = state.hand()[0].id;
    let err = CombatEngine::new(&mut state, env).play_card(card).unwrap_err();
    assert!(matches!(
        err.combat_error(),
        CombatError::InsufficientActionPoints { available: 0, .. }
    ));

    CombatEngine::new(&mut state, env).end_turn().unwrap();
    assert_eq!(state.turn, 3);
    assert_eq!(state.ap, 3);
}

#[test]
fn player_bleed_can_end_the_encounter_at_turn_start() {
    let catalog = EnemyCatalog::canonical();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &config);
    // Bulwark only blocks on turn 1, so bleed is the only damage.
    let mut state = start(&catalog, &config, "bulwark_v1", 0);
    state.player.hp = 3;
    state.statuses.apply_status(Side::Player, StatusType::Bleed, 5);

    let outcome = CombatEngine::new(&mut state, env).end_turn().unwrap();

    // End-of-turn decay leaves 4 stacks for the next turn start.
    assert_eq!(outcome.outcome, Some(EncounterOutcome::Defeat));
    assert_eq!(state.phase, EncounterPhase::Defeat);
    assert_eq!(state.player.hp, 0);
    assert_eq!(state.turn, 2);
    let messages: Vec<_> = outcome
        .entries
        .iter()
        .map(|entry| entry.message.as_str())
        .collect();
    assert!(messages.contains(&"Player bleeds for 4 damage."));
    assert_eq!(messages.last(), Some(&"You have fallen."));
}

#[test]
fn enemy_bleed_can_win_before_it_acts() {
    let catalog = EnemyCatalog::canonical();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "punisher_v1", 1);
    state.enemy.hp = 2;
    state.statuses.apply_status(Side::Enemy, StatusType::Bleed, 3);

    let outcome = CombatEngine::new(&mut state, env).end_turn().unwrap();

    assert_eq!(outcome.outcome, Some(EncounterOutcome::Victory));
    assert_eq!(state.phase, EncounterPhase::Victory);
    assert_eq!(state.enemy.hp, 0);
    assert_eq!(state.player.hp, 60);
    let messages: Vec<_> = outcome
        .entries
        .iter()
        .map(|entry| entry.message.as_str())
        .collect();
    assert!(messages.contains(&"Punisher bleeds for 3 damage."));
    assert!(!messages.iter().any(|message| message.starts_with("Punisher attacks")));
    assert_eq!(messages.last(), Some(&"Punisher is defeated."));
}

#[test]
fn retaliation_can_win_between_hits() {
    let catalog = EnemyCatalog::canonical();
    let config = deck_of(CardKind::Counter);
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "feiyancha_v1", 0);

    let card = card_of(&state, CardKind::Counter);
    CombatEngine::new(&mut state, env).play_card(card).unwrap();
    state.enemy.hp = 3;

    let outcome = CombatEngine::new(&mut state, env).end_turn().unwrap();

    assert_eq!(outcome.outcome, Some(EncounterOutcome::Victory));
    assert_eq!(state.enemy.hp, 0);
    // First hit: 4 damage, 3 absorbed. The second hit never lands.
    assert_eq!(state.player.hp, 59);
    let hits = outcome
        .entries
        .iter()
        .filter(|entry| entry.message.starts_with("Feiyancha attacks"))
        .count();
    assert_eq!(hits, 1);
    assert_eq!(state.log.last().unwrap().message, "Feiyancha is defeated.");
}

#[test]
fn double_attack_bleeds_at_enemy_turn_start() {
    let catalog = EnemyCatalog::canonical();
    let config = deck_of(CardKind::DoubleAttack);
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "punisher_v1", 1);

    for _ in 0..3 {
        let card = card_of(&state, CardKind::DoubleAttack);
        CombatEngine::new(&mut state, env).play_card(card).unwrap();
    }
    assert_eq!(state.ap, 0);
    assert_eq!(state.enemy.hp, 20);
    assert_eq!(state.statuses.stacks(Side::Enemy, StatusType::Bleed), 6);

    CombatEngine::new(&mut state, env).end_turn().unwrap();
    assert_eq!(state.enemy.hp, 14);
    assert_eq!(state.statuses.stacks(Side::Enemy, StatusType::Bleed), 5);
    assert_eq!(state.player.hp, 54);
}

#[test]
fn counter_retaliates_and_weakens() {
    let catalog = EnemyCatalog::canonical();
    let config = deck_of(CardKind::Counter);
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "punisher_v1", 1);

    let card = card_of(&state, CardKind::Counter);
    CombatEngine::new(&mut state, env).play_card(card).unwrap();
    assert_eq!(state.player.block, 3);
    assert!(state.counter_armed);

    CombatEngine::new(&mut state, env).end_turn().unwrap();
    // 6 damage, 3 blocked; 3 back.
    assert_eq!(state.player.hp, 57);
    assert_eq!(state.enemy.hp, 41);
    assert_eq!(state.statuses.stacks(Side::Enemy, StatusType::Weak), 1);
    assert!(!state.counter_armed);
    assert_eq!(state.player.block, 0);

    // Weakened: 6 * 0.75 rounds down to 4.
    CombatEngine::new(&mut state, env).end_turn().unwrap();
    assert_eq!(state.player.hp, 53);
    assert!(!state.statuses.has(Side::Enemy, StatusType::Weak));
}

#[test]
fn enemy_block_carries_into_the_next_player_turn() {
    let catalog = EnemyCatalog::canonical();
    let config = deck_of(CardKind::StrongAttack);
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "bulwark_v1", 0);
    assert_eq!(state.enemy.hp, 48);

    let card = card_of(&state, CardKind::StrongAttack);
    CombatEngine::new(&mut state, env).play_card(card).unwrap();
    assert_eq!(state.enemy.hp, 38);

    CombatEngine::new(&mut state, env).end_turn().unwrap();
    assert_eq!(state.enemy.block, 6);
    assert_eq!(
        state.intent.step,
        ResolvedStep::BlockAndAttack { block: 6, damage: 6 }
    );

    // 15 vulnerable damage, 6 absorbed.
    let card = card_of(&state, CardKind::StrongAttack);
    CombatEngine::new(&mut state, env).play_card(card).unwrap();
    assert_eq!(state.enemy.block, 0);
    assert_eq!(state.enemy.hp, 29);
}

#[test]
fn defend_blocks_enemy_attack() {
    let catalog = EnemyCatalog::canonical();
    let config = deck_of(CardKind::Defend);
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "punisher_v1", 1);

    let card = card_of(&state, CardKind::Defend);
    CombatEngine::new(&mut state, env).play_card(card).unwrap();
    let outcome = CombatEngine::new(&mut state, env).end_turn().unwrap();

    assert_eq!(state.player.hp, 60);
    assert!(
        outcome
            .entries
            .iter()
            .any(|entry| entry.message == "Punisher attacks for 6 (6 blocked).")
    );
}

#[test]
fn end_turn_reports_changes_and_entries() {
    let catalog = EnemyCatalog::canonical();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "punisher_v1", 1);

    let outcome = CombatEngine::new(&mut state, env).end_turn().unwrap();

    assert!(outcome.fields.contains(BattleFields::TURN));
    assert!(outcome.fields.contains(BattleFields::PLAYER_HP));
    assert!(outcome.fields.contains(BattleFields::LOG));
    assert!(!outcome.fields.contains(BattleFields::ENEMY_HP));
    assert_eq!(outcome.outcome, None);

    assert_eq!(outcome.entries[0].source, LogSource::Player);
    assert_eq!(outcome.entries[0].message, "You end the turn.");
    let separator = outcome
        .entries
        .iter()
        .find(|entry| entry.source == LogSource::Separator)
        .unwrap();
    assert_eq!(separator.turn, 2);
    assert_eq!(separator.message, "Turn 2");
}

#[test]
fn hand_is_refilled_each_turn() {
    let catalog = EnemyCatalog::canonical();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &config);
    let mut state = start(&catalog, &config, "bulwark_v1", 0);

    for _ in 0..5 {
        CombatEngine::new(&mut state, env).end_turn().unwrap();
        assert_eq!(state.hand().len(), 5);
        assert_eq!(state.ap, 3);
        assert_eq!(state.deck.total_cards(), 13);
    }
}

#[test]
fn replay_is_deterministic() {
    let catalog = EnemyCatalog::canonical();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &config);

    let run = || {
        let mut state = start(&catalog, &config, "thornback_v1", 4);
        let mut fingerprints = vec![state.fingerprint()];
        for _ in 0..6 {
            if state.is_terminal() {
                break;
            }
            let mut engine = CombatEngine::new(&mut state, env);
            let next = engine.state().playable_cards().next().map(|card| card.id);
            if let Some(card) = next {
                engine.play_card(card).unwrap();
            }
            if !engine.state().is_terminal() {
                engine.end_turn().unwrap();
            }
            fingerprints.push(state.fingerprint());
        }
        fingerprints
    };

    let first = run();
    let second = run();
    assert_eq!(
        first.iter().map(hex::encode).collect::<Vec<_>>(),
        second.iter().map(hex::encode).collect::<Vec<_>>()
    );
}

#[test]
fn player_hp_carries_in() {
    let catalog = EnemyCatalog::canonical();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&catalog, &config);

    let state = start_encounter(
        &env,
        &EncounterSpec::new("punisher_v1", 2).with_player_hp(17),
    )
    .unwrap();
    assert_eq!(state.player.hp, 17);
    assert_eq!(state.player.max_hp, 60);

    let state = start_encounter(
        &env,
        &EncounterSpec::new("punisher_v1", 2).with_player_hp(500),
    )
    .unwrap();
    assert_eq!(state.player.hp, 60);
}
