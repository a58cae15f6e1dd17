use super::{EnemyDefinition, EnemyId, EnemyRole, PatternStep};

/// The shipped enemy table.
pub fn canonical_enemies() -> Vec<EnemyDefinition> {
    vec![
        EnemyDefinition {
            id: EnemyId::new("punisher_v1"),
            name: "Punisher".to_string(),
            role: EnemyRole::Damage,
            base_hp: 40,
            pattern: [
                PatternStep::scaled_attack(),
                PatternStep::scaled_attack(),
                PatternStep::scaled_block(),
            ],
        },
        EnemyDefinition {
            id: EnemyId::new("bulwark_v1"),
            name: "Bulwark".to_string(),
            role: EnemyRole::Defense,
            base_hp: 48,
            pattern: [
                PatternStep::scaled_block(),
                PatternStep::BlockAndAttack {
                    block: 0,
                    damage: 0,
                    weapon: false,
                },
                PatternStep::scaled_attack(),
            ],
        },
        EnemyDefinition {
            id: EnemyId::new("thornback_v1"),
            name: "Thornback".to_string(),
            role: EnemyRole::Counter,
            base_hp: 44,
            pattern: [
                PatternStep::BlockAndAttack {
                    block: 0,
                    damage: 0,
                    weapon: true,
                },
                PatternStep::Attack {
                    damage: 0,
                    weapon: true,
                },
                PatternStep::scaled_block(),
            ],
        },
        // Fixed 4-damage double hit; does not scale with floor.
        EnemyDefinition {
            id: EnemyId::new("feiyancha_v1"),
            name: "Feiyancha".to_string(),
            role: EnemyRole::MultiHit,
            base_hp: 36,
            pattern: [
                PatternStep::MultiHitAttack {
                    per_hit: 4,
                    hits: Some(2),
                    weapon: true,
                },
                PatternStep::MultiHitAttack {
                    per_hit: 4,
                    hits: Some(2),
                    weapon: true,
                },
                PatternStep::scaled_block(),
            ],
        },
    ]
}
