//! Built-in demo campaign content.
//!
//! A small but complete catalog exercising every engine mechanic: elemental
//! affinities, multi-hit and group skills, periodic and restriction states,
//! redirects, shields, death throes, triggered enemy skills, and drop
//! tables. Useful for examples and as a fixture for integration tests;
//! real campaigns load their catalogs from data files instead.

use battle_core::{
    Affinities, Affinity, AppliedState, Attributes, BalanceTables, DropEntry, Element, EnemyDef,
    EnemySkill, ItemDef, ItemEffect, PeriodicKind, Restriction, Scaling, SkillDef, SkillKind,
    StatKind, StateBehaviour, StateDef, Targeting, ThreatPolicy, Trigger,
};

use crate::registry::ContentRegistry;

fn skill(name: &str, kind: SkillKind, targeting: Targeting) -> SkillDef {
    SkillDef {
        name: name.to_string(),
        kind,
        element: Element::Neutral,
        base_power: 0,
        scaling: Vec::new(),
        sp_cost: 0,
        hit_rate: 95,
        hits: 1,
        independent_variance: false,
        variance_per_mille: None,
        charge_bonus_per_mille: 0,
        targeting,
        applies: None,
    }
}

fn scaling(stat: StatKind, per_mille: u32) -> Scaling {
    Scaling { stat, per_mille }
}

fn state(name: &str, behaviour: StateBehaviour, stackable: bool, turns: u8) -> StateDef {
    StateDef {
        name: name.to_string(),
        behaviour,
        stackable,
        default_turns: turns,
    }
}

/// Builds the demo catalog.
pub fn demo_registry() -> ContentRegistry {
    let mut registry = ContentRegistry::new();

    // ==== Skills ====

    let mut strike = skill("Strike", SkillKind::Physical, Targeting::Enemy);
    strike.scaling = vec![scaling(StatKind::Strength, 1300)];
    strike.sp_cost = 2;
    registry.add_skill("strike", strike);

    let mut cleave = skill("Cleave", SkillKind::Physical, Targeting::AllEnemies);
    cleave.scaling = vec![scaling(StatKind::Strength, 900)];
    cleave.sp_cost = 5;
    cleave.hit_rate = 90;
    registry.add_skill("cleave", cleave);

    let mut flurry = skill("Flurry", SkillKind::Physical, Targeting::Enemy);
    flurry.scaling = vec![scaling(StatKind::Strength, 500)];
    flurry.sp_cost = 4;
    flurry.hits = 3;
    flurry.hit_rate = 85;
    flurry.independent_variance = true;
    registry.add_skill("flurry", flurry);

    let mut fireball = skill("Fireball", SkillKind::Magical, Targeting::Enemy);
    fireball.element = Element::Fire;
    fireball.base_power = 8;
    fireball.scaling = vec![scaling(StatKind::Intelligence, 1200)];
    fireball.sp_cost = 4;
    registry.add_skill("fireball", fireball);

    let mut ice_lance = skill("Ice Lance", SkillKind::Magical, Targeting::Enemy);
    ice_lance.element = Element::Ice;
    ice_lance.base_power = 6;
    ice_lance.scaling = vec![scaling(StatKind::Intelligence, 1100)];
    ice_lance.sp_cost = 3;
    registry.add_skill("ice_lance", ice_lance);

    let mut venom_spit = skill("Venom Spit", SkillKind::Physical, Targeting::Enemy);
    venom_spit.scaling = vec![scaling(StatKind::Strength, 800)];
    venom_spit.sp_cost = 3;
    venom_spit.applies = Some(AppliedState {
        state: "poison".to_string(),
        turns: 0,
        chance: 35,
    });
    registry.add_skill("venom_spit", venom_spit);

    let mut mend = skill("Mend", SkillKind::Heal, Targeting::Ally);
    mend.base_power = 12;
    mend.scaling = vec![scaling(StatKind::Intelligence, 600)];
    mend.sp_cost = 4;
    mend.hit_rate = 100;
    mend.charge_bonus_per_mille = 4000;
    registry.add_skill("mend", mend);

    let mut cover = skill("Cover", SkillKind::Utility, Targeting::Ally);
    cover.sp_cost = 2;
    cover.hit_rate = 100;
    cover.applies = Some(AppliedState {
        state: "guardian".to_string(),
        turns: 2,
        chance: 100,
    });
    registry.add_skill("cover", cover);

    let mut war_cry = skill("War Cry", SkillKind::Utility, Targeting::SelfOnly);
    war_cry.sp_cost = 3;
    war_cry.hit_rate = 100;
    war_cry.applies = Some(AppliedState {
        state: "enraged".to_string(),
        turns: 3,
        chance: 100,
    });
    registry.add_skill("war_cry", war_cry);

    let mut stunning_blow = skill("Stunning Blow", SkillKind::Physical, Targeting::Enemy);
    stunning_blow.scaling = vec![scaling(StatKind::Strength, 700)];
    stunning_blow.sp_cost = 5;
    stunning_blow.hit_rate = 80;
    stunning_blow.applies = Some(AppliedState {
        state: "stun".to_string(),
        turns: 1,
        chance: 40,
    });
    registry.add_skill("stunning_blow", stunning_blow);

    // ==== States ====

    registry.add_state(
        "poison",
        state(
            "Poison",
            StateBehaviour::Periodic {
                kind: PeriodicKind::Damage,
                amount: 4,
            },
            false,
            3,
        ),
    );
    registry.add_state(
        "regen",
        state(
            "Regen",
            StateBehaviour::Periodic {
                kind: PeriodicKind::Heal,
                amount: 5,
            },
            false,
            3,
        ),
    );
    registry.add_state(
        "guardian",
        state("Guardian", StateBehaviour::Redirect, false, 2),
    );
    registry.add_state(
        "barrier",
        state("Barrier", StateBehaviour::Shield { capacity: 15 }, false, 3),
    );
    registry.add_state(
        "stun",
        state(
            "Stun",
            StateBehaviour::Restrict {
                restriction: Restriction::ATTACK | Restriction::SKILL | Restriction::ITEM,
            },
            false,
            1,
        ),
    );
    registry.add_state(
        "silence",
        state(
            "Silence",
            StateBehaviour::Restrict {
                restriction: Restriction::SKILL,
            },
            false,
            2,
        ),
    );
    registry.add_state(
        "enraged",
        state(
            "Enraged",
            StateBehaviour::StatRate {
                stat: StatKind::Strength,
                per_mille: 300,
            },
            false,
            3,
        ),
    );
    registry.add_state(
        "weakened",
        state(
            "Weakened",
            StateBehaviour::StatRate {
                stat: StatKind::Strength,
                per_mille: -300,
            },
            false,
            3,
        ),
    );
    registry.add_state(
        "bomb_core",
        state("Unstable Core", StateBehaviour::OnDeath { damage: 8 }, false, 99),
    );

    // ==== Items ====

    registry.add_item(
        "tonic",
        ItemDef {
            name: "Tonic".to_string(),
            effect: ItemEffect::Heal { amount: 20 },
            targeting: Targeting::Ally,
        },
    );
    registry.add_item(
        "ether",
        ItemDef {
            name: "Ether".to_string(),
            effect: ItemEffect::RestoreSp { amount: 10 },
            targeting: Targeting::Ally,
        },
    );
    registry.add_item(
        "antidote",
        ItemDef {
            name: "Antidote".to_string(),
            effect: ItemEffect::Cure {
                states: vec!["poison".to_string()],
            },
            targeting: Targeting::Ally,
        },
    );
    registry.add_item(
        "fire_flask",
        ItemDef {
            name: "Fire Flask".to_string(),
            effect: ItemEffect::Damage {
                power: 14,
                element: Element::Fire,
            },
            targeting: Targeting::Enemy,
        },
    );
    registry.add_item(
        "smoke_bomb",
        ItemDef {
            name: "Smoke Bomb".to_string(),
            effect: ItemEffect::Escape,
            targeting: Targeting::SelfOnly,
        },
    );
    registry.add_item(
        "slime_gel",
        ItemDef {
            name: "Slime Gel".to_string(),
            effect: ItemEffect::Heal { amount: 5 },
            targeting: Targeting::Ally,
        },
    );
    registry.add_item(
        "imp_horn",
        ItemDef {
            name: "Imp Horn".to_string(),
            effect: ItemEffect::Damage {
                power: 10,
                element: Element::Fire,
            },
            targeting: Targeting::Enemy,
        },
    );

    // ==== Enemies ====

    registry.add_enemy(
        "slime",
        EnemyDef {
            name: "Slime".to_string(),
            attributes: Attributes::new(8, 2, 4, 3),
            max_hp: 28,
            max_sp: 0,
            affinities: Affinities::default(),
            skills: Vec::new(),
            threat: ThreatPolicy::HighestAgility,
            innate_states: Vec::new(),
            exp: 8,
            gold: 4,
            drops: vec![DropEntry {
                item: "slime_gel".to_string(),
                per_mille: 250,
            }],
        },
    );
    registry.add_enemy(
        "cinder_imp",
        EnemyDef {
            name: "Cinder Imp".to_string(),
            attributes: Attributes::new(7, 9, 5, 8),
            max_hp: 24,
            max_sp: 12,
            affinities: Affinities::default()
                .with(Element::Ice, Affinity::Weak)
                .with(Element::Fire, Affinity::Immune),
            skills: vec![EnemySkill {
                skill: "fireball".to_string(),
                rating: 4,
                trigger: None,
                once_per_battle: false,
            }],
            threat: ThreatPolicy::LowestHp,
            innate_states: Vec::new(),
            exp: 14,
            gold: 9,
            drops: vec![DropEntry {
                item: "imp_horn".to_string(),
                per_mille: 150,
            }],
        },
    );
    registry.add_enemy(
        "bog_serpent",
        EnemyDef {
            name: "Bog Serpent".to_string(),
            attributes: Attributes::new(11, 3, 7, 6),
            max_hp: 46,
            max_sp: 9,
            affinities: Affinities::default().with(Element::Lightning, Affinity::Weak),
            skills: vec![
                EnemySkill {
                    skill: "venom_spit".to_string(),
                    rating: 3,
                    trigger: None,
                    once_per_battle: false,
                },
                EnemySkill {
                    skill: "stunning_blow".to_string(),
                    rating: 6,
                    trigger: Some(Trigger::HpBelow { percent: 50 }),
                    once_per_battle: true,
                },
            ],
            threat: ThreatPolicy::HighestAgility,
            innate_states: Vec::new(),
            exp: 26,
            gold: 15,
            drops: vec![
                DropEntry {
                    item: "antidote".to_string(),
                    per_mille: 300,
                },
                DropEntry {
                    item: "tonic".to_string(),
                    per_mille: 100,
                },
            ],
        },
    );
    registry.add_enemy(
        "bomber_beetle",
        EnemyDef {
            name: "Bomber Beetle".to_string(),
            attributes: Attributes::new(6, 1, 8, 5),
            max_hp: 16,
            max_sp: 0,
            affinities: Affinities::default(),
            skills: Vec::new(),
            threat: ThreatPolicy::Random,
            innate_states: vec!["bomb_core".to_string()],
            exp: 10,
            gold: 6,
            drops: Vec::new(),
        },
    );

    registry.set_tables(BalanceTables::default());
    registry
}
