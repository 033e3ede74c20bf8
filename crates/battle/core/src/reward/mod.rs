//! Victory rewards: gold, experience with level-ups, and loot.
//!
//! Rewards are granted once, in a fixed order, when the enemy side is wiped
//! out. Only loot draws from the RNG.
mod experience;
mod loot;

pub use experience::experience_threshold;

use crate::config::BattleConfig;
use crate::env::{BattleEnv, RngSource};
use crate::event::BattleEvent;
use crate::state::{CombatantId, ItemId, PartyProgress, PartyStash, Roster, Side};

/// Experience credited to one party member.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperienceShare {
    pub member: CombatantId,
    pub source_id: String,
    pub amount: u32,
    /// Level after the award.
    pub level: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp {
    pub member: CombatantId,
    pub source_id: String,
    pub level: u32,
    pub max_hp: u32,
    pub max_mp: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootGrant {
    pub enemy: CombatantId,
    pub item: ItemId,
    pub quantity: u32,
}

/// Everything a victory granted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardSummary {
    pub gold: u64,
    pub experience: u32,
    pub shares: Vec<ExperienceShare>,
    pub level_ups: Vec<LevelUp>,
    pub loot: Vec<LootGrant>,
}

/// Mutable state and content the reward step works against.
pub struct RewardContext<'a> {
    pub roster: &'a mut Roster,
    pub progress: &'a mut PartyProgress,
    pub env: BattleEnv<'a>,
    pub rng: &'a mut dyn RngSource,
    pub stash: &'a mut PartyStash,
    pub config: &'a BattleConfig,
}

/// Grants gold, experience, and loot for every enemy in the roster.
///
/// Experience is split evenly between the primary and companions (summons
/// excluded); the remainder goes to the primary. A member whose share is zero
/// receives nothing.
pub fn grant_rewards(ctx: &mut RewardContext<'_>) -> (RewardSummary, Vec<BattleEvent>) {
    let mut summary = RewardSummary::default();
    let mut events = Vec::new();

    let (gold, experience) = ctx
        .roster
        .on_side(Side::Enemy)
        .fold((0u64, 0u32), |(gold, exp), enemy| {
            (
                gold + u64::from(enemy.bounty.gold),
                exp.saturating_add(enemy.bounty.exp),
            )
        });

    if gold > 0 {
        let total = ctx.stash.credit_gold(gold);
        events.push(BattleEvent::GoldAwarded {
            amount: gold,
            total,
        });
    }
    summary.gold = gold;
    summary.experience = experience;

    let recipients: Vec<(CombatantId, bool)> = ctx
        .roster
        .on_side(Side::Ally)
        .filter(|c| c.role.shares_experience())
        .map(|c| (c.id, c.is_primary()))
        .collect();
    if experience > 0 && !recipients.is_empty() {
        let count = recipients.len() as u32;
        let base = experience / count;
        let remainder = experience % count;
        for (member, is_primary) in recipients {
            let amount = if is_primary { base + remainder } else { base };
            if amount > 0 {
                award(ctx, member, amount, &mut summary, &mut events);
            }
        }
    }

    if let Ok(oracle) = ctx.env.loot() {
        let grants = loot::roll_loot(
            ctx.roster.on_side(Side::Enemy),
            oracle.tables(),
            &mut *ctx.rng,
            ctx.stash,
        );
        events.extend(grants.iter().map(|grant| BattleEvent::LootDropped {
            enemy: grant.enemy,
            item: grant.item.clone(),
            quantity: grant.quantity,
        }));
        summary.loot = grants;
    }

    if ctx.config.restore_mp_after_victory {
        for ally in ctx.roster.iter_mut() {
            if ally.side() == Side::Ally && ally.is_alive() {
                ally.restore(0, ally.stats.max_mp);
            }
        }
    }

    (summary, events)
}

fn award(
    ctx: &mut RewardContext<'_>,
    member: CombatantId,
    amount: u32,
    summary: &mut RewardSummary,
    events: &mut Vec<BattleEvent>,
) {
    let Some(combatant) = ctx.roster.get_mut(member) else {
        return;
    };
    let before = ctx.progress.get(&combatant.source_id);
    let (after, reached) = experience::accumulate(before, amount, ctx.config);
    ctx.progress.set(&combatant.source_id, after);

    events.push(BattleEvent::ExperienceAwarded {
        member,
        amount,
        level: after.level,
    });
    summary.shares.push(ExperienceShare {
        member,
        source_id: combatant.source_id.clone(),
        amount,
        level: after.level,
    });

    for &level in &reached {
        experience::grow_one_level(combatant, ctx.config);
        events.push(BattleEvent::LeveledUp {
            member,
            level,
            max_hp: combatant.stats.max_hp,
            max_mp: combatant.stats.max_mp,
        });
        summary.level_ups.push(LevelUp {
            member,
            source_id: combatant.source_id.clone(),
            level,
            max_hp: combatant.stats.max_hp,
            max_mp: combatant.stats.max_mp,
        });
    }
    if !reached.is_empty() {
        combatant.restore_to_full();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ContentCatalog, LootDrop, LootTable, PcgRng};
    use crate::state::{Bounty, Combatant, ItemId, MemberProgress, Role, StatBlock, tags};

    struct Fixture {
        roster: Roster,
        progress: PartyProgress,
        catalog: ContentCatalog,
        rng: PcgRng,
        stash: PartyStash,
        config: BattleConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let mut roster = Roster::new();
            roster.spawn(|id| {
                let mut hero = Combatant::new(id, "Hero", Role::Primary, StatBlock::new(30, 6, 18, 3, 5));
                hero.source_id = "hero".into();
                hero
            });
            roster.spawn(|id| {
                let mut ally = Combatant::new(id, "Rook", Role::Companion, StatBlock::new(25, 4, 7, 2, 4));
                ally.source_id = "rook".into();
                ally
            });
            roster.spawn(|id| {
                Combatant::new(id, "Wisp", Role::Summon { owner: CombatantId(0) }, StatBlock::new(5, 0, 2, 0, 9))
            });
            for (gold, exp) in [(6, 8), (5, 7)] {
                roster.spawn(|id| {
                    let mut enemy = Combatant::new(id, "Goblin", Role::Enemy, StatBlock::new(10, 0, 4, 1, 3));
                    enemy.tags = tags(["goblin"]);
                    enemy.bounty = Bounty { gold, exp };
                    enemy.with_resources(0, 0)
                });
            }
            Self {
                roster,
                progress: PartyProgress::new(),
                catalog: ContentCatalog::new(),
                rng: PcgRng::seeded(3),
                stash: PartyStash::new(),
                config: BattleConfig::default(),
            }
        }

        fn grant(&mut self) -> (RewardSummary, Vec<BattleEvent>) {
            let mut ctx = RewardContext {
                roster: &mut self.roster,
                progress: &mut self.progress,
                env: self.catalog.as_env(),
                rng: &mut self.rng,
                stash: &mut self.stash,
                config: &self.config,
            };
            grant_rewards(&mut ctx)
        }
    }

    #[test]
    fn gold_is_summed_and_experience_split_with_remainder_to_primary() {
        let mut fixture = Fixture::new();
        let (summary, events) = fixture.grant();

        assert_eq!(summary.gold, 11);
        assert_eq!(fixture.stash.gold, 11);
        assert_eq!(events[0], BattleEvent::GoldAwarded { amount: 11, total: 11 });
        let split: Vec<(&str, u32)> = summary
            .shares
            .iter()
            .map(|share| (share.source_id.as_str(), share.amount))
            .collect();
        assert_eq!(split, vec![("hero", 8), ("rook", 7)]);
        assert_eq!(fixture.progress.get("hero"), MemberProgress { level: 1, exp: 8 });
    }

    #[test]
    fn level_up_grows_maxima_and_refills() {
        let mut fixture = Fixture::new();
        fixture.progress = PartyProgress::new().with_member("hero", 1, 9);
        if let Some(hero) = fixture.roster.get_mut(CombatantId(0)) {
            hero.hp = 4;
        }
        let (summary, events) = fixture.grant();

        assert_eq!(summary.level_ups.len(), 1);
        assert!(events.contains(&BattleEvent::LeveledUp {
            member: CombatantId(0),
            level: 2,
            max_hp: 32,
            max_mp: 7,
        }));
        let hero = fixture.roster.get(CombatantId(0)).unwrap();
        assert_eq!((hero.hp, hero.stats.max_hp), (32, 32));
        assert_eq!(fixture.progress.get("hero"), MemberProgress { level: 2, exp: 7 });
    }

    #[test]
    fn multiple_level_ups_emit_one_event_each() {
        let mut fixture = Fixture::new();
        fixture.progress = PartyProgress::new().with_member("hero", 1, 24);
        let (_, events) = fixture.grant();
        let levels: Vec<(u32, u32)> = events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::LeveledUp { level, max_hp, .. } => Some((*level, *max_hp)),
                _ => None,
            })
            .collect();
        // 24 + 8 = 32 -> level 2 (22 left) -> level 3 (7 left)
        assert_eq!(levels, vec![(2, 32), (3, 34)]);
    }

    #[test]
    fn loot_rolls_after_experience() {
        let mut fixture = Fixture::new();
        fixture.catalog = ContentCatalog::new().with_loot_table(
            LootTable::new("goblins")
                .requiring(tags(["goblin"]))
                .with_drop(LootDrop::new("rusty_dagger", 100, 1, 1)),
        );
        let (summary, events) = fixture.grant();
        assert_eq!(summary.loot.len(), 2);
        assert!(matches!(events.last(), Some(BattleEvent::LootDropped { .. })));
        assert_eq!(fixture.stash.quantity(&ItemId::new("rusty_dagger")), 2);
    }

    #[test]
    fn party_mp_is_refilled_after_victory() {
        let mut fixture = Fixture::new();
        if let Some(rook) = fixture.roster.get_mut(CombatantId(1)) {
            rook.mp = 0;
        }
        fixture.grant();
        assert_eq!(fixture.roster.get(CombatantId(1)).map(|c| c.mp), Some(4));
    }
}
