//! Enumerates what an actor may legally do right now.
//!
//! Used by presentation layers to build prompts and by AI providers to pick
//! among valid options. Everything listed here resolves without a validation
//! error, except skills flagged as unaffordable.

use crate::action::eligible_skills;
use crate::env::{BattleEnv, ItemTargeting, TargetMode};
use crate::state::{Combatant, CombatantId, ItemId, PartyStash, Role, Roster, Side, SkillId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillOption {
    pub skill: SkillId,
    pub name: String,
    pub mp_cost: u32,
    /// False when the actor's MP is below the cost.
    pub affordable: bool,
    pub target_mode: TargetMode,
    /// Combatants the skill may be aimed at (the caster for self-only skills).
    pub targets: Vec<CombatantId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemOption {
    pub item: ItemId,
    pub name: String,
    pub quantity: u32,
    pub targets: Vec<CombatantId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegalActions {
    pub actor: CombatantId,
    pub attack_targets: Vec<CombatantId>,
    pub skills: Vec<SkillOption>,
    pub items: Vec<ItemOption>,
    pub talk_speakers: Vec<CombatantId>,
    pub can_flee: bool,
}

impl LegalActions {
    pub fn affordable_skills(&self) -> impl Iterator<Item = &SkillOption> {
        self.skills.iter().filter(|option| option.affordable)
    }
}

/// Lists the legal choices for `actor`. A missing or defeated actor has none.
pub fn legal_actions(
    roster: &Roster,
    env: &BattleEnv<'_>,
    stash: &PartyStash,
    actor: CombatantId,
) -> LegalActions {
    let Some(combatant) = roster.get(actor).filter(|c| c.is_alive()) else {
        return LegalActions {
            actor,
            ..LegalActions::default()
        };
    };
    let opponents: Vec<CombatantId> = roster
        .live(combatant.side().opponent())
        .map(|c| c.id)
        .collect();
    let is_ally = combatant.side() == Side::Ally;

    let skills = eligible_skills(combatant, env)
        .into_iter()
        .map(|skill| SkillOption {
            skill: skill.id.clone(),
            name: skill.name.clone(),
            mp_cost: skill.mp_cost,
            affordable: combatant.mp >= skill.mp_cost,
            target_mode: skill.target_mode,
            targets: match skill.target_mode {
                TargetMode::SelfOnly => vec![actor],
                TargetMode::SingleEnemy | TargetMode::MultiEnemy { .. } => opponents.clone(),
            },
        })
        .collect();

    let items = match env.items() {
        Ok(oracle) if is_ally => stash
            .battle_items(oracle)
            .into_iter()
            .map(|(item, quantity)| ItemOption {
                item: item.id.clone(),
                name: item.name.clone(),
                quantity,
                targets: item_targets(roster, combatant, item.targeting),
            })
            .filter(|option| !option.targets.is_empty())
            .collect(),
        _ => Vec::new(),
    };

    let talk_speakers = if is_ally {
        roster
            .live(Side::Ally)
            .filter(|c| c.role == Role::Companion)
            .map(|c| c.id)
            .collect()
    } else {
        Vec::new()
    };

    LegalActions {
        actor,
        attack_targets: opponents,
        skills,
        items,
        talk_speakers,
        can_flee: is_ally,
    }
}

fn item_targets(roster: &Roster, user: &Combatant, targeting: ItemTargeting) -> Vec<CombatantId> {
    match targeting {
        ItemTargeting::SelfOnly => vec![user.id],
        ItemTargeting::Ally => roster.live(user.side()).map(|c| c.id).collect(),
        ItemTargeting::Enemy => roster.live(user.side().opponent()).map(|c| c.id).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::fixtures::{BAT, HERO, MAGE, SLIME, arena};

    #[test]
    fn hero_sees_weapon_skills_items_and_talk() {
        let arena = arena();
        let env = arena.catalog.as_env();
        let legal = legal_actions(&arena.roster, &env, &arena.stash, HERO);

        assert_eq!(legal.attack_targets, vec![SLIME, BAT]);
        let skills: Vec<&str> = legal.skills.iter().map(|s| s.skill.as_str()).collect();
        assert_eq!(skills, vec!["slash", "sweep", "brace"]);
        let items: Vec<&str> = legal.items.iter().map(|i| i.item.as_str()).collect();
        assert_eq!(items, vec!["potion", "weaken_dust"]);
        assert_eq!(legal.items[0].targets, vec![HERO, MAGE]);
        assert_eq!(legal.talk_speakers, vec![MAGE]);
        assert!(legal.can_flee);
    }

    #[test]
    fn enemy_sees_declared_skills_only() {
        let arena = arena();
        let env = arena.catalog.as_env();
        let legal = legal_actions(&arena.roster, &env, &arena.stash, SLIME);

        assert_eq!(legal.attack_targets, vec![HERO, MAGE]);
        assert_eq!(legal.skills.len(), 1);
        assert_eq!(legal.skills[0].skill.as_str(), "spit");
        assert!(legal.items.is_empty());
        assert!(!legal.can_flee);
    }

    #[test]
    fn unaffordable_skills_are_listed_but_flagged() {
        let mut arena = arena();
        if let Some(hero) = arena.roster.get_mut(HERO) {
            hero.mp = 3;
        }
        let env = arena.catalog.as_env();
        let legal = legal_actions(&arena.roster, &env, &arena.stash, HERO);
        let affordable: Vec<&str> = legal.affordable_skills().map(|s| s.skill.as_str()).collect();
        assert_eq!(affordable, vec!["slash", "brace"]);
    }
}
