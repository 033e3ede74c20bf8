use std::collections::BTreeMap;

use crate::action::targeting::{live_actor, live_target_on};
use crate::action::{ActionError, ActorRejection, ResolveContext};
use crate::env::{BattleEnv, KnowledgeEntry};
use crate::event::BattleEvent;
use crate::state::{Combatant, CombatantId, Roster, Side, TagSet};

const NO_KNOWLEDGE: &str = "I'm not sure about these foes.";

/// Asks a live ally what they know about the enemies still standing.
pub(crate) fn party_talk(
    ctx: &mut ResolveContext<'_>,
    actor: CombatantId,
    speaker: CombatantId,
) -> Result<Vec<BattleEvent>, ActionError> {
    if live_actor(ctx.roster, actor)?.side() != Side::Ally {
        return Err(ActionError::InvalidActor {
            actor,
            reason: ActorRejection::ActionUnavailable,
        });
    }
    let member = live_target_on(ctx.roster, actor, speaker, Side::Ally)?;
    let text = speaker_text(&ctx.env, member, ctx.roster);
    Ok(vec![BattleEvent::KnowledgeRevealed { speaker, text }])
}

/// What `speaker` would say if asked to talk now, without spending a turn.
///
/// Rejections name the speaker as both actor and target.
///
/// # Errors
///
/// Returns `ActionError::InvalidTarget` unless `speaker` is a live ally.
pub fn talk_preview(
    roster: &Roster,
    env: &BattleEnv<'_>,
    speaker: CombatantId,
) -> Result<String, ActionError> {
    let member = live_target_on(roster, speaker, speaker, Side::Ally)?;
    Ok(speaker_text(env, member, roster))
}

fn speaker_text(env: &BattleEnv<'_>, member: &Combatant, roster: &Roster) -> String {
    let entries = env
        .knowledge()
        .map(|oracle| oracle.entries(&member.source_id))
        .unwrap_or(&[]);
    knowledge_text(&member.name, entries, roster)
}

/// One line per live enemy group the speaker recognizes.
///
/// Groups are keyed by source id in sorted order and named after their first
/// live instance.
pub(crate) fn knowledge_text(speaker: &str, entries: &[KnowledgeEntry], roster: &Roster) -> String {
    let mut groups: BTreeMap<&str, (&str, &TagSet)> = BTreeMap::new();
    for enemy in roster.live(Side::Enemy) {
        groups
            .entry(enemy.source_id.as_str())
            .or_insert((enemy.name.as_str(), &enemy.tags));
    }

    let lines: Vec<String> = groups
        .values()
        .filter_map(|&(name, tags)| {
            let entry = entries.iter().find(|entry| entry.concerns(tags))?;
            let mut parts = vec![match entry.hp_hint {
                Some((low, high)) => format!("{} look to have around {}-{} HP.", name, low, high),
                None => format!("{}:", name),
            }];
            parts.extend(entry.speed_hint.clone());
            parts.extend(entry.behavior.clone());
            Some(parts.join(" "))
        })
        .collect();

    if lines.is_empty() {
        format!("{}: {}", speaker, NO_KNOWLEDGE)
    } else {
        format!("{}: {}", speaker, lines.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::fixtures::{BAT, HERO, MAGE, SLIME, arena};
    use crate::action::{ActionInput, TargetRejection};
    use crate::state::tags;

    fn talk(speaker: CombatantId) -> ActionInput {
        ActionInput::Talk { speaker }
    }

    #[test]
    fn speaker_without_entries_is_unsure() {
        let mut arena = arena();
        let before = arena.roster.clone();
        let resolution = arena.resolve(HERO, talk(MAGE)).unwrap();
        assert_eq!(
            resolution.events,
            vec![BattleEvent::KnowledgeRevealed {
                speaker: MAGE,
                text: "Mage: I'm not sure about these foes.".into(),
            }]
        );
        assert_eq!(arena.roster, before);
    }

    #[test]
    fn matching_entries_describe_groups_in_source_order() {
        let mut arena = arena();
        if let Some(mage) = arena.roster.get_mut(MAGE) {
            mage.source_id = "mage".into();
        }
        arena.catalog = std::mem::take(&mut arena.catalog)
            .with_knowledge(
                "mage",
                KnowledgeEntry::new(tags(["ooze"]))
                    .with_hp_hint(18, 22)
                    .with_behavior("They spit acid."),
            )
            .with_knowledge(
                "mage",
                KnowledgeEntry::new(tags(["flying"])).with_speed_hint("Quick on the wing."),
            );
        let resolution = arena.resolve(HERO, talk(MAGE)).unwrap();
        assert_eq!(
            resolution.events,
            vec![BattleEvent::KnowledgeRevealed {
                speaker: MAGE,
                text: "Mage: Bat: Quick on the wing. Slime look to have around 18-22 HP. \
                       They spit acid."
                    .into(),
            }]
        );
    }

    #[test]
    fn speaker_must_be_a_live_ally() {
        let mut arena = arena();
        let err = arena.resolve(HERO, talk(SLIME)).unwrap_err();
        assert!(matches!(
            err,
            ActionError::InvalidTarget {
                reason: TargetRejection::WrongSide,
                ..
            }
        ));
        assert!(arena.resolve(BAT, talk(MAGE)).is_err());
    }

    #[test]
    fn preview_matches_talk_without_mutation() {
        let mut arena = arena();
        let before = arena.roster.clone();
        let preview = talk_preview(&arena.roster, &arena.catalog.as_env(), MAGE).unwrap();
        assert_eq!(preview, "Mage: I'm not sure about these foes.");
        assert_eq!(arena.roster, before);

        let resolution = arena.resolve(HERO, talk(MAGE)).unwrap();
        assert_eq!(
            resolution.events,
            vec![BattleEvent::KnowledgeRevealed {
                speaker: MAGE,
                text: preview,
            }]
        );
    }

    #[test]
    fn preview_rejects_enemy_speakers() {
        let arena = arena();
        let err = talk_preview(&arena.roster, &arena.catalog.as_env(), SLIME).unwrap_err();
        assert!(matches!(
            err,
            ActionError::InvalidTarget {
                reason: TargetRejection::WrongSide,
                ..
            }
        ));
    }
}
