use anyhow::{Result, bail};
use tracing::{debug, info, warn};

use crate::session::MatchSession;
use crate::types::{Affiliation, Outcome, RawEvent, TeamSide};

/// Closed set of event kinds with classification rules.
///
/// Dispatch is a match over this enum rather than a runtime lookup table;
/// names outside the set are warned about and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    Passthrough,
    ChampionKill,
    Ace,
    ObjectiveKill,
    Structure,
}

impl EventKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "GameStart" | "MinionsSpawning" | "GameEnd" => Some(Self::Passthrough),
            "ChampionKill" => Some(Self::ChampionKill),
            "Ace" => Some(Self::Ace),
            "DragonKill" | "HeraldKill" | "BaronKill" => Some(Self::ObjectiveKill),
            "TurretKilled" | "InhibKilled" | "InhibRespawningSoon" | "InhibRespawned" => {
                Some(Self::Structure)
            }
            _ => None,
        }
    }
}

/// Classify one event against the current session.
///
/// Returns the labeled outcome, if any; session mutation (first-blood flag)
/// happens here and nowhere else. The sink is the caller's concern.
pub fn classify(event: &RawEvent, session: &mut MatchSession) -> Result<Option<Outcome>> {
    let kind = match EventKind::from_name(&event.event_name) {
        Some(kind) => kind,
        None => {
            warn!(
                "unrecognized event {:?} (id {}), ignoring",
                event.event_name, event.event_id
            );
            return Ok(None);
        }
    };

    match kind {
        EventKind::Passthrough => Ok(Some(Outcome::Passthrough(event.event_name.clone()))),
        EventKind::ChampionKill => champion_kill(event, session),
        EventKind::Ace => ace(event, session).map(Some),
        EventKind::ObjectiveKill => Ok(Some(objective_kill(event, session))),
        EventKind::Structure => Ok(Some(structure_event(event, session))),
    }
}

/// The first kill of the match is announced as first blood and nothing else;
/// afterwards only the local player's own death is announced.
fn champion_kill(event: &RawEvent, session: &mut MatchSession) -> Result<Option<Outcome>> {
    if !session.first_blood {
        session.first_blood = true;
        return Ok(Some(Outcome::FirstBlood));
    }
    let victim = match event.victim_name.as_deref() {
        Some(victim) => victim,
        None => bail!("ChampionKill event {} has no VictimName", event.event_id),
    };
    if victim == session.local_player {
        Ok(Some(Outcome::PlayerDeath))
    } else {
        Ok(None)
    }
}

/// Attribute a team wipe by mapping the acing team's label to a side.
fn ace(event: &RawEvent, session: &MatchSession) -> Result<Outcome> {
    let team = match event.acing_team.as_deref() {
        Some(team) => team,
        None => bail!("Ace event {} has no AcingTeam", event.event_id),
    };
    let side = match TeamSide::from_team(team) {
        Some(side) => side,
        None => bail!("Ace event {} has unknown acing team label {team:?}", event.event_id),
    };
    let affiliation = if side == session.local_side {
        Affiliation::Ally
    } else {
        Affiliation::Enemy
    };
    Ok(Outcome::Affiliated(affiliation, event.event_name.clone()))
}

/// Attribute an objective kill by killer-roster membership. A killer outside
/// the ally roster (including a missing or neutral killer) counts as enemy.
fn objective_kill(event: &RawEvent, session: &MatchSession) -> Outcome {
    let ally = event
        .killer_name
        .as_deref()
        .is_some_and(|killer| session.ally_roster.contains(killer));
    let affiliation = if ally { Affiliation::Ally } else { Affiliation::Enemy };
    Outcome::Affiliated(affiliation, event.event_name.clone())
}

/// Attribute a structure event by the side label embedded in the structure
/// name: our own label absent means the enemy's structure was hit.
fn structure_event(event: &RawEvent, session: &MatchSession) -> Outcome {
    let fields = event.structure_fields();
    let affiliation = if fields.contains(session.local_side.label()) {
        Affiliation::Enemy
    } else {
        Affiliation::Ally
    };
    Outcome::Affiliated(affiliation, event.event_name.clone())
}

/// Run a fetched batch through the classifier, skipping ids already seen.
///
/// Each new id is marked seen *before* classification, so a failing event is
/// never retried on the next poll. A per-event failure is logged and does not
/// affect the rest of the batch.
pub fn process_new_events<'a>(
    events: &'a [RawEvent],
    session: &mut MatchSession,
) -> Vec<(&'a RawEvent, Outcome)> {
    let mut outcomes = Vec::new();
    for event in events {
        if !session.mark_seen(event.event_id) {
            continue;
        }
        info!("processing event {} ({})", event.event_id, event.event_name);
        debug!(?event);
        match classify(event, session) {
            Ok(Some(outcome)) => outcomes.push((event, outcome)),
            Ok(None) => {}
            Err(e) => warn!("event {}: classification failed: {e:#}", event.event_id),
        }
    }
    outcomes
}
