use std::collections::HashSet;

use anyhow::{Result, bail};

use crate::types::{Player, TeamSide};

/// Per-game context: local player identity, side, rosters, first-blood flag,
/// and the set of event ids already handed to the classifier.
///
/// Built once roster data is available, dropped when the telemetry source
/// goes away at game end.
#[derive(Debug)]
pub struct MatchSession {
    pub local_player: String,
    pub local_side: TeamSide,
    pub ally_roster: HashSet<String>,
    pub enemy_roster: HashSet<String>,
    pub first_blood: bool,
    seen_events: HashSet<u64>,
}

impl MatchSession {
    /// Partition the roster by team label and orient it around the local
    /// player.
    ///
    /// Fails on a roster entry with a team label outside the two-team
    /// schema, and on a local player that appears in neither partition.
    /// Both are fatal for the current game attempt.
    pub fn from_players(local_player: String, players: &[Player]) -> Result<Self> {
        let mut order: HashSet<String> = HashSet::new();
        let mut chaos: HashSet<String> = HashSet::new();

        for player in players {
            let side = match TeamSide::from_team(&player.team) {
                Some(side) => side,
                None => bail!(
                    "player {:?} has unknown team label {:?}",
                    player.summoner_name,
                    player.team
                ),
            };
            match side {
                TeamSide::Order => order.insert(player.summoner_name.clone()),
                TeamSide::Chaos => chaos.insert(player.summoner_name.clone()),
            };
        }

        let local_side = if order.contains(&local_player) {
            TeamSide::Order
        } else if chaos.contains(&local_player) {
            TeamSide::Chaos
        } else {
            bail!("local player {local_player:?} not found in either team roster");
        };

        let (ally_roster, enemy_roster) = match local_side {
            TeamSide::Order => (order, chaos),
            TeamSide::Chaos => (chaos, order),
        };

        Ok(Self {
            local_player,
            local_side,
            ally_roster,
            enemy_roster,
            first_blood: false,
            seen_events: HashSet::new(),
        })
    }

    /// Record an event id, returning `true` the first time it is seen.
    pub fn mark_seen(&mut self, event_id: u64) -> bool {
        self.seen_events.insert(event_id)
    }

    pub fn seen_count(&self) -> usize {
        self.seen_events.len()
    }
}
