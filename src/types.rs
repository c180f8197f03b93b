use std::fmt;

use serde::{Deserialize, Serialize};

/// One roster entry from the `playerlist` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub summoner_name: String,
    /// Wire team label: `"ORDER"` or `"CHAOS"`.
    pub team: String,
}

/// Envelope returned by the `eventdata` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EventList {
    #[serde(rename = "Events")]
    pub events: Vec<RawEvent>,
}

/// One entry of the live event feed.
///
/// Only `EventID` and `EventName` are guaranteed; the rest are present or
/// absent depending on the event kind, so everything else is optional and
/// defaulted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawEvent {
    #[serde(rename = "EventID")]
    pub event_id: u64,
    pub event_name: String,
    #[serde(default)]
    pub event_time: Option<f64>,
    #[serde(default)]
    pub killer_name: Option<String>,
    #[serde(default)]
    pub victim_name: Option<String>,
    #[serde(default)]
    pub acing_team: Option<String>,
    #[serde(default)]
    pub turret_killed: Option<String>,
    #[serde(default)]
    pub inhib_killed: Option<String>,
    #[serde(default)]
    pub inhib_respawning_soon: Option<String>,
    #[serde(default)]
    pub inhib_respawned: Option<String>,
}

impl RawEvent {
    /// Structure-identifying fields concatenated in wire order.
    ///
    /// Structure names embed the owning side label (`Turret_T2_L_03_A`,
    /// `Barracks_T1_L1`), so side attribution is a substring check against
    /// this string.
    pub fn structure_fields(&self) -> String {
        [
            &self.turret_killed,
            &self.inhib_killed,
            &self.inhib_respawning_soon,
            &self.inhib_respawned,
        ]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .collect()
    }
}

/// Which of the two teams the local player is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSide {
    Order,
    Chaos,
}

impl TeamSide {
    /// Map a wire team label to a side. `None` for anything outside the
    /// known two-team schema.
    pub fn from_team(team: &str) -> Option<Self> {
        match team {
            "ORDER" => Some(Self::Order),
            "CHAOS" => Some(Self::Chaos),
            _ => None,
        }
    }

    /// Player-facing side label as it appears inside structure names.
    pub fn label(self) -> &'static str {
        match self {
            Self::Order => "T1",
            Self::Chaos => "T2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affiliation {
    Ally,
    Enemy,
}

impl Affiliation {
    fn prefix(self) -> &'static str {
        match self {
            Self::Ally => "ally",
            Self::Enemy => "enemy",
        }
    }
}

/// Labeled outcome of classifying one event.
///
/// Rendered via `Display` into the string handed to the announcement sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Event name forwarded verbatim (game start, minions, game end).
    Passthrough(String),
    /// Event name prefixed with the affected side.
    Affiliated(Affiliation, String),
    FirstBlood,
    PlayerDeath,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passthrough(name) => f.write_str(name),
            Self::Affiliated(side, name) => write!(f, "{}_{name}", side.prefix()),
            Self::FirstBlood => f.write_str("first_blood"),
            Self::PlayerDeath => f.write_str("player_death"),
        }
    }
}

/// Record emitted to the announcement sink, one per classified event.
#[derive(Debug, Clone, Serialize)]
pub struct Announcement {
    pub timestamp: String,
    pub event_id: u64,
    pub event_name: String,
    /// The labeled outcome string (`ally_DragonKill`, `first_blood`, ...).
    pub outcome: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_list_envelope_parses() {
        let list: EventList = serde_json::from_value(json!({
            "Events": [
                {"EventID": 0, "EventName": "GameStart", "EventTime": 0.05},
                {
                    "EventID": 7,
                    "EventName": "DragonKill",
                    "EventTime": 512.3,
                    "DragonType": "Earth",
                    "Stolen": "False",
                    "KillerName": "Amy",
                    "Assisters": []
                }
            ]
        }))
        .expect("valid event list JSON");
        assert_eq!(list.events.len(), 2);
        assert_eq!(list.events[0].event_name, "GameStart");
        assert_eq!(list.events[1].event_id, 7);
        assert_eq!(list.events[1].killer_name.as_deref(), Some("Amy"));
        assert!(list.events[1].victim_name.is_none());
    }

    #[test]
    fn structure_fields_concatenates_present_only() {
        let event: RawEvent = serde_json::from_value(json!({
            "EventID": 12,
            "EventName": "TurretKilled",
            "TurretKilled": "Turret_T2_L_03_A",
            "KillerName": "Amy"
        }))
        .expect("valid event JSON");
        assert_eq!(event.structure_fields(), "Turret_T2_L_03_A");
    }

    #[test]
    fn team_side_mapping() {
        assert_eq!(TeamSide::from_team("ORDER"), Some(TeamSide::Order));
        assert_eq!(TeamSide::from_team("CHAOS"), Some(TeamSide::Chaos));
        assert_eq!(TeamSide::from_team("NEUTRAL"), None);
        assert_eq!(TeamSide::Order.label(), "T1");
        assert_eq!(TeamSide::Chaos.label(), "T2");
    }

    #[test]
    fn outcome_rendering() {
        assert_eq!(Outcome::Passthrough("GameStart".into()).to_string(), "GameStart");
        assert_eq!(
            Outcome::Affiliated(Affiliation::Ally, "DragonKill".into()).to_string(),
            "ally_DragonKill"
        );
        assert_eq!(
            Outcome::Affiliated(Affiliation::Enemy, "Ace".into()).to_string(),
            "enemy_Ace"
        );
        assert_eq!(Outcome::FirstBlood.to_string(), "first_blood");
        assert_eq!(Outcome::PlayerDeath.to_string(), "player_death");
    }
}
