use anyhow::Result;
use reqwest::Client;
use tracing::debug;

use crate::types::{EventList, Player, RawEvent};

/// Typed client for the three Live Client Data resources.
///
/// The game client serves a self-signed certificate on localhost, so
/// certificate verification is disabled. No per-request timeout is applied.
/// A refused connection is meaningful to callers, so every fetch returns the
/// raw `reqwest::Error` for `is_connect()` branching.
pub struct LiveClientApi {
    client: Client,
    base_url: String,
}

impl LiveClientApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().danger_accept_invalid_certs(true).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch the local player's summoner name.
    ///
    /// A non-200 surfaces as a status error: the client is up but has no
    /// game data to serve yet.
    pub async fn active_player_name(&self) -> Result<String, reqwest::Error> {
        let name: String = self
            .client
            .get(format!("{}/activeplayername", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(name)
    }

    /// Fetch the full roster for the running game.
    pub async fn player_list(&self) -> Result<Vec<Player>, reqwest::Error> {
        let players: Vec<Player> = self
            .client
            .get(format!("{}/playerlist", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("fetched {} roster entries", players.len());
        Ok(players)
    }

    /// Fetch the cumulative event list.
    ///
    /// A connection error here while a game is active is the end-of-game
    /// signal.
    pub async fn event_list(&self) -> Result<Vec<RawEvent>, reqwest::Error> {
        let list: EventList = self
            .client
            .get(format!("{}/eventdata", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("fetched {} events", list.events.len());
        Ok(list.events)
    }
}
