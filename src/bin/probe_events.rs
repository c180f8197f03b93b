//! Probe: Live Client Data endpoints
//!
//! Hits GET https://127.0.0.1:2999/liveclientdata/{activeplayername,playerlist,eventdata}
//! with a game running and documents:
//! - Response shape and fields per endpoint
//! - Team label values in the player list
//! - Event name distribution
//! - EventID uniqueness and growth across two polls (dedup field)

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use anyhow::Result;
use league_announcer::LIVE_CLIENT_API_BASE;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<()> {
    // Self-signed Riot cert on localhost.
    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .build()?;

    println!("=== Probe: Live Client Data ===");
    println!("Base: {}", LIVE_CLIENT_API_BASE);
    println!();

    // 1. Active player name
    println!("--- 1. activeplayername ---");
    let start = Instant::now();
    let resp = client
        .get(format!("{LIVE_CLIENT_API_BASE}/activeplayername"))
        .send()
        .await?;
    let latency = start.elapsed();
    let status = resp.status();
    let body = resp.text().await?;
    println!("Status: {}", status);
    println!("Latency: {:?}", latency);
    println!("Body: {}", body);
    println!();

    // 2. Player list
    println!("--- 2. playerlist ---");
    let start = Instant::now();
    let resp = client
        .get(format!("{LIVE_CLIENT_API_BASE}/playerlist"))
        .send()
        .await?;
    let latency = start.elapsed();
    let body: Value = resp.json().await?;
    println!("Latency: {:?}", latency);
    match body.as_array() {
        Some(arr) => {
            println!("Player count: {}", arr.len());
            if let Some(first) = arr.first() {
                println!("\nSample player (first):");
                println!("{}", serde_json::to_string_pretty(first)?);
                println!("\nFields present:");
                if let Some(obj) = first.as_object() {
                    for key in obj.keys() {
                        println!("  - {}", key);
                    }
                }
            }
            let mut teams: HashMap<String, usize> = HashMap::new();
            for player in arr {
                if let Some(team) = player.get("team").and_then(|v| v.as_str()) {
                    *teams.entry(team.to_string()).or_default() += 1;
                }
            }
            println!("\nTeam labels: {:?}", teams);
        }
        None => {
            println!("Response is not an array:");
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    println!();

    // 3. Event data
    println!("--- 3. eventdata ---");
    let start = Instant::now();
    let resp = client
        .get(format!("{LIVE_CLIENT_API_BASE}/eventdata"))
        .send()
        .await?;
    let latency = start.elapsed();
    let body: Value = resp.json().await?;
    println!("Latency: {:?}", latency);
    let events = body.get("Events").and_then(|v| v.as_array()).cloned();
    match &events {
        Some(arr) => {
            println!("Event count: {}", arr.len());
            if let Some(first) = arr.first() {
                println!("\nSample event (first):");
                println!("{}", serde_json::to_string_pretty(first)?);
            }
            let mut names: HashMap<String, usize> = HashMap::new();
            for event in arr {
                if let Some(name) = event.get("EventName").and_then(|v| v.as_str()) {
                    *names.entry(name.to_string()).or_default() += 1;
                }
            }
            println!("\nEvent names: {:?}", names);
        }
        None => {
            println!("Response has no Events array:");
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    println!();

    // 4. EventID uniqueness + growth across two polls
    println!("--- 4. EventID uniqueness across two polls ---");
    let first_ids = collect_event_ids(events.as_deref().unwrap_or(&[]));
    println!("  Poll 1: {} events, {} unique ids", events.as_ref().map_or(0, |a| a.len()), first_ids.len());

    tokio::time::sleep(Duration::from_secs(2)).await;
    let resp = client
        .get(format!("{LIVE_CLIENT_API_BASE}/eventdata"))
        .send()
        .await?;
    let body: Value = resp.json().await?;
    let second = body.get("Events").and_then(|v| v.as_array()).cloned().unwrap_or_default();
    let second_ids = collect_event_ids(&second);
    let overlap = first_ids.intersection(&second_ids).count();
    println!("  Poll 2: {} events, {} unique ids", second.len(), second_ids.len());
    println!("  Overlap with poll 1: {} (feed is cumulative)", overlap);
    println!(
        "  New since poll 1: {}",
        second_ids.difference(&first_ids).count()
    );
    println!();

    println!("=== Probe Complete ===");
    Ok(())
}

fn collect_event_ids(events: &[Value]) -> HashSet<u64> {
    events
        .iter()
        .filter_map(|e| e.get("EventID").and_then(|v| v.as_u64()))
        .collect()
}
