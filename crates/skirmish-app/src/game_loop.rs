//! Match loop: drives the arena engine and tallies what happened.
//!
//! `run_headless` ticks as fast as possible; `run_paced` sleeps between
//! ticks to hold the nominal tick rate, for watching logs live.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

use skirmish_core::commands::ArenaCommand;
use skirmish_core::constants::TICK_RATE;
use skirmish_core::events::AgentEvent;
use skirmish_core::state::{ArenaSnapshot, ScoreView};
use skirmish_sim::ArenaEngine;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Number of ticks covering `seconds` of match time.
pub fn ticks_for(seconds: f32) -> u64 {
    (seconds.max(0.0) * TICK_RATE as f32).round() as u64
}

/// Event tallies for one match.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchSummary {
    pub ticks: u64,
    pub shots: u32,
    pub bursts: u32,
    pub dodges: u32,
    pub unstucks: u32,
    pub kills: u32,
    pub powerups_collected: u32,
    pub map_regenerations: u32,
    pub score: ScoreView,
    /// Snapshot after the last tick.
    #[serde(skip)]
    pub final_snapshot: Option<ArenaSnapshot>,
}

impl MatchSummary {
    fn record(&mut self, snapshot: ArenaSnapshot) {
        self.ticks = snapshot.time.tick;
        for event in &snapshot.events {
            match event {
                AgentEvent::ShotFired { .. } => self.shots += 1,
                AgentEvent::BurstComplete { .. } => self.bursts += 1,
                AgentEvent::DodgeStarted { .. } => self.dodges += 1,
                AgentEvent::Unstuck { .. } => self.unstucks += 1,
                AgentEvent::AgentKilled { .. } => self.kills += 1,
                AgentEvent::PowerupCollected { .. } => self.powerups_collected += 1,
                AgentEvent::MapRegenerated { .. } => self.map_regenerations += 1,
                AgentEvent::IntentChanged { .. } | AgentEvent::DodgeEnded { .. } => {}
            }
        }
        self.score = snapshot.score.clone();
        self.final_snapshot = Some(snapshot);
    }
}

/// Start the match (if still in the lobby) and run `ticks` ticks.
pub fn run_headless(engine: &mut ArenaEngine, ticks: u64) -> MatchSummary {
    engine.queue_command(ArenaCommand::StartMatch);
    let mut summary = MatchSummary::default();
    for _ in 0..ticks {
        summary.record(engine.tick());
    }
    info!(
        ticks = summary.ticks,
        shots = summary.shots,
        kills = summary.kills,
        score = ?summary.score.kills,
        "match finished"
    );
    summary
}

/// Like [`run_headless`], but sleeps so that one tick takes
/// `TICK_DURATION / time_scale` of wall-clock time.
pub fn run_paced(engine: &mut ArenaEngine, ticks: u64, time_scale: f64) -> MatchSummary {
    engine.queue_command(ArenaCommand::StartMatch);
    let tick_duration = if time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    };

    let mut summary = MatchSummary::default();
    let mut next_tick_time = Instant::now();
    for _ in 0..ticks {
        summary.record(engine.tick());

        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
    summary
}
