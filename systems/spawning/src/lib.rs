#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave lifecycle scheduler responsible for emitting spawn commands.
//!
//! The scheduler moves through `Waiting` (grace countdown), `Spawning` (queue
//! draining at a wave-dependent cadence) and `InProgress` (queue empty, enemies
//! alive). Once the queue and the battlefield are both empty it emits
//! `Command::CompleteWave` and waits out the inter-wave grace period.

use std::collections::VecDeque;

use frontier_defence_core::{Command, EnemyKind};
use frontier_defence_system_wave_generation::{
    spawn_health, spawn_interval, WaveGeneration, FIRST_SPAWN_DELAY,
};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    seed: u64,
    inter_wave_grace: u32,
}

impl Config {
    /// Creates a configuration from the master seed and post-wave grace period.
    #[must_use]
    pub const fn new(seed: u64, inter_wave_grace: u32) -> Self {
        Self {
            seed,
            inter_wave_grace,
        }
    }
}

/// Phase of the wave lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WavePhase {
    /// The match has not started.
    Idle,
    /// Counting down to the next wave.
    Waiting {
        /// Ticks left before the wave begins.
        remaining: u32,
    },
    /// Spawning queued enemies.
    Spawning,
    /// Queue drained; waiting for the battlefield to clear.
    InProgress,
}

/// Scheduler that deterministically emits wave and spawn commands.
#[derive(Debug)]
pub struct Spawning {
    generator: WaveGeneration,
    inter_wave_grace: u32,
    phase: WavePhase,
    wave: u32,
    queue: VecDeque<EnemyKind>,
    spawn_timer: u32,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            generator: WaveGeneration::new(config.seed),
            inter_wave_grace: config.inter_wave_grace,
            phase: WavePhase::Idle,
            wave: 0,
            queue: VecDeque::new(),
            spawn_timer: 0,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Number of enemies still waiting to spawn.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Seeds the first grace countdown; ignored once the lifecycle is running.
    pub fn start(&mut self, grace: u32) {
        if self.phase == WavePhase::Idle {
            self.phase = WavePhase::Waiting { remaining: grace };
        }
    }

    /// Returns the scheduler to its pre-start state.
    pub fn reset(&mut self) {
        self.phase = WavePhase::Idle;
        self.wave = 0;
        self.queue.clear();
        self.spawn_timer = 0;
    }

    /// Advances the lifecycle by one tick.
    ///
    /// `wave` is the world's current wave number and `live_enemies` the number
    /// of enemies on the battlefield before this tick's spawns.
    pub fn handle(&mut self, wave: u32, live_enemies: usize, out: &mut Vec<Command>) {
        match self.phase {
            WavePhase::Idle => {}
            WavePhase::Waiting { remaining } => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.begin(wave, out);
                } else {
                    self.phase = WavePhase::Waiting { remaining };
                }
            }
            WavePhase::Spawning => {
                self.spawn_timer = self.spawn_timer.saturating_sub(1);
                if self.spawn_timer == 0 {
                    if let Some(kind) = self.queue.pop_front() {
                        out.push(Command::SpawnEnemy {
                            kind,
                            health: spawn_health(kind, self.wave),
                        });
                    }
                    self.spawn_timer = spawn_interval(self.wave);
                }
                if self.queue.is_empty() {
                    self.phase = WavePhase::InProgress;
                }
            }
            WavePhase::InProgress => {
                if live_enemies == 0 {
                    self.complete(out);
                }
            }
        }
    }

    /// Ends the running wave early and restarts the countdown.
    ///
    /// A wave that was spawning or in progress is completed so its payouts are
    /// made and the wave counter advances; the pending queue is discarded.
    pub fn skip(&mut self, grace: u32, out: &mut Vec<Command>) {
        match self.phase {
            WavePhase::Idle => return,
            WavePhase::Spawning | WavePhase::InProgress => {
                out.push(Command::CompleteWave { wave: self.wave });
            }
            WavePhase::Waiting { .. } => {}
        }
        self.queue.clear();
        self.spawn_timer = 0;
        self.phase = WavePhase::Waiting {
            remaining: grace.max(1),
        };
    }

    /// Builds the command mirroring the scheduler into the published snapshot.
    #[must_use]
    pub fn status(&self) -> Command {
        let (in_progress, countdown) = match self.phase {
            WavePhase::Idle => (false, 0),
            WavePhase::Waiting { remaining } => (false, remaining),
            WavePhase::Spawning | WavePhase::InProgress => (true, 0),
        };
        Command::SyncWaveStatus {
            queued: u32::try_from(self.queue.len()).unwrap_or(u32::MAX),
            in_progress,
            countdown,
        }
    }

    fn begin(&mut self, wave: u32, out: &mut Vec<Command>) {
        self.wave = wave;
        self.queue = self.generator.compose(wave).into();
        self.spawn_timer = FIRST_SPAWN_DELAY;
        self.phase = WavePhase::Spawning;
        out.push(Command::BeginWave { wave });
    }

    fn complete(&mut self, out: &mut Vec<Command>) {
        out.push(Command::CompleteWave { wave: self.wave });
        self.phase = WavePhase::Waiting {
            remaining: self.inter_wave_grace.max(1),
        };
    }
}
