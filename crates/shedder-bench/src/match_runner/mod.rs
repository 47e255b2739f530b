mod game;

pub use game::{GameError, MoveRecord, Table};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use shedder_bot::bot::{BotFeatures, BotParams};
use shedder_bot::policy::{GreedyPolicy, Policy, ShedderAi, TieBreaker};
use shedder_core::model::player::PlayerId;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, AnalyticsError};
use crate::config::{AgentConfig, AgentKind, AgentParams, BenchmarkConfig, ResolvedOutputs};

/// Plays the configured number of seeded games between the two agents.
pub struct MatchRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    agents: [AgentBlueprint; 2],
    logging_enabled: bool,
    bot_features: BotFeatures,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub games_played: usize,
    pub rows_written: usize,
    pub wins: Vec<(String, usize)>,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

impl MatchRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let agents = match config.agents.as_slice() {
            [first, second] => [
                AgentBlueprint::from_config(first),
                AgentBlueprint::from_config(second),
            ],
            other => return Err(RunnerError::SeatCount { found: other.len() }),
        };

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            agents,
            bot_features: BotFeatures::from_env(),
        })
    }

    /// Execute every game, streaming one JSONL row per game to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut analytics = AnalyticsCollector::new(&self.config);
        let mut rows_written = 0usize;

        for game_index in 0..self.config.games.count {
            let deal_seed = rng.next_u64();
            let outcome = self.play_game(game_index, deal_seed)?;
            analytics.record_game(&outcome)?;

            let row = GameLogRow::new(&self.config.run_id, game_index, deal_seed, &outcome);
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;
        }

        writer.flush()?;

        let summary = analytics.finalize()?;
        summary.write_markdown(&self.outputs.summary_md)?;

        Ok(RunSummary {
            games_played: self.config.games.count,
            rows_written,
            wins: summary
                .agents
                .iter()
                .map(|agent| (agent.name.clone(), agent.wins))
                .collect(),
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        })
    }

    /// One game from a fresh deal. Each agent sees the game from its own
    /// seat: it is `PlayerId::Ai` in its own history and snapshots.
    pub fn play_game(&self, game_index: usize, deal_seed: u64) -> Result<GameOutcome, RunnerError> {
        let mut deal_rng = StdRng::seed_from_u64(deal_seed);
        let mut table = Table::deal(&mut deal_rng);
        let starter = table.turn();
        let mut seats = [
            SeatState::new(&self.agents[0], self.bot_features, deal_seed),
            SeatState::new(&self.agents[1], self.bot_features, deal_seed),
        ];

        while !table.is_finished() {
            if table.moves() >= self.config.games.max_moves {
                return Err(RunnerError::MoveBudget {
                    game_index,
                    max_moves: self.config.games.max_moves,
                });
            }

            let player = table.turn();
            let snapshot = table.snapshot_for(player);
            let seat = &mut seats[player.index()];
            let start = Instant::now();
            let combination = seat.policy.decide(&snapshot);
            let elapsed_ms = seat.metrics.record(start.elapsed());

            if self.logging_enabled && tracing::enabled!(target: "shedder_bench::play", Level::INFO) {
                event!(
                    target: "shedder_bench::play",
                    Level::INFO,
                    run_id = %self.config.run_id,
                    game_index = game_index as u64,
                    agent = %seat.agent_name,
                    table = %snapshot.table,
                    combination = %combination,
                    cards_left = snapshot.own_hand.len() as u64,
                    elapsed_ms
                );
            }

            let record = table
                .apply(combination)
                .map_err(|source| RunnerError::Game { game_index, source })?;

            for (index, seat) in seats.iter_mut().enumerate() {
                let perspective = if record.player.index() == index {
                    PlayerId::Ai
                } else {
                    PlayerId::Opponent
                };
                seat.policy.record_play(&record.combination, perspective);
            }
        }

        let winner = table.winner().ok_or(RunnerError::Unfinished { game_index })?;
        let [first, second] = seats;
        let seats = [first.finish(), second.finish()];
        Ok(GameOutcome {
            starter: seats[starter.index()].agent_name.clone(),
            winner: seats[winner.index()].agent_name.clone(),
            moves: table.moves(),
            passes: table.passes(),
            loser_cards_left: table.hand(winner.other()).len(),
            seats: seats.to_vec(),
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Result of one finished game.
#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub starter: String,
    pub winner: String,
    pub moves: usize,
    pub passes: usize,
    pub loser_cards_left: usize,
    pub seats: Vec<SeatResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatResult {
    pub agent_name: String,
    pub decisions: u32,
    pub avg_ms_per_decision: f64,
}

struct SeatState {
    agent_name: String,
    policy: Box<dyn Policy>,
    metrics: DecisionMetrics,
}

impl SeatState {
    fn new(agent: &AgentBlueprint, features: BotFeatures, deal_seed: u64) -> Self {
        Self {
            agent_name: agent.name.clone(),
            policy: agent.spawn_policy(features, deal_seed),
            metrics: DecisionMetrics::default(),
        }
    }

    fn finish(self) -> SeatResult {
        let (decisions, avg_ms_per_decision) = self.metrics.finalize();
        SeatResult {
            agent_name: self.agent_name,
            decisions,
            avg_ms_per_decision,
        }
    }
}

#[derive(Default)]
struct DecisionMetrics {
    total: Duration,
    decisions: u32,
}

impl DecisionMetrics {
    fn record(&mut self, duration: Duration) -> f64 {
        self.total += duration;
        self.decisions += 1;
        duration.as_secs_f64() * 1000.0
    }

    fn finalize(self) -> (u32, f64) {
        let avg_ms = if self.decisions == 0 {
            0.0
        } else {
            self.total.as_secs_f64() * 1000.0 / f64::from(self.decisions)
        };
        (self.decisions, avg_ms)
    }
}

#[derive(Serialize)]
struct GameLogRow<'a> {
    run_id: &'a str,
    game_index: usize,
    deal_seed: u64,
    starter: &'a str,
    winner: &'a str,
    moves: usize,
    passes: usize,
    loser_cards_left: usize,
    latency: &'a [SeatResult],
}

impl<'a> GameLogRow<'a> {
    fn new(run_id: &'a str, game_index: usize, deal_seed: u64, outcome: &'a GameOutcome) -> Self {
        Self {
            run_id,
            game_index,
            deal_seed,
            starter: &outcome.starter,
            winner: &outcome.winner,
            moves: outcome.moves,
            passes: outcome.passes,
            loser_cards_left: outcome.loser_cards_left,
            latency: &outcome.seats,
        }
    }
}

struct AgentBlueprint {
    name: String,
    kind: AgentKind,
    params: AgentParams,
}

impl AgentBlueprint {
    fn from_config(config: &AgentConfig) -> Self {
        Self {
            name: config.name.clone(),
            kind: config.kind,
            params: config.params.clone(),
        }
    }

    /// Without an explicit `tie_seed` the deal seed drives tie-breaking, so a
    /// run is reproducible from `games.seed` alone.
    fn spawn_policy(&self, features: BotFeatures, deal_seed: u64) -> Box<dyn Policy> {
        match self.kind {
            AgentKind::Greedy => Box::new(GreedyPolicy::new()),
            AgentKind::Risk => {
                let features = match self.params.probability_cache {
                    Some(enabled) => features.with_probability_cache(enabled),
                    None => features,
                };
                let ties = TieBreaker::from_seed(self.params.tie_seed.unwrap_or(deal_seed));
                Box::new(ShedderAi::with_config(
                    BotParams::default(),
                    features,
                    ties,
                ))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game {game_index}: {source}")]
    Game {
        game_index: usize,
        #[source]
        source: GameError,
    },
    #[error("game {game_index} exceeded the budget of {max_moves} moves")]
    MoveBudget { game_index: usize, max_moves: usize },
    #[error("game {game_index} stopped without a winner")]
    Unfinished { game_index: usize },
    #[error("configuration requires exactly 2 agents but found {found}")]
    SeatCount { found: usize },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}
