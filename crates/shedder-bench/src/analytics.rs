use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::config::{AgentKind, BenchmarkConfig};
use crate::match_runner::GameOutcome;

const CONFIDENCE_LEVEL: f64 = 0.95;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("agent '{0}' appears in results but is missing from configuration")]
    UnknownAgent(String),
    #[error("normal distribution unavailable: {0}")]
    Distribution(String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Accumulates per-agent win counts and latency while games stream in.
pub struct AnalyticsCollector {
    run_id: String,
    agents: HashMap<String, AgentAccumulator>,
    agent_order: Vec<String>,
    games: usize,
    total_moves: usize,
    total_passes: usize,
}

impl AnalyticsCollector {
    pub fn new(config: &BenchmarkConfig) -> Self {
        let mut agents = HashMap::new();
        let mut order = Vec::new();
        for agent in &config.agents {
            agents.insert(agent.name.clone(), AgentAccumulator::new(agent.kind));
            order.push(agent.name.clone());
        }

        Self {
            run_id: config.run_id.clone(),
            agents,
            agent_order: order,
            games: 0,
            total_moves: 0,
            total_passes: 0,
        }
    }

    pub fn record_game(&mut self, outcome: &GameOutcome) -> Result<(), AnalyticsError> {
        self.games += 1;
        self.total_moves += outcome.moves;
        self.total_passes += outcome.passes;

        for seat in &outcome.seats {
            let acc = self
                .agents
                .get_mut(&seat.agent_name)
                .ok_or_else(|| AnalyticsError::UnknownAgent(seat.agent_name.clone()))?;
            acc.games += 1;
            acc.decisions += u64::from(seat.decisions);
            acc.total_ms += seat.avg_ms_per_decision * f64::from(seat.decisions);
            if seat.agent_name == outcome.winner {
                acc.wins += 1;
            }
            if seat.agent_name == outcome.starter {
                acc.starts += 1;
                if seat.agent_name == outcome.winner {
                    acc.wins_as_starter += 1;
                }
            }
        }
        Ok(())
    }

    pub fn finalize(self) -> Result<AnalyticsSummary, AnalyticsError> {
        let z = confidence_z(CONFIDENCE_LEVEL)?;
        let mut agents = Vec::with_capacity(self.agent_order.len());
        for name in &self.agent_order {
            let acc = self
                .agents
                .get(name)
                .ok_or_else(|| AnalyticsError::UnknownAgent(name.clone()))?;
            agents.push(acc.report(name, z));
        }

        let avg = |total: usize| {
            if self.games == 0 {
                0.0
            } else {
                total as f64 / self.games as f64
            }
        };

        Ok(AnalyticsSummary {
            run_id: self.run_id.clone(),
            games: self.games,
            avg_moves: avg(self.total_moves),
            avg_passes: avg(self.total_passes),
            agents,
        })
    }
}

struct AgentAccumulator {
    kind: AgentKind,
    games: usize,
    wins: usize,
    starts: usize,
    wins_as_starter: usize,
    decisions: u64,
    total_ms: f64,
}

impl AgentAccumulator {
    fn new(kind: AgentKind) -> Self {
        Self {
            kind,
            games: 0,
            wins: 0,
            starts: 0,
            wins_as_starter: 0,
            decisions: 0,
            total_ms: 0.0,
        }
    }

    fn report(&self, name: &str, z: f64) -> AgentReport {
        let win_rate = if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        };
        let average_ms_per_decision = if self.decisions == 0 {
            0.0
        } else {
            self.total_ms / self.decisions as f64
        };
        AgentReport {
            name: name.to_string(),
            kind: self.kind,
            games: self.games,
            wins: self.wins,
            win_rate,
            ci95: wilson_interval(self.wins, self.games, z),
            starts: self.starts,
            wins_as_starter: self.wins_as_starter,
            decisions: self.decisions,
            average_ms_per_decision,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    pub name: String,
    pub kind: AgentKind,
    pub games: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub ci95: (f64, f64),
    pub starts: usize,
    pub wins_as_starter: usize,
    pub decisions: u64,
    pub average_ms_per_decision: f64,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub run_id: String,
    pub games: usize,
    pub avg_moves: f64,
    pub avg_passes: f64,
    pub agents: Vec<AgentReport>,
}

impl AnalyticsSummary {
    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        fs::write(path.as_ref(), self.to_markdown()).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })
    }

    pub fn to_markdown(&self) -> String {
        let mut rows = String::new();
        rows.push_str("# Self-Play Summary\n\n");
        let _ = writeln!(
            rows,
            "Run `{}`: {} games, {:.1} moves and {:.1} passes per game on average\n",
            self.run_id, self.games, self.avg_moves, self.avg_passes
        );
        rows.push_str("| Agent | Kind | Games | Wins | Win % | 95% CI | Starts | Wins as starter | Avg ms/decision |\n");
        rows.push_str("|-------|------|-------|------|-------|--------|--------|-----------------|------------------|\n");

        for agent in &self.agents {
            let _ = writeln!(
                rows,
                "| {name} | {kind} | {games} | {wins} | {win:.1}% | [{lo:.1}%, {hi:.1}%] | {starts} | {starter_wins} | {latency:.3} |",
                name = agent.name,
                kind = agent.kind.as_str(),
                games = agent.games,
                wins = agent.wins,
                win = agent.win_rate * 100.0,
                lo = agent.ci95.0 * 100.0,
                hi = agent.ci95.1 * 100.0,
                starts = agent.starts,
                starter_wins = agent.wins_as_starter,
                latency = agent.average_ms_per_decision,
            );
        }

        rows
    }
}

/// Two-sided standard normal quantile for `level`, e.g. 1.96 at 0.95.
fn confidence_z(level: f64) -> Result<f64, AnalyticsError> {
    let normal =
        Normal::new(0.0, 1.0).map_err(|err| AnalyticsError::Distribution(err.to_string()))?;
    Ok(normal.inverse_cdf(0.5 + level / 2.0))
}

/// Wilson score interval for a binomial proportion.
fn wilson_interval(successes: usize, trials: usize, z: f64) -> (f64, f64) {
    if trials == 0 {
        return (0.0, 0.0);
    }
    let n = trials as f64;
    let p = successes as f64 / n;
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let centre = (p + z2 / (2.0 * n)) / denom;
    let margin = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denom;
    ((centre - margin).max(0.0), (centre + margin).min(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AgentConfig, AgentParams, GamesConfig, LoggingConfig, OutputsConfig};
    use crate::match_runner::SeatResult;

    fn config() -> BenchmarkConfig {
        BenchmarkConfig {
            run_id: "stats".to_string(),
            games: GamesConfig {
                seed: None,
                count: 4,
                max_moves: 400,
            },
            agents: vec![
                AgentConfig {
                    name: "risk".to_string(),
                    kind: AgentKind::Risk,
                    params: AgentParams::default(),
                },
                AgentConfig {
                    name: "greedy".to_string(),
                    kind: AgentKind::Greedy,
                    params: AgentParams::default(),
                },
            ],
            outputs: OutputsConfig {
                jsonl: "g.jsonl".to_string(),
                summary_md: "s.md".to_string(),
            },
            logging: LoggingConfig::default(),
        }
    }

    fn outcome(starter: &str, winner: &str) -> GameOutcome {
        let seat = |name: &str| SeatResult {
            agent_name: name.to_string(),
            decisions: 10,
            avg_ms_per_decision: 2.0,
        };
        GameOutcome {
            starter: starter.to_string(),
            winner: winner.to_string(),
            moves: 20,
            passes: 4,
            loser_cards_left: 3,
            seats: vec![seat("risk"), seat("greedy")],
        }
    }

    #[test]
    fn z_matches_the_usual_constant() {
        let z = confidence_z(0.95).expect("normal");
        assert!((z - 1.959_964).abs() < 1e-5);
    }

    #[test]
    fn wilson_interval_brackets_the_rate() {
        let (lo, hi) = wilson_interval(7, 10, 1.96);
        assert!(lo > 0.39 && lo < 0.40, "lo = {lo}");
        assert!(hi > 0.89 && hi < 0.90, "hi = {hi}");
        assert_eq!(wilson_interval(0, 0, 1.96), (0.0, 0.0));
        let (lo, hi) = wilson_interval(5, 5, 1.96);
        assert!(lo > 0.5);
        assert!(hi <= 1.0);
    }

    #[test]
    fn collector_counts_wins_and_starts() {
        let mut collector = AnalyticsCollector::new(&config());
        collector.record_game(&outcome("risk", "risk")).expect("g1");
        collector.record_game(&outcome("greedy", "risk")).expect("g2");
        collector.record_game(&outcome("greedy", "greedy")).expect("g3");
        let summary = collector.finalize().expect("summary");

        assert_eq!(summary.games, 3);
        assert_eq!(summary.avg_moves, 20.0);
        let risk = &summary.agents[0];
        assert_eq!(risk.name, "risk");
        assert_eq!(risk.wins, 2);
        assert_eq!(risk.starts, 1);
        assert_eq!(risk.wins_as_starter, 1);
        assert!((risk.win_rate - 2.0 / 3.0).abs() < 1e-12);
        assert!((risk.average_ms_per_decision - 2.0).abs() < 1e-12);
        assert_eq!(summary.agents[1].wins, 1);

        let markdown = summary.to_markdown();
        assert!(markdown.contains("| risk | risk | 3 | 2 | 66.7% |"));
        assert!(markdown.contains("| greedy | greedy | 3 | 1 | 33.3% |"));
    }

    #[test]
    fn unknown_agent_is_rejected() {
        let mut collector = AnalyticsCollector::new(&config());
        let mut game = outcome("risk", "risk");
        game.seats[1].agent_name = "stranger".to_string();
        let err = collector.record_game(&game).expect_err("unknown");
        assert!(matches!(err, AnalyticsError::UnknownAgent(name) if name == "stranger"));
    }
}
