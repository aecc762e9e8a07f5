use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line options for the terminal game.
#[derive(Debug, Clone, Parser)]
#[command(name = "gem_crossing", version, about = "Cross the lanes, dodge the bugs, collect gems")]
pub struct Cli {
    /// Seed for enemy and bonus spawns. Random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Milliseconds per frame.
    #[arg(
        long = "tick-ms",
        value_name = "MILLISECONDS",
        default_value_t = 16,
        value_parser = clap::value_parser!(u64).range(1..=1000)
    )]
    pub tick_ms: u64,
    /// Milliseconds between enemy spawns.
    #[arg(
        long = "enemy-interval-ms",
        value_name = "MILLISECONDS",
        default_value_t = 1500,
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    pub enemy_interval_ms: u64,
    /// Most enemies on the field at once.
    #[arg(long = "max-enemies", default_value_t = 6)]
    pub max_enemies: usize,
    /// Milliseconds between bonus spawns.
    #[arg(
        long = "bonus-interval-ms",
        value_name = "MILLISECONDS",
        default_value_t = 4000,
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    pub bonus_interval_ms: u64,
    /// Most bonuses on the field at once.
    #[arg(long = "max-bonuses", default_value_t = 3)]
    pub max_bonuses: usize,
    /// Chance that a spawned bonus is an extra life instead of a gem.
    #[arg(long = "life-chance", default_value_t = 0.2, value_parser = parse_probability)]
    pub life_chance: f64,
    /// File the log is written to.
    #[arg(long = "log-file", default_value = "gem_crossing.log")]
    pub log_file: PathBuf,
}

fn parse_probability(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not between 0 and 1"))
    }
}

/// Tunables for the world simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub seed: Option<u64>,
    pub tick: Duration,
    pub enemy_interval: Duration,
    pub max_enemies: usize,
    pub bonus_interval: Duration,
    pub max_bonuses: usize,
    pub life_chance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick: Duration::from_millis(16),
            enemy_interval: Duration::from_millis(1500),
            max_enemies: 6,
            bonus_interval: Duration::from_millis(4000),
            max_bonuses: 3,
            life_chance: 0.2,
        }
    }
}

impl From<&Cli> for GameConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            seed: cli.seed,
            tick: Duration::from_millis(cli.tick_ms),
            enemy_interval: Duration::from_millis(cli.enemy_interval_ms),
            max_enemies: cli.max_enemies,
            bonus_interval: Duration::from_millis(cli.bonus_interval_ms),
            max_bonuses: cli.max_bonuses,
            life_chance: cli.life_chance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_match_config_defaults() {
        let cli = Cli::parse_from(["gem_crossing"]);
        assert_eq!(GameConfig::from(&cli), GameConfig::default());
        assert_eq!(cli.log_file, PathBuf::from("gem_crossing.log"));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "gem_crossing",
            "--seed",
            "42",
            "--enemy-interval-ms",
            "500",
            "--life-chance",
            "1",
        ]);
        let config = GameConfig::from(&cli);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.enemy_interval, Duration::from_millis(500));
        assert_eq!(config.life_chance, 1.0);
    }

    #[test]
    fn test_cli_rejects_bad_probability() {
        assert!(Cli::try_parse_from(["gem_crossing", "--life-chance", "1.5"]).is_err());
        assert!(Cli::try_parse_from(["gem_crossing", "--tick-ms", "0"]).is_err());
    }
}
