use serde::{Deserialize, Serialize};
use std::fs;

use meltdown_engine::player::STARTING_BALANCE;
use meltdown_engine::rules::{self, DEFAULT_BET};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_balance: u64,
    pub bet: u64,
    pub seed: Option<u64>,
    pub auto_lock: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_balance: ValueSource,
    pub bet: ValueSource,
    pub seed: ValueSource,
    pub auto_lock: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_balance: ValueSource::Default,
            bet: ValueSource::Default,
            seed: ValueSource::Default,
            auto_lock: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            bet: DEFAULT_BET,
            seed: None,
            auto_lock: false,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Resolves configuration from the process environment.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

/// Resolves defaults, then the file named by `MELTDOWN_CONFIG`, then
/// `MELTDOWN_*` variables, reading variables through `var`.
pub fn load_from<F>(var: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = var("MELTDOWN_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_balance {
            cfg.starting_balance = v;
            sources.starting_balance = ValueSource::File;
        }
        if let Some(v) = f.bet {
            cfg.bet = v;
            sources.bet = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.auto_lock {
            cfg.auto_lock = v;
            sources.auto_lock = ValueSource::File;
        }
    }

    if let Some(balance) = var("MELTDOWN_BALANCE")
        && !balance.is_empty()
    {
        cfg.starting_balance = balance
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid balance".into()))?;
        sources.starting_balance = ValueSource::Env;
    }
    if let Some(bet) = var("MELTDOWN_BET")
        && !bet.is_empty()
    {
        cfg.bet = bet
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid bet".into()))?;
        sources.bet = ValueSource::Env;
    }
    if let Some(seed) = var("MELTDOWN_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(auto) = var("MELTDOWN_AUTO_LOCK")
        && !auto.is_empty()
    {
        cfg.auto_lock =
            parse_bool(&auto).ok_or_else(|| ConfigError::Invalid("Invalid auto_lock".into()))?;
        sources.auto_lock = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    starting_balance: Option<u64>,
    #[serde(default)]
    bet: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    auto_lock: Option<bool>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_balance == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_balance must be >0".into(),
        ));
    }
    if !rules::is_allowed_bet(cfg.bet) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: bet {} is not an allowed denomination",
            cfg.bet
        )));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let r = load_from(env(&[])).unwrap();
        assert_eq!(r.config, Config::default());
        assert_eq!(r.config.starting_balance, 1000);
        assert_eq!(r.config.bet, 10);
        assert_eq!(r.sources.bet, ValueSource::Default);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meltdown.toml");
        fs::write(&path, "starting_balance = 500\nbet = 50\nauto_lock = true\n").unwrap();
        let path = path.to_str().unwrap();

        let r = load_from(env(&[("MELTDOWN_CONFIG", path), ("MELTDOWN_BET", "5")])).unwrap();
        assert_eq!(r.config.starting_balance, 500);
        assert_eq!(r.sources.starting_balance, ValueSource::File);
        assert_eq!(r.config.bet, 5);
        assert_eq!(r.sources.bet, ValueSource::Env);
        assert!(r.config.auto_lock);
        assert_eq!(r.sources.auto_lock, ValueSource::File);
        assert_eq!(r.sources.seed, ValueSource::Default);
    }

    #[test]
    fn test_bool_spellings() {
        for (raw, want) in [("on", true), ("YES", true), ("0", false), ("off", false)] {
            let r = load_from(env(&[("MELTDOWN_AUTO_LOCK", raw)])).unwrap();
            assert_eq!(r.config.auto_lock, want, "{raw}");
        }
        assert!(load_from(env(&[("MELTDOWN_AUTO_LOCK", "maybe")])).is_err());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            load_from(env(&[("MELTDOWN_BET", "20")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load_from(env(&[("MELTDOWN_BALANCE", "0")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load_from(env(&[("MELTDOWN_SEED", "abc")])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_bad_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "bet = \"ten\"\n").unwrap();
        let r = load_from(env(&[("MELTDOWN_CONFIG", path.to_str().unwrap())]));
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let r = load_from(env(&[("MELTDOWN_CONFIG", "/nonexistent/meltdown.toml")]));
        assert!(matches!(r, Err(ConfigError::Io(_))));
    }
}
