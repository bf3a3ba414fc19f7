use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use ledger_election::ElectionConfig;
use ledger_modules_api::default_context::DefaultContext;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Runner configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunnerConfig {
    /// JSON file holding the calls to apply, relative to the config file.
    pub batch_path: PathBuf,
    /// Print the events of accepted calls.
    #[serde(default)]
    pub print_events: bool,
}

/// Ledger configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LedgerConfig {
    /// Runner configuration.
    pub runner: RunnerConfig,
    /// Genesis state of the election module.
    #[serde(default)]
    pub genesis: ElectionConfig<DefaultContext>,
}

impl LedgerConfig {
    /// The batch file, resolved against the directory of the config file.
    pub fn batch_path(&self, config_path: &Path) -> PathBuf {
        match config_path.parent() {
            Some(dir) if self.runner.batch_path.is_relative() => dir.join(&self.runner.batch_path),
            _ => self.runner.batch_path.clone(),
        }
    }
}

/// Reads a TOML file into `R`.
pub fn from_toml_path<P: AsRef<Path>, R: DeserializeOwned>(path: P) -> anyhow::Result<R> {
    let mut contents = String::new();
    {
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;
    }

    let result: R = toml::from_str(&contents)?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::str::FromStr;

    use ledger_election::{ElectionName, GenesisElection};
    use ledger_modules_api::utils::generate_address;
    use tempfile::NamedTempFile;

    use super::*;

    fn create_config_from(content: &str) -> NamedTempFile {
        let mut config_file = NamedTempFile::new().unwrap();
        config_file.write_all(content.as_bytes()).unwrap();
        config_file
    }

    #[test]
    fn test_correct_config() {
        let config = r#"
            [runner]
            batch_path = "/tmp/calls.json"
            print_events = true
            [genesis]
            timestamp = 1000
            [[genesis.elections]]
            creator = "vote1h34lmpywh4upnjdg90cjf4j70aee6z8qqfspugamjp42e4q28kqsgrysp0"
            name = "council"
            proposal = "Elect the council"
            registration_offset = 10
            voting_offset = 20
            ending_offset = 30
        "#;

        let config_file = create_config_from(config);

        let config: LedgerConfig = from_toml_path(config_file.path()).unwrap();
        let expected = LedgerConfig {
            runner: RunnerConfig {
                batch_path: PathBuf::from("/tmp/calls.json"),
                print_events: true,
            },
            genesis: ElectionConfig {
                timestamp: 1000,
                elections: vec![GenesisElection {
                    creator: generate_address::<DefaultContext>("creator"),
                    name: ElectionName::from_str("council").unwrap(),
                    proposal: "Elect the council".to_string(),
                    registration_offset: 10,
                    voting_offset: 20,
                    ending_offset: 30,
                }],
            },
        };
        assert_eq!(config, expected);
    }

    #[test]
    fn test_genesis_is_optional() {
        let config_file = create_config_from(
            r#"
            [runner]
            batch_path = "calls.json"
        "#,
        );

        let config: LedgerConfig = from_toml_path(config_file.path()).unwrap();
        assert!(!config.runner.print_events);
        assert_eq!(config.genesis, ElectionConfig::default());
        assert_eq!(
            config.batch_path(Path::new("/etc/ledger/config.toml")),
            PathBuf::from("/etc/ledger/calls.json")
        );
    }

    #[test]
    fn test_long_election_name_is_rejected() {
        let config_file = create_config_from(
            r#"
            [runner]
            batch_path = "calls.json"
            [[genesis.elections]]
            creator = "vote1h34lmpywh4upnjdg90cjf4j70aee6z8qqfspugamjp42e4q28kqsgrysp0"
            name = "a name that is far too long to fit in 32 bytes"
            proposal = ""
            registration_offset = 10
            voting_offset = 20
            ending_offset = 30
        "#,
        );

        assert!(from_toml_path::<_, LedgerConfig>(config_file.path()).is_err());
    }
}
