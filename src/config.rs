use grouping::GroupingConfig;
use std::env::var;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigErr {
    #[error("bad method variable: expected GROUPING_METHOD=random|balanced, got {0}")]
    BadMethod(String),
    #[error("bad number variable: expected {0} to be a non-negative integer, got {1}")]
    BadNumber(&'static str, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AssignMethod {
    /// Ignore preferences and deal students out at random
    Random,
    /// Keep mutual friends together
    Balanced,
}

impl AssignMethod {
    fn parse(value: &str) -> Result<Self, ConfigErr> {
        match value.to_lowercase().as_str() {
            "random" => Ok(AssignMethod::Random),
            "balanced" => Ok(AssignMethod::Balanced),
            _ => Err(ConfigErr::BadMethod(value.to_owned())),
        }
    }
}

/// Settings for one `classgroups` run
///
/// # Fields
/// - `method`: which entry point to run
/// - `grouping`: iteration budget and round-robin attempts handed to the engine
/// - `seed`: fixed random seed, or `None` for a fresh one each run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub method: AssignMethod,
    pub grouping: GroupingConfig,
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            method: AssignMethod::Balanced,
            grouping: GroupingConfig::default(),
            seed: None,
        }
    }
}

impl AppConfig {
    /// Reads `GROUPING_METHOD`, `GROUPING_ITERATIONS` and `GROUPING_SEED`
    /// from the environment. Unset variables keep their defaults.
    ///
    /// # Errors
    /// A variable that is set but can't be parsed returns a `ConfigErr`.
    pub fn from_env() -> Result<Self, ConfigErr> {
        Self::from_lookup(|key| var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigErr>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(method) = lookup("GROUPING_METHOD") {
            config.method = AssignMethod::parse(&method)?;
        }
        if let Some(iterations) = lookup("GROUPING_ITERATIONS") {
            config.grouping.iterations = parse_number("GROUPING_ITERATIONS", &iterations)?;
        }
        if let Some(seed) = lookup("GROUPING_SEED") {
            config.seed = Some(parse_number("GROUPING_SEED", &seed)?);
        }

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigErr> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigErr::BadNumber(key, value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let vars: HashMap<&'static str, String> = pairs
            .iter()
            .map(|(key, value)| (*key, value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.grouping.iterations, 300);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("GROUPING_METHOD", "Random"),
            ("GROUPING_ITERATIONS", "1000"),
            ("GROUPING_SEED", " 42 "),
        ]))
        .unwrap();

        assert_eq!(config.method, AssignMethod::Random);
        assert_eq!(config.grouping.iterations, 1000);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            AppConfig::from_lookup(lookup_from(&[("GROUPING_METHOD", "optimal")])),
            Err(ConfigErr::BadMethod(String::from("optimal")))
        );
        assert_eq!(
            AppConfig::from_lookup(lookup_from(&[("GROUPING_ITERATIONS", "-5")])),
            Err(ConfigErr::BadNumber("GROUPING_ITERATIONS", String::from("-5")))
        );
    }
}
