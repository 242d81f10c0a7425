use std::collections::HashSet;

use tracing::{trace, warn};
use uuid::Uuid;

use crate::{config::{AliasStrategy, ConverterConfig}, converter::ConversionError};

/// Source of aliases that are unique within one conversion pass.
///
/// Returned aliases are opaque: callers may only rely on them being distinct.
pub trait AliasGenerator: Send {
    fn unique(&mut self, seed: &str) -> Result<String, ConversionError>;
}

/// Build the generator selected by `config.alias_strategy`.
pub fn alias_generator_for(config: &ConverterConfig) -> Box<dyn AliasGenerator> {
    match config.alias_strategy {
        AliasStrategy::Random => Box::new(RandomAliasGenerator::from_config(config)),
        AliasStrategy::Sequential => Box::new(SequentialAliasGenerator::new()),
    }
}

/// `<seed>_<n>` with one counter for the whole pass.
///
/// The counter is the last `_`-separated segment and never repeats, so two
/// aliases cannot be equal even when seeds themselves contain `_<digits>`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SequentialAliasGenerator {
    current: u64,
}

impl SequentialAliasGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AliasGenerator for SequentialAliasGenerator {
    fn unique(&mut self, seed: &str) -> Result<String, ConversionError> {
        self.current = self.current.checked_add(1)
            .ok_or_else(|| ConversionError::AliasGenerationExhausted {
                seed: seed.to_string(),
                attempts: 0,
            })?;

        let alias = format!("{}_{}", seed, self.current);
        trace!(seed, alias = %alias, "issued alias");
        Ok(alias)
    }
}

/// `<seed>_<random>` where the suffix is a slice of a UUID v4.
///
/// Issued aliases are remembered; a collision draws a new suffix up to
/// `retry_limit` times before failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomAliasGenerator {
    pub suffix_length: usize,
    pub retry_limit: usize,
    issued: HashSet<String>,
}

impl RandomAliasGenerator {
    pub fn new(suffix_length: usize, retry_limit: usize) -> Self {
        Self {
            suffix_length,
            retry_limit,
            issued: HashSet::new(),
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(config.suffix_length(), config.alias_retry_limit)
    }

    pub fn issued(&self) -> usize {
        self.issued.len()
    }

    fn suffix(&self) -> String {
        let mut suffix = Uuid::new_v4().simple().to_string();
        suffix.truncate(self.suffix_length);
        suffix
    }
}

impl AliasGenerator for RandomAliasGenerator {
    fn unique(&mut self, seed: &str) -> Result<String, ConversionError> {
        for attempt in 0..=self.retry_limit {
            let alias = format!("{}_{}", seed, self.suffix());
            if self.issued.insert(alias.clone()) {
                trace!(seed, alias = %alias, "issued alias");
                return Ok(alias);
            }
            warn!(seed, alias = %alias, attempt, "alias collision, drawing a new suffix");
        }

        Err(ConversionError::AliasGenerationExhausted {
            seed: seed.to_string(),
            attempts: self.retry_limit + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::{
        config::ConverterConfig,
        converter::ConversionError,
        generators::{alias_generator_for, AliasGenerator, RandomAliasGenerator, SequentialAliasGenerator},
    };

    #[test]
    fn test_sequential_aliases() {
        let mut generator = SequentialAliasGenerator::new();
        assert_eq!(generator.unique("title").unwrap(), "title_1");
        assert_eq!(generator.unique("title").unwrap(), "title_2");
        assert_eq!(generator.unique("month_date").unwrap(), "month_date_3");
    }

    #[test]
    fn test_sequential_seeds_ending_in_digits_do_not_collide() {
        let mut generator = SequentialAliasGenerator::new();
        let aliases: Vec<String> = ["a", "a_1", "a", "a_1_2"]
            .iter()
            .map(|seed| generator.unique(seed).unwrap())
            .collect();

        let distinct: HashSet<_> = aliases.iter().collect();
        assert_eq!(distinct.len(), aliases.len());
    }

    #[test]
    fn test_random_aliases_keep_seed_prefix() {
        let mut generator = RandomAliasGenerator::new(8, 4);
        let alias = generator.unique("users").unwrap();

        assert!(alias.starts_with("users_"));
        assert_eq!(alias.len(), "users_".len() + 8);
    }

    #[test]
    fn test_random_aliases_are_unique() {
        let mut generator = RandomAliasGenerator::new(8, 4);
        let aliases: HashSet<String> = (0..500).map(|_| generator.unique("id").unwrap()).collect();

        assert_eq!(aliases.len(), 500);
        assert_eq!(generator.issued(), 500);
    }

    #[test]
    fn test_random_namespace_exhaustion() {
        // one hex digit leaves sixteen possible aliases per seed
        let mut generator = RandomAliasGenerator::new(1, 10_000);
        for _ in 0..16 {
            generator.unique("id").unwrap();
        }

        assert_eq!(
            generator.unique("id"),
            Err(ConversionError::AliasGenerationExhausted { seed: "id".into(), attempts: 10_001 })
        );
        assert!(generator.unique("other").is_ok());
    }

    #[test]
    fn test_generator_follows_config() {
        let mut generator = alias_generator_for(&ConverterConfig::sequential());
        assert_eq!(generator.unique("x").unwrap(), "x_1");

        let mut generator = alias_generator_for(&ConverterConfig::random().with_alias_suffix_length(4));
        assert_eq!(generator.unique("x").unwrap().len(), "x_".len() + 4);
    }
}
