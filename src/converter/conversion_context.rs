use crate::{
    config::ConverterConfig,
    converter::ConversionError,
    generators::{alias_generator_for, AliasGenerator, ParameterIndexGenerator},
};

/// Mutable state shared by every node of one query compilation.
///
/// Holds the alias and parameter generators so that recursion into relations
/// keeps drawing from the same sequences. One context belongs to exactly one
/// top-level compilation; independent compilations build their own.
pub struct ConversionContext {
    /// source of unique table/column aliases
    pub aliases: Box<dyn AliasGenerator>,
    /// positional parameter slots
    pub parameters: ParameterIndexGenerator,
    pub config: ConverterConfig,
    /// current relation nesting, `0` at the root collection
    pub depth: usize,
}

impl ConversionContext {
    pub fn new(config: ConverterConfig) -> Self {
        Self::with_parameters(config, ParameterIndexGenerator::new())
    }

    pub fn with_parameters(config: ConverterConfig, parameters: ParameterIndexGenerator) -> Self {
        Self {
            aliases: alias_generator_for(&config),
            parameters,
            config,
            depth: 0,
        }
    }

    pub fn with_alias_generator(mut self, aliases: Box<dyn AliasGenerator>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Hand the parameter cursor back to the caller, e.g. for a following where-clause pass.
    pub fn into_parameters(self) -> ParameterIndexGenerator {
        self.parameters
    }

    pub fn unique_alias(&mut self, seed: &str) -> Result<String, ConversionError> {
        self.aliases.unique(seed)
    }

    /// Enter one level of relation nesting.
    pub fn descend(&mut self, collection: &str) -> Result<(), ConversionError> {
        if self.depth >= self.config.max_depth {
            return Err(ConversionError::DepthLimitExceeded {
                collection: collection.to_string(),
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl Default for ConversionContext {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl std::fmt::Debug for ConversionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionContext")
            .field("parameters", &self.parameters)
            .field("config", &self.config)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}
