pub mod alias_strategy;
pub use alias_strategy::*;

pub mod converter_config;
pub use converter_config::*;
