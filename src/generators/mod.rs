pub mod parameter_index;
pub use parameter_index::*;

pub mod alias_generator;
pub use alias_generator::*;
