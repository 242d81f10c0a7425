pub mod condition;
pub use condition::*;

pub mod select;
pub use select::*;

pub mod join;
pub use join::*;
