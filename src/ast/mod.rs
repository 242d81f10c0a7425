pub mod fn_descriptor;
pub use fn_descriptor::*;

pub mod join_meta;
pub use join_meta::*;

pub mod field_node;
pub use field_node::*;
