pub mod conversion_error;
pub use conversion_error::*;

pub mod conversion_context;
pub use conversion_context::*;

pub mod conversion_result;
pub use conversion_result::*;

pub mod join_resolver;
pub use join_resolver::*;

pub mod nested_many;
pub use nested_many::*;

pub mod field_converter;
pub use field_converter::*;
