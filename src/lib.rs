//! Field-resolution stage of a store-agnostic query compiler.
//!
//! Turns the requested output shape of an abstract query (a tree of
//! [`FieldNode`]s) into a flat select list, the joins needed for to-one
//! relations, an alias mapping to rebuild nested results, and deferred
//! query plans for to-many relations. No database I/O happens here.

pub mod ast;
pub use ast::{FieldNode, FnDescriptor, JoinDescriptor};

pub mod clauses;

pub mod config;
pub use config::{AliasStrategy, ConverterConfig};

pub mod generators;
pub use generators::{AliasGenerator, ParameterIndexGenerator};

pub mod converter;
pub use converter::{
    convert_field_nodes, convert_field_nodes_with, AliasMapping, ConversionContext, ConversionError,
    FieldConversionResult, FieldConverter, NestedManyDescriptor, QueryGenerator, SubQuery,
};
