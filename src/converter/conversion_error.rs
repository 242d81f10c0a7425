use thiserror::Error;

/// Reasons a field tree cannot be turned into a clause plan.
///
/// All of them describe malformed input or an exhausted resource; none is
/// retryable, and the whole conversion is abandoned when one is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("unsupported field node kind '{0}'")]
    UnsupportedNodeKind(String),

    #[error("unsupported relation kind '{relation}' on a {node} node")]
    UnsupportedRelationKind { node: String, relation: String },

    #[error("join from '{collection}' has {local} local field(s) but {foreign} foreign field(s)")]
    JoinArityMismatch { collection: String, local: usize, foreign: usize },

    #[error("could not generate a unique alias for '{seed}' after {attempts} attempt(s)")]
    AliasGenerationExhausted { seed: String, attempts: usize },

    #[error("relation nesting under '{collection}' exceeds the limit of {limit}")]
    DepthLimitExceeded { collection: String, limit: usize },

    #[error("expected {expected} correlation value(s), got {got}")]
    CorrelationArityMismatch { expected: usize, got: usize },

    #[error("malformed field node: {0}")]
    MalformedNode(String),

    #[error("{0}")]
    Config(String),
}
