// Typed errors for the label normalization core
use thiserror::Error;

/// Failures that must abort an aggregation run. Everything else in the
/// normalizer degrades to an unclassified identity instead of erroring,
/// because partial classification beats losing the row entirely.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A category label matched neither the alias table nor a canonical
    /// English label. The alias table is stale relative to upstream data;
    /// dropping the row would silently corrupt every aggregate total.
    #[error("unknown aircraft category \"{0}\"")]
    UnknownCategory(String),

    /// An Engines suffix was present but not integer-formatted. Upstream
    /// changed the label layout; nothing downstream can be trusted.
    #[error("bad engine count \"{value}\" in label \"{label}\"")]
    BadEngineCount { label: String, value: String },
}
