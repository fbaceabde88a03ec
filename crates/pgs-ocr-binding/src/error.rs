use thiserror::Error;

use crate::slots::SurfaceId;

/// Failures while constructing a synthesized contract.
#[derive(Debug, Error)]
pub enum ContractSynthesisError {
    #[error("contract '{contract}' declares operation '{operation}' more than once")]
    DuplicateOperation {
        contract: &'static str,
        operation: &'static str,
    },
    #[error("contract '{contract}' member '{member}' is not a valid identifier")]
    InvalidIdentifier {
        contract: &'static str,
        member: String,
    },
}

/// Failures while resolving a synthesized contract against an on-disk
/// library. Resolution is all-or-nothing: any variant means no binding
/// table was produced.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("native library '{name}' could not be located ({cause})")]
    LibraryNotFound { name: String, cause: String },
    #[error("library '{library}' does not export symbol '{symbol}'")]
    SymbolNotFound { library: String, symbol: String },
    #[error("operation '{operation}' cannot be bound: {reason}")]
    AbiMismatch { operation: String, reason: String },
    #[error("no library naming rule for platform '{os}'")]
    UnsupportedPlatform { os: &'static str },
}

/// First failure encountered while binding the native surfaces. Callers
/// should treat any value as "OCR unavailable" and degrade rather than
/// abort.
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("{surface} surface: {source}")]
    Synthesis {
        surface: SurfaceId,
        source: ContractSynthesisError,
    },
    #[error("{surface} surface: {source}")]
    Resolution {
        surface: SurfaceId,
        source: ResolutionError,
    },
}

impl BindingError {
    /// The surface whose binding failed.
    pub fn surface(&self) -> SurfaceId {
        match self {
            BindingError::Synthesis { surface, .. } => *surface,
            BindingError::Resolution { surface, .. } => *surface,
        }
    }
}
