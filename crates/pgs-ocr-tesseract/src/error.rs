use pgs_ocr_binding::{ResolutionError, SurfaceId};
use thiserror::Error;

/// Errors from the native OCR call layer. A caller seeing any of these
/// should treat OCR as unavailable for the current input, not abort.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("{surface} surface is not bound; run initialization first")]
    SurfaceUnbound { surface: SurfaceId },
    #[error(transparent)]
    Binding(#[from] ResolutionError),
    #[error("native call failed: {message}")]
    Backend { message: String },
}

impl OcrError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
