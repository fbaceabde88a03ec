//! The Tesseract and Leptonica native surfaces, plus the typed call layer
//! that dispatches through the process-wide binding slots.

mod api;
mod error;
pub mod surface;

pub use api::{EngineApi, EngineHandle, ImageApi, PixHandle};
pub use error::OcrError;
pub use surface::{
    LEPTONICA, LEPTONICA_DEFAULT_LIBRARY, LEPTONICA_DEFAULT_VERSION, LEPTONICA_WINDOWS_LIBRARY,
    TESSERACT, TESSERACT_COMMON_LIBRARY, TESSERACT_WINDOWS_LIBRARY,
};
