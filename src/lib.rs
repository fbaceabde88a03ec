//! Startup binding of the OCR pipeline's native surfaces.
//!
//! [`initialize`] resolves the Tesseract engine and Leptonica
//! image-processing libraries for the current platform and publishes their
//! binding tables into the process-wide slots. Downstream code then calls
//! through [`EngineApi`] and [`ImageApi`] as if they were static
//! interfaces. A failed initialization means "OCR unavailable": the caller
//! should skip OCR-based processing, not crash.

mod config;

pub use config::Configuration;
pub use pgs_ocr_binding::{
    BindingError, BindingTable, ContractSynthesisError, LibrarySpec, ResolutionError, SurfaceId,
    binding,
};
pub use pgs_ocr_tesseract::{EngineApi, EngineHandle, ImageApi, OcrError, PixHandle, surface};

use pgs_ocr_binding::bind_surface;
use pgs_ocr_tesseract::{
    LEPTONICA, LEPTONICA_DEFAULT_LIBRARY, LEPTONICA_DEFAULT_VERSION, LEPTONICA_WINDOWS_LIBRARY,
    TESSERACT, TESSERACT_COMMON_LIBRARY, TESSERACT_WINDOWS_LIBRARY,
};

/// Binds both native surfaces and publishes them into the global slots.
///
/// The engine surface is bound first; its failure short-circuits and the
/// image surface is not attempted. Empty `image_lib_name` /
/// `image_lib_version` fall back to the canonical Leptonica defaults.
/// Re-running replaces any previously bound tables. Not designed to be
/// called concurrently with itself.
pub fn initialize(
    engine_version: &str,
    image_lib_name: &str,
    image_lib_version: &str,
) -> Result<(), BindingError> {
    let engine_spec = LibrarySpec::new(
        TESSERACT_WINDOWS_LIBRARY,
        TESSERACT_COMMON_LIBRARY,
        engine_version,
    );
    bind_surface(SurfaceId::Engine, &TESSERACT, &engine_spec)?;

    let image_spec = LibrarySpec::new(
        LEPTONICA_WINDOWS_LIBRARY,
        image_lib_name,
        image_lib_version,
    )
    .with_defaults(LEPTONICA_DEFAULT_LIBRARY, LEPTONICA_DEFAULT_VERSION);
    bind_surface(SurfaceId::ImageProcessing, &LEPTONICA, &image_spec)?;

    Ok(())
}

/// [`initialize`] with settings taken from the environment.
pub fn initialize_from_env() -> Result<(), BindingError> {
    let config = Configuration::from_env();
    initialize(
        &config.engine_version,
        &config.image_library,
        &config.image_library_version,
    )
}
