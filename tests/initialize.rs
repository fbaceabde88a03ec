use pgs_ocr::{BindingError, ResolutionError, SurfaceId, binding, initialize};

// These run on machines without the OCR libraries installed; the library
// names below are chosen so at least one surface can never resolve.

#[test]
fn initialize_without_native_libraries_degrades_cleanly() {
    let err = initialize("0.0-missing", "pgs_ocr_absent_image", "0").unwrap_err();
    match err {
        BindingError::Resolution {
            source: ResolutionError::LibraryNotFound { .. },
            ..
        } => {}
        other => panic!("unexpected initialization error: {other:?}"),
    }
    // Whichever surface failed, the image slot was never written: either the
    // engine failure short-circuited before it, or the image resolve itself
    // failed without publishing.
    assert!(binding(SurfaceId::ImageProcessing).is_none());
}

#[test]
fn initialization_can_be_retried() {
    let first = initialize("0.0-missing", "pgs_ocr_absent_image", "0");
    let second = initialize("0.0-missing", "pgs_ocr_absent_image", "0");
    assert!(first.is_err());
    assert!(second.is_err());
}
