//! Reference contracts for the two native surfaces the pipeline binds.
//!
//! The operation set mirrors the Tesseract base C API and the Leptonica
//! calls the image path needs. Entry-point names are the exported symbol
//! names of the respective libraries.

use pgs_ocr_binding::{NativeImport, OperationDecl, ReferenceContract};
use pgs_ocr_binding::ValueKind::{Boolean, CString, Int32, Pointer, Uint64, Void};

/// Windows builds of the engine ship as `tesseract53.dll`.
pub const TESSERACT_WINDOWS_LIBRARY: &str = "tesseract53";
pub const TESSERACT_COMMON_LIBRARY: &str = "tesseract";

/// Windows builds of Leptonica ship under the fully versioned name.
pub const LEPTONICA_WINDOWS_LIBRARY: &str = "leptonica-1.83.1";
/// Canonical short name substituted when the caller leaves the image
/// library unspecified.
pub const LEPTONICA_DEFAULT_LIBRARY: &str = "lept";
/// Major version substituted when the caller leaves the version empty.
pub const LEPTONICA_DEFAULT_VERSION: &str = "5";

/// Abstract surface of the Tesseract recognition engine.
pub const TESSERACT: ReferenceContract = ReferenceContract {
    name: "TessApi",
    operations: &[
        OperationDecl {
            name: "version",
            params: &[],
            ret: CString,
            native: Some(NativeImport {
                entry_point: "TessVersion",
            }),
        },
        OperationDecl {
            name: "create",
            params: &[],
            ret: Pointer,
            native: Some(NativeImport {
                entry_point: "TessBaseAPICreate",
            }),
        },
        OperationDecl {
            name: "delete",
            params: &[Pointer],
            ret: Void,
            native: Some(NativeImport {
                entry_point: "TessBaseAPIDelete",
            }),
        },
        OperationDecl {
            name: "init",
            params: &[Pointer, CString, CString],
            ret: Int32,
            native: Some(NativeImport {
                entry_point: "TessBaseAPIInit3",
            }),
        },
        OperationDecl {
            name: "set_variable",
            params: &[Pointer, CString, CString],
            ret: Boolean,
            native: Some(NativeImport {
                entry_point: "TessBaseAPISetVariable",
            }),
        },
        OperationDecl {
            name: "set_page_seg_mode",
            params: &[Pointer, Int32],
            ret: Void,
            native: Some(NativeImport {
                entry_point: "TessBaseAPISetPageSegMode",
            }),
        },
        OperationDecl {
            name: "set_image",
            params: &[Pointer, Pointer],
            ret: Void,
            native: Some(NativeImport {
                entry_point: "TessBaseAPISetImage2",
            }),
        },
        OperationDecl {
            name: "recognize",
            params: &[Pointer, Pointer],
            ret: Int32,
            native: Some(NativeImport {
                entry_point: "TessBaseAPIRecognize",
            }),
        },
        OperationDecl {
            name: "get_utf8_text",
            params: &[Pointer],
            ret: CString,
            native: Some(NativeImport {
                entry_point: "TessBaseAPIGetUTF8Text",
            }),
        },
        OperationDecl {
            name: "delete_text",
            params: &[CString],
            ret: Void,
            native: Some(NativeImport {
                entry_point: "TessDeleteText",
            }),
        },
        OperationDecl {
            name: "clear",
            params: &[Pointer],
            ret: Void,
            native: Some(NativeImport {
                entry_point: "TessBaseAPIClear",
            }),
        },
        OperationDecl {
            name: "end",
            params: &[Pointer],
            ret: Void,
            native: Some(NativeImport {
                entry_point: "TessBaseAPIEnd",
            }),
        },
        // Managed-side default, no native backing.
        OperationDecl {
            name: "default_engine_mode",
            params: &[],
            ret: Int32,
            native: None,
        },
    ],
};

/// Abstract surface of the Leptonica image-processing dependency.
pub const LEPTONICA: ReferenceContract = ReferenceContract {
    name: "LeptonicaApi",
    operations: &[
        OperationDecl {
            name: "version",
            params: &[],
            ret: CString,
            native: Some(NativeImport {
                entry_point: "getLeptonicaVersion",
            }),
        },
        OperationDecl {
            name: "free",
            params: &[Pointer],
            ret: Void,
            native: Some(NativeImport {
                entry_point: "lept_free",
            }),
        },
        OperationDecl {
            name: "read_mem",
            params: &[Pointer, Uint64],
            ret: Pointer,
            native: Some(NativeImport {
                entry_point: "pixReadMem",
            }),
        },
        OperationDecl {
            name: "destroy",
            params: &[Pointer],
            ret: Void,
            native: Some(NativeImport {
                entry_point: "pixDestroy",
            }),
        },
        OperationDecl {
            name: "width",
            params: &[Pointer],
            ret: Int32,
            native: Some(NativeImport {
                entry_point: "pixGetWidth",
            }),
        },
        OperationDecl {
            name: "height",
            params: &[Pointer],
            ret: Int32,
            native: Some(NativeImport {
                entry_point: "pixGetHeight",
            }),
        },
        OperationDecl {
            name: "depth",
            params: &[Pointer],
            ret: Int32,
            native: Some(NativeImport {
                entry_point: "pixGetDepth",
            }),
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use pgs_ocr_binding::{LibrarySpec, extract_operations, synthesize};

    #[test]
    fn tesseract_surface_extracts_only_native_members() {
        let signatures = extract_operations(&TESSERACT);
        assert_eq!(signatures.len(), 12);
        assert!(signatures.iter().all(|s| s.name != "default_engine_mode"));
        assert_eq!(signatures[0].entry_point, "TessVersion");
        assert_eq!(signatures[8].entry_point, "TessBaseAPIGetUTF8Text");
    }

    #[test]
    fn leptonica_surface_is_fully_native() {
        let signatures = extract_operations(&LEPTONICA);
        assert_eq!(signatures.len(), LEPTONICA.operations.len());
        assert_eq!(signatures[2].entry_point, "pixReadMem");
    }

    #[test]
    fn empty_image_spec_synthesizes_with_canonical_defaults() {
        let spec = LibrarySpec::new(LEPTONICA_WINDOWS_LIBRARY, "", "")
            .with_defaults(LEPTONICA_DEFAULT_LIBRARY, LEPTONICA_DEFAULT_VERSION);
        let contract = synthesize(&LEPTONICA, &spec).unwrap();
        assert_eq!(contract.operations().len(), 7);
        for operation in contract.operations() {
            assert_eq!(operation.common().library_name(), "lept");
            assert_eq!(operation.common().version(), "5");
            assert_eq!(operation.platform().library_name(), "leptonica-1.83.1");
        }
    }

    #[test]
    fn engine_spec_carries_the_caller_version() {
        let spec = LibrarySpec::new(TESSERACT_WINDOWS_LIBRARY, TESSERACT_COMMON_LIBRARY, "5.3.0");
        let contract = synthesize(&TESSERACT, &spec).unwrap();
        assert_eq!(contract.operations().len(), 12);
        for operation in contract.operations() {
            assert_eq!(operation.common().library_name(), "tesseract");
            assert_eq!(operation.common().version(), "5.3.0");
            assert_eq!(operation.platform().library_name(), "tesseract53");
        }
    }
}
