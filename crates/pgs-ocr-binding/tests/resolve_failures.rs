use pgs_ocr_binding::{
    BindingError, LibrarySpec, NativeImport, OperationDecl, ReferenceContract, ResolutionError,
    SurfaceId, ValueKind, bind_surface, binding, resolve, synthesize,
};

const GHOST: ReferenceContract = ReferenceContract {
    name: "Ghost",
    operations: &[OperationDecl {
        name: "noop",
        params: &[],
        ret: ValueKind::Void,
        native: Some(NativeImport {
            entry_point: "ghost_noop",
        }),
    }],
};

fn ghost_spec() -> LibrarySpec {
    LibrarySpec::new("pgs_ocr_ghost", "pgs_ocr_ghost", "9.9")
}

#[test]
fn missing_library_reports_library_not_found() {
    let contract = synthesize(&GHOST, &ghost_spec()).unwrap();
    match resolve(&contract) {
        Err(ResolutionError::LibraryNotFound { name, cause }) => {
            assert!(name.contains("pgs_ocr_ghost"));
            assert!(!cause.is_empty());
        }
        other => panic!("unexpected resolution result: {other:?}"),
    }
}

#[test]
fn failed_bind_leaves_the_slot_unbound() {
    let err = bind_surface(SurfaceId::ImageProcessing, &GHOST, &ghost_spec()).unwrap_err();
    match err {
        BindingError::Resolution {
            surface,
            source: ResolutionError::LibraryNotFound { .. },
        } => assert_eq!(surface, SurfaceId::ImageProcessing),
        other => panic!("unexpected binding error: {other:?}"),
    }
    assert!(binding(SurfaceId::ImageProcessing).is_none());
}
