//! Live resolution against the system math library. Linux only: the
//! versioned soname layout these tests rely on is a glibc convention.
#![cfg(target_os = "linux")]

use pgs_ocr_binding::{
    LibrarySpec, NativeImport, OperationDecl, ReferenceContract, ResolutionError, SurfaceId,
    ValueKind, bind_surface, binding, resolve, synthesize,
};

const MATH: ReferenceContract = ReferenceContract {
    name: "Math",
    operations: &[
        OperationDecl {
            name: "cos",
            params: &[ValueKind::Float64],
            ret: ValueKind::Float64,
            native: Some(NativeImport { entry_point: "cos" }),
        },
        OperationDecl {
            name: "sqrt",
            params: &[ValueKind::Float64],
            ret: ValueKind::Float64,
            native: Some(NativeImport { entry_point: "sqrt" }),
        },
    ],
};

const MATH_COS_ONLY: ReferenceContract = ReferenceContract {
    name: "MathCosOnly",
    operations: &[OperationDecl {
        name: "cos",
        params: &[ValueKind::Float64],
        ret: ValueKind::Float64,
        native: Some(NativeImport { entry_point: "cos" }),
    }],
};

fn math_spec() -> LibrarySpec {
    LibrarySpec::new("m", "m", "6")
}

#[test]
fn resolves_every_entry_point_and_dispatches() {
    let contract = synthesize(&MATH, &math_spec()).unwrap();
    let table = resolve(&contract).unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.contains("cos"));
    assert!(table.contains("sqrt"));

    // SAFETY: cos has this exact C signature.
    let cos: unsafe extern "C" fn(f64) -> f64 = unsafe { table.typed("cos") }.unwrap();
    let value = unsafe { cos(0.0) };
    assert!((value - 1.0).abs() < 1e-12);
}

#[test]
fn one_missing_symbol_fails_the_whole_table() {
    const PARTIAL: ReferenceContract = ReferenceContract {
        name: "Partial",
        operations: &[
            OperationDecl {
                name: "cos",
                params: &[ValueKind::Float64],
                ret: ValueKind::Float64,
                native: Some(NativeImport { entry_point: "cos" }),
            },
            OperationDecl {
                name: "absent",
                params: &[],
                ret: ValueKind::Void,
                native: Some(NativeImport {
                    entry_point: "pgs_ocr_definitely_absent",
                }),
            },
        ],
    };
    let contract = synthesize(&PARTIAL, &math_spec()).unwrap();
    match resolve(&contract) {
        Err(ResolutionError::SymbolNotFound { symbol, .. }) => {
            assert_eq!(symbol, "pgs_ocr_definitely_absent");
        }
        other => panic!("unexpected resolution result: {other:?}"),
    }
}

#[test]
fn non_pointer_sized_target_is_an_abi_mismatch() {
    let contract = synthesize(&MATH, &math_spec()).unwrap();
    let table = resolve(&contract).unwrap();
    match unsafe { table.typed::<u8>("cos") } {
        Err(ResolutionError::AbiMismatch { operation, .. }) => assert_eq!(operation, "cos"),
        other => panic!("unexpected typed access result: {other:?}"),
    }
}

#[test]
fn rebinding_replaces_the_previous_table() {
    bind_surface(SurfaceId::Engine, &MATH_COS_ONLY, &math_spec()).unwrap();
    let first = binding(SurfaceId::Engine).unwrap();
    assert_eq!(first.len(), 1);

    bind_surface(SurfaceId::Engine, &MATH, &math_spec()).unwrap();
    let second = binding(SurfaceId::Engine).unwrap();
    assert_eq!(second.len(), 2);
    assert!(second.contains("sqrt"));

    // Earlier snapshots stay alive until their holders drop them.
    assert!(first.contains("cos"));
}
