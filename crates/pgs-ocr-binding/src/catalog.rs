//! Signature catalog: static descriptions of abstract native surfaces.
//!
//! A reference contract is the build-time-known shape of a native surface.
//! Members that carry [`NativeImport`] metadata are native-backed; the rest
//! belong to the managed side of the surface and never reach the
//! synthesizer.

/// C-ABI value shapes used to describe operation parameters and returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// Return shape only; invalid as a parameter.
    Void,
    Boolean,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
    Float64,
    Pointer,
    CString,
}

/// Native entry-point metadata attached to a reference operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeImport {
    pub entry_point: &'static str,
}

/// One member of a reference contract.
#[derive(Clone, Copy, Debug)]
pub struct OperationDecl {
    pub name: &'static str,
    pub params: &'static [ValueKind],
    pub ret: ValueKind,
    pub native: Option<NativeImport>,
}

/// Build-time description of an abstract native surface.
#[derive(Clone, Copy, Debug)]
pub struct ReferenceContract {
    pub name: &'static str,
    pub operations: &'static [OperationDecl],
}

/// Signature of a single native-backed operation, extracted from a
/// reference contract. Immutable once extracted.
#[derive(Clone, Copy, Debug)]
pub struct OperationSignature {
    pub name: &'static str,
    pub params: &'static [ValueKind],
    pub ret: ValueKind,
    pub entry_point: &'static str,
}

/// Emits one signature per native-backed member, in declaration order.
/// Members without entry-point metadata are skipped.
pub fn extract_operations(contract: &ReferenceContract) -> Vec<OperationSignature> {
    contract
        .operations
        .iter()
        .filter_map(|operation| {
            operation.native.map(|import| OperationSignature {
                name: operation.name,
                params: operation.params,
                ret: operation.ret,
                entry_point: import.entry_point,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: ReferenceContract = ReferenceContract {
        name: "Mixed",
        operations: &[
            OperationDecl {
                name: "alpha",
                params: &[ValueKind::Pointer],
                ret: ValueKind::Int32,
                native: Some(NativeImport {
                    entry_point: "native_alpha",
                }),
            },
            OperationDecl {
                name: "managed_helper",
                params: &[],
                ret: ValueKind::Int32,
                native: None,
            },
            OperationDecl {
                name: "beta",
                params: &[],
                ret: ValueKind::Void,
                native: Some(NativeImport {
                    entry_point: "native_beta",
                }),
            },
        ],
    };

    #[test]
    fn extracts_only_native_backed_members() {
        let signatures = extract_operations(&MIXED);
        assert_eq!(signatures.len(), 2);
        assert_eq!(signatures[0].name, "alpha");
        assert_eq!(signatures[0].entry_point, "native_alpha");
        assert_eq!(signatures[1].name, "beta");
        assert_eq!(signatures[1].entry_point, "native_beta");
    }

    #[test]
    fn preserves_declaration_order_and_shapes() {
        let signatures = extract_operations(&MIXED);
        assert_eq!(signatures[0].params, &[ValueKind::Pointer]);
        assert_eq!(signatures[0].ret, ValueKind::Int32);
        assert_eq!(signatures[1].params, &[] as &[ValueKind]);
        assert_eq!(signatures[1].ret, ValueKind::Void);
    }

    #[test]
    fn empty_contract_extracts_nothing() {
        let empty = ReferenceContract {
            name: "Empty",
            operations: &[],
        };
        assert!(extract_operations(&empty).is_empty());
    }
}
