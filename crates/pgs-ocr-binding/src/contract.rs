//! Binding contract synthesis: layering library-selection metadata onto a
//! reference contract.

use std::collections::HashSet;
use std::fmt;

use crate::catalog::{OperationSignature, ReferenceContract, extract_operations};
use crate::error::ContractSynthesisError;

/// Platforms a per-operation override can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Windows,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Native calling conventions. Every synthesized operation uses the
/// standard C convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallingConvention {
    Cdecl,
}

/// Caller-supplied description of the library artifact to bind against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LibrarySpec {
    platform_library_name: String,
    common_library_name: String,
    version: String,
}

impl LibrarySpec {
    pub fn new(
        platform_library_name: impl Into<String>,
        common_library_name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            platform_library_name: platform_library_name.into(),
            common_library_name: common_library_name.into(),
            version: version.into(),
        }
    }

    /// Substitutes the surface's canonical defaults for empty common-name
    /// or version fields.
    pub fn with_defaults(mut self, common_library_name: &str, version: &str) -> Self {
        if self.common_library_name.is_empty() {
            self.common_library_name = common_library_name.to_string();
        }
        if self.version.is_empty() {
            self.version = version.to_string();
        }
        self
    }

    pub fn platform_library_name(&self) -> &str {
        &self.platform_library_name
    }

    pub fn common_library_name(&self) -> &str {
        &self.common_library_name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Library override valid on one specific platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformOverride {
    library_name: String,
    platform: Platform,
}

impl PlatformOverride {
    pub fn library_name(&self) -> &str {
        &self.library_name
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }
}

/// Library descriptor valid on all platforms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommonDescriptor {
    library_name: String,
    version: String,
    convention: CallingConvention,
    entry_point: String,
}

impl CommonDescriptor {
    pub fn library_name(&self) -> &str {
        &self.library_name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn convention(&self) -> CallingConvention {
        self.convention
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }
}

/// One operation of a synthesized contract: the original signature plus its
/// resolution metadata.
#[derive(Clone, Debug)]
pub struct SynthesizedOperation {
    signature: OperationSignature,
    platform: PlatformOverride,
    common: CommonDescriptor,
}

impl SynthesizedOperation {
    pub fn signature(&self) -> &OperationSignature {
        &self.signature
    }

    pub fn platform(&self) -> &PlatformOverride {
        &self.platform
    }

    pub fn common(&self) -> &CommonDescriptor {
        &self.common
    }
}

/// A reference contract with full native-resolution metadata attached.
/// Holds exactly the native-backed operations of its base contract, each
/// annotated from the same [`LibrarySpec`]. Built fresh per call.
#[derive(Clone, Debug)]
pub struct SynthesizedContract {
    name: &'static str,
    spec: LibrarySpec,
    operations: Vec<SynthesizedOperation>,
}

impl SynthesizedContract {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn spec(&self) -> &LibrarySpec {
        &self.spec
    }

    pub fn operations(&self) -> &[SynthesizedOperation] {
        &self.operations
    }
}

/// Builds a synthesized contract for `reference` targeting `spec`.
///
/// Every native-backed operation is carried over 1:1 with a Windows
/// platform override and a common descriptor derived from `spec`. Duplicate
/// or malformed member names fail synthesis.
pub fn synthesize(
    reference: &ReferenceContract,
    spec: &LibrarySpec,
) -> Result<SynthesizedContract, ContractSynthesisError> {
    let mut seen = HashSet::new();
    let mut operations = Vec::new();

    for signature in extract_operations(reference) {
        validate_identifier(reference.name, signature.name)?;
        validate_identifier(reference.name, signature.entry_point)?;
        if !seen.insert(signature.name) {
            return Err(ContractSynthesisError::DuplicateOperation {
                contract: reference.name,
                operation: signature.name,
            });
        }
        operations.push(SynthesizedOperation {
            signature,
            platform: PlatformOverride {
                library_name: spec.platform_library_name().to_string(),
                platform: Platform::Windows,
            },
            common: CommonDescriptor {
                library_name: spec.common_library_name().to_string(),
                version: spec.version().to_string(),
                convention: CallingConvention::Cdecl,
                entry_point: signature.entry_point.to_string(),
            },
        });
    }

    Ok(SynthesizedContract {
        name: reference.name,
        spec: spec.clone(),
        operations,
    })
}

fn validate_identifier(
    contract: &'static str,
    candidate: &str,
) -> Result<(), ContractSynthesisError> {
    let mut chars = candidate.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ContractSynthesisError::InvalidIdentifier {
            contract,
            member: candidate.to_string(),
        })
    }
}
