//! Runtime binding layer between the OCR pipeline and its native libraries.
//!
//! A [`ReferenceContract`] describes an abstract native surface as a static
//! descriptor table. [`synthesize`] layers platform- and version-specific
//! library-selection metadata onto every native-backed operation,
//! [`resolve`] turns the synthesized contract into a live [`BindingTable`]
//! against the on-disk library, and [`install`] publishes the table into a
//! process-wide slot that the call layer reads on every native call.

pub mod catalog;
pub mod contract;
pub mod error;
pub mod resolver;
pub mod slots;
pub mod table;

pub use catalog::{
    NativeImport, OperationDecl, OperationSignature, ReferenceContract, ValueKind,
    extract_operations,
};
pub use contract::{
    CallingConvention, CommonDescriptor, LibrarySpec, Platform, PlatformOverride,
    SynthesizedContract, SynthesizedOperation, synthesize,
};
pub use error::{BindingError, ContractSynthesisError, ResolutionError};
pub use resolver::resolve;
pub use slots::{SurfaceId, bind_surface, binding, install};
pub use table::BindingTable;
