//! Realized binding tables: resolved entry points plus the library that
//! keeps them alive.

use std::collections::HashMap;
use std::ffi::c_void;
use std::fmt;
use std::mem;

use libloading::Library;

use crate::error::ResolutionError;

/// Address of one resolved native entry point. Valid for as long as the
/// owning [`BindingTable`] is alive.
#[derive(Clone, Copy)]
pub(crate) struct EntryPoint {
    address: *mut c_void,
}

// SAFETY: an entry point is an immutable code address inside the library
// owned by the same table; sharing it across threads does not alias data.
unsafe impl Send for EntryPoint {}
unsafe impl Sync for EntryPoint {}

impl EntryPoint {
    pub(crate) fn new(address: *mut c_void) -> Self {
        Self { address }
    }
}

/// The realized mapping from abstract operations to live native entry
/// points. Exists only after every operation of its contract resolved.
pub struct BindingTable {
    library_name: String,
    entries: HashMap<&'static str, EntryPoint>,
    _library: Library,
}

impl BindingTable {
    pub(crate) fn new(
        library_name: String,
        library: Library,
        entries: HashMap<&'static str, EntryPoint>,
    ) -> Self {
        Self {
            library_name,
            entries,
            _library: library,
        }
    }

    /// File name of the library the table resolved against.
    pub fn library_name(&self) -> &str {
        &self.library_name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, operation: &str) -> bool {
        self.entries.contains_key(operation)
    }

    /// Reinterprets the resolved address of `operation` as a concrete
    /// function-pointer type. A target type that is not pointer sized is
    /// rejected as an ABI mismatch.
    ///
    /// # Safety
    ///
    /// `F` must be an `unsafe extern "C" fn` type matching the true
    /// signature and calling convention of the native entry point.
    pub unsafe fn typed<F: Copy>(&self, operation: &str) -> Result<F, ResolutionError> {
        if mem::size_of::<F>() != mem::size_of::<*mut c_void>() {
            return Err(ResolutionError::AbiMismatch {
                operation: operation.to_string(),
                reason: "target type is not pointer sized".to_string(),
            });
        }
        let entry = self
            .entries
            .get(operation)
            .ok_or_else(|| ResolutionError::SymbolNotFound {
                library: self.library_name.clone(),
                symbol: operation.to_string(),
            })?;
        // SAFETY: sizes match per the check above; the caller guarantees the
        // signature per this function's contract.
        Ok(unsafe { mem::transmute_copy::<*mut c_void, F>(&entry.address) })
    }
}

impl fmt::Debug for BindingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingTable")
            .field("library", &self.library_name)
            .field("operations", &self.entries.len())
            .finish()
    }
}
