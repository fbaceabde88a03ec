//! Native resolver: locates the target library for the current platform and
//! binds every entry point of a synthesized contract.

use std::collections::HashMap;
use std::env;
use std::ffi::c_void;

use libloading::Library;

use crate::catalog::ValueKind;
use crate::contract::{CallingConvention, LibrarySpec, SynthesizedContract, SynthesizedOperation};
use crate::error::ResolutionError;
use crate::table::{BindingTable, EntryPoint};

/// Resolves `contract` into a live [`BindingTable`].
///
/// Resolution is atomic for the whole table: if the library cannot be
/// located or any single entry point fails to bind, the call fails and no
/// table is produced.
pub fn resolve(contract: &SynthesizedContract) -> Result<BindingTable, ResolutionError> {
    configure_search_path();

    let (library, library_name) = load_library(contract.spec())?;
    let mut entries = HashMap::with_capacity(contract.operations().len());
    for operation in contract.operations() {
        audit_abi(operation)?;
        let entry = resolve_entry_point(&library, &library_name, operation.common().entry_point())?;
        entries.insert(operation.signature().name, entry);
    }

    Ok(BindingTable::new(library_name, library, entries))
}

/// Candidate file names for the current platform, most specific first. The
/// Windows family uses the platform override's name; everything else derives
/// a versioned soname from the common descriptor.
fn library_candidates(spec: &LibrarySpec) -> Result<Vec<String>, ResolutionError> {
    if cfg!(windows) {
        Ok(vec![
            format!("{}.dll", spec.platform_library_name()),
            format!("{}.dll", spec.common_library_name()),
        ])
    } else if cfg!(target_os = "macos") {
        Ok(vec![
            format!("lib{}.{}.dylib", spec.common_library_name(), spec.version()),
            format!("lib{}.dylib", spec.common_library_name()),
        ])
    } else if cfg!(target_os = "linux") {
        Ok(vec![
            format!("lib{}.so.{}", spec.common_library_name(), spec.version()),
            format!("lib{}.so", spec.common_library_name()),
        ])
    } else {
        Err(ResolutionError::UnsupportedPlatform {
            os: env::consts::OS,
        })
    }
}

fn load_library(spec: &LibrarySpec) -> Result<(Library, String), ResolutionError> {
    let candidates = library_candidates(spec)?;
    let mut causes = Vec::with_capacity(candidates.len());
    for name in &candidates {
        // SAFETY: loading runs the library's initialization routines; the
        // caller targets known OCR libraries whose initializers are benign.
        match unsafe { Library::new(name) } {
            Ok(library) => return Ok((library, name.clone())),
            Err(err) => causes.push(format!("{name}: {err}")),
        }
    }
    Err(ResolutionError::LibraryNotFound {
        name: candidates.into_iter().next().unwrap_or_default(),
        cause: causes.join("; "),
    })
}

fn resolve_entry_point(
    library: &Library,
    library_name: &str,
    entry_point: &str,
) -> Result<EntryPoint, ResolutionError> {
    // SAFETY: the symbol is read as a raw address only; no call happens
    // here. Typed access goes through `BindingTable::typed`.
    let symbol = unsafe { library.get::<*mut c_void>(entry_point.as_bytes()) }.map_err(|_| {
        ResolutionError::SymbolNotFound {
            library: library_name.to_string(),
            symbol: entry_point.to_string(),
        }
    })?;
    let address: *mut c_void = *symbol;
    if address.is_null() {
        return Err(ResolutionError::SymbolNotFound {
            library: library_name.to_string(),
            symbol: entry_point.to_string(),
        });
    }
    Ok(EntryPoint::new(address))
}

/// Rejects declared shapes the C ABI cannot carry before any symbol lookup.
fn audit_abi(operation: &SynthesizedOperation) -> Result<(), ResolutionError> {
    if operation.common().convention() != CallingConvention::Cdecl {
        return Err(ResolutionError::AbiMismatch {
            operation: operation.signature().name.to_string(),
            reason: "only the standard C calling convention is supported".to_string(),
        });
    }
    if operation.signature().params.contains(&ValueKind::Void) {
        return Err(ResolutionError::AbiMismatch {
            operation: operation.signature().name.to_string(),
            reason: "void is not a representable parameter shape".to_string(),
        });
    }
    Ok(())
}

/// Widens the DLL search directory to the executable's directory before the
/// first lookup. Applied once per process.
#[cfg(windows)]
fn configure_search_path() {
    use std::os::windows::ffi::OsStrExt;
    use std::sync::OnceLock;

    use windows_sys::Win32::System::LibraryLoader::SetDllDirectoryW;

    static WIDENED: OnceLock<()> = OnceLock::new();
    WIDENED.get_or_init(|| {
        let Some(directory) = env::current_exe().ok().and_then(|exe| {
            exe.parent().map(|dir| {
                let mut wide: Vec<u16> = dir.as_os_str().encode_wide().collect();
                wide.push(0);
                wide
            })
        }) else {
            return;
        };
        // SAFETY: `directory` is a nul-terminated wide string that outlives
        // the call.
        unsafe {
            SetDllDirectoryW(directory.as_ptr());
        }
    });
}

#[cfg(not(windows))]
fn configure_search_path() {}
