//! Global binding slots and the injector that fills them.
//!
//! Each native surface has one process-wide slot: unbound at start, written
//! by [`install`] as an atomic replace, read by the call layer on every
//! native call. Re-running initialization overwrites a slot (rebind).
//! Initialization is not designed to run concurrently with itself; that is
//! a caller precondition, not enforced here.

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::catalog::ReferenceContract;
use crate::contract::{LibrarySpec, synthesize};
use crate::error::BindingError;
use crate::resolver::resolve;
use crate::table::BindingTable;

/// Identifies one of the two process-wide native surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    Engine,
    ImageProcessing,
}

impl SurfaceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceId::Engine => "engine",
            SurfaceId::ImageProcessing => "image-processing",
        }
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static ENGINE_SLOT: RwLock<Option<Arc<BindingTable>>> = RwLock::new(None);
static IMAGE_SLOT: RwLock<Option<Arc<BindingTable>>> = RwLock::new(None);

fn slot(surface: SurfaceId) -> &'static RwLock<Option<Arc<BindingTable>>> {
    match surface {
        SurfaceId::Engine => &ENGINE_SLOT,
        SurfaceId::ImageProcessing => &IMAGE_SLOT,
    }
}

/// Publishes `table` into the surface's slot as an atomic replace; readers
/// observe either the previous table or the new one, never a partial state.
pub fn install(surface: SurfaceId, table: BindingTable) {
    let mut guard = slot(surface).write().expect("binding slot poisoned");
    *guard = Some(Arc::new(table));
}

/// Snapshot of the table currently bound for `surface`, if any.
pub fn binding(surface: SurfaceId) -> Option<Arc<BindingTable>> {
    slot(surface).read().expect("binding slot poisoned").clone()
}

/// Synthesizes, resolves, and installs one surface. The slot is written
/// only after the whole table resolved; on any error the slot keeps its
/// previous state.
pub fn bind_surface(
    surface: SurfaceId,
    reference: &ReferenceContract,
    spec: &LibrarySpec,
) -> Result<(), BindingError> {
    let contract = synthesize(reference, spec)
        .map_err(|source| BindingError::Synthesis { surface, source })?;
    let table =
        resolve(&contract).map_err(|source| BindingError::Resolution { surface, source })?;
    install(surface, table);
    Ok(())
}
