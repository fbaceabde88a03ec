//! Typed call layer over the bound native surfaces.
//!
//! `EngineApi` and `ImageApi` look like ordinary static interfaces to the
//! pipeline above; every method forwards through an entry point resolved
//! into the corresponding global slot.

use std::ffi::{CStr, CString, c_char, c_int, c_void};
use std::sync::Arc;

use pgs_ocr_binding::{BindingTable, SurfaceId, binding};

use crate::error::OcrError;

/// Opaque handle to a recognition engine instance.
pub type EngineHandle = *mut c_void;
/// Opaque handle to a decoded Leptonica image.
pub type PixHandle = *mut c_void;

type VersionFn = unsafe extern "C" fn() -> *const c_char;
type CreateFn = unsafe extern "C" fn() -> *mut c_void;
type HandleFn = unsafe extern "C" fn(*mut c_void);
type InitFn = unsafe extern "C" fn(*mut c_void, *const c_char, *const c_char) -> c_int;
type SetVariableFn = unsafe extern "C" fn(*mut c_void, *const c_char, *const c_char) -> c_int;
type SetPageSegModeFn = unsafe extern "C" fn(*mut c_void, c_int);
type SetImageFn = unsafe extern "C" fn(*mut c_void, *mut c_void);
type RecognizeFn = unsafe extern "C" fn(*mut c_void, *mut c_void) -> c_int;
type GetTextFn = unsafe extern "C" fn(*mut c_void) -> *mut c_char;
type DeleteTextFn = unsafe extern "C" fn(*mut c_char);
type FreeFn = unsafe extern "C" fn(*mut c_void);
type ReadMemFn = unsafe extern "C" fn(*const u8, usize) -> *mut c_void;
type DestroyPixFn = unsafe extern "C" fn(*mut *mut c_void);
type PixIntFn = unsafe extern "C" fn(*mut c_void) -> c_int;

/// Static-looking view of the recognition engine surface.
pub struct EngineApi {
    table: Arc<BindingTable>,
}

impl EngineApi {
    /// Snapshots the engine slot. Fails with [`OcrError::SurfaceUnbound`]
    /// until initialization has published the engine binding table.
    pub fn from_slot() -> Result<Self, OcrError> {
        let table = binding(SurfaceId::Engine).ok_or(OcrError::SurfaceUnbound {
            surface: SurfaceId::Engine,
        })?;
        Ok(Self { table })
    }

    pub fn version(&self) -> Result<String, OcrError> {
        let version: VersionFn = self.entry("version")?;
        let raw = unsafe { version() };
        if raw.is_null() {
            return Err(OcrError::backend("TessVersion returned a null pointer"));
        }
        Ok(unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned())
    }

    /// Creates a fresh engine handle. The caller owns it and must release
    /// it with [`EngineApi::delete`].
    pub fn create(&self) -> Result<EngineHandle, OcrError> {
        let create: CreateFn = self.entry("create")?;
        let handle = unsafe { create() };
        if handle.is_null() {
            return Err(OcrError::backend("TessBaseAPICreate returned a null handle"));
        }
        Ok(handle)
    }

    /// # Safety
    /// `handle` must be a live engine handle from [`EngineApi::create`];
    /// it is invalid afterwards.
    pub unsafe fn delete(&self, handle: EngineHandle) -> Result<(), OcrError> {
        let delete: HandleFn = self.entry("delete")?;
        unsafe { delete(handle) };
        Ok(())
    }

    /// Initializes `handle` for `language` using the trained data under
    /// `data_path`. Returns the engine's status code (zero on success).
    ///
    /// # Safety
    /// `handle` must be a live engine handle.
    pub unsafe fn init(
        &self,
        handle: EngineHandle,
        data_path: &str,
        language: &str,
    ) -> Result<i32, OcrError> {
        let init: InitFn = self.entry("init")?;
        let data_path = c_string(data_path)?;
        let language = c_string(language)?;
        Ok(unsafe { init(handle, data_path.as_ptr(), language.as_ptr()) })
    }

    /// # Safety
    /// `handle` must be a live engine handle.
    pub unsafe fn set_variable(
        &self,
        handle: EngineHandle,
        name: &str,
        value: &str,
    ) -> Result<bool, OcrError> {
        let set_variable: SetVariableFn = self.entry("set_variable")?;
        let name = c_string(name)?;
        let value = c_string(value)?;
        Ok(unsafe { set_variable(handle, name.as_ptr(), value.as_ptr()) } != 0)
    }

    /// # Safety
    /// `handle` must be a live engine handle.
    pub unsafe fn set_page_seg_mode(&self, handle: EngineHandle, mode: i32) -> Result<(), OcrError> {
        let set_mode: SetPageSegModeFn = self.entry("set_page_seg_mode")?;
        unsafe { set_mode(handle, mode) };
        Ok(())
    }

    /// # Safety
    /// `handle` must be a live engine handle and `pix` a live image handle;
    /// `pix` must outlive the recognition pass that reads it.
    pub unsafe fn set_image(&self, handle: EngineHandle, pix: PixHandle) -> Result<(), OcrError> {
        let set_image: SetImageFn = self.entry("set_image")?;
        unsafe { set_image(handle, pix) };
        Ok(())
    }

    /// Runs recognition on the previously assigned image. Returns the
    /// engine's status code (zero on success).
    ///
    /// # Safety
    /// `handle` must be a live, initialized engine handle with an image
    /// assigned.
    pub unsafe fn recognize(&self, handle: EngineHandle) -> Result<i32, OcrError> {
        let recognize: RecognizeFn = self.entry("recognize")?;
        Ok(unsafe { recognize(handle, std::ptr::null_mut()) })
    }

    /// Retrieves the recognized text and releases the native buffer.
    ///
    /// # Safety
    /// `handle` must be a live engine handle on which recognition ran.
    pub unsafe fn text(&self, handle: EngineHandle) -> Result<String, OcrError> {
        let get_text: GetTextFn = self.entry("get_utf8_text")?;
        let delete_text: DeleteTextFn = self.entry("delete_text")?;
        let raw = unsafe { get_text(handle) };
        if raw.is_null() {
            return Err(OcrError::backend(
                "TessBaseAPIGetUTF8Text returned a null pointer",
            ));
        }
        let text = unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned();
        unsafe { delete_text(raw) };
        Ok(text)
    }

    /// # Safety
    /// `handle` must be a live engine handle.
    pub unsafe fn clear(&self, handle: EngineHandle) -> Result<(), OcrError> {
        let clear: HandleFn = self.entry("clear")?;
        unsafe { clear(handle) };
        Ok(())
    }

    /// # Safety
    /// `handle` must be a live engine handle; only [`EngineApi::delete`]
    /// may follow.
    pub unsafe fn end(&self, handle: EngineHandle) -> Result<(), OcrError> {
        let end: HandleFn = self.entry("end")?;
        unsafe { end(handle) };
        Ok(())
    }

    fn entry<F: Copy>(&self, operation: &'static str) -> Result<F, OcrError> {
        // SAFETY: the fn-pointer aliases in this module mirror the shapes
        // declared by the surface tables the slot was bound from.
        unsafe { self.table.typed::<F>(operation) }.map_err(OcrError::from)
    }
}

/// Static-looking view of the image-processing surface.
pub struct ImageApi {
    table: Arc<BindingTable>,
}

impl ImageApi {
    /// Snapshots the image-processing slot. Fails with
    /// [`OcrError::SurfaceUnbound`] until initialization has published it.
    pub fn from_slot() -> Result<Self, OcrError> {
        let table = binding(SurfaceId::ImageProcessing).ok_or(OcrError::SurfaceUnbound {
            surface: SurfaceId::ImageProcessing,
        })?;
        Ok(Self { table })
    }

    pub fn version(&self) -> Result<String, OcrError> {
        let version: VersionFn = self.entry("version")?;
        let free: FreeFn = self.entry("free")?;
        let raw = unsafe { version() };
        if raw.is_null() {
            return Err(OcrError::backend(
                "getLeptonicaVersion returned a null pointer",
            ));
        }
        let text = unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned();
        // The version string is allocated by the library.
        unsafe { free(raw as *mut c_void) };
        Ok(text)
    }

    /// Decodes an in-memory image payload into a pix handle the caller
    /// owns; release it with [`ImageApi::destroy`].
    pub fn read_mem(&self, data: &[u8]) -> Result<PixHandle, OcrError> {
        let read_mem: ReadMemFn = self.entry("read_mem")?;
        // SAFETY: pointer and length come from the same live slice.
        let pix = unsafe { read_mem(data.as_ptr(), data.len()) };
        if pix.is_null() {
            return Err(OcrError::backend("pixReadMem could not decode the payload"));
        }
        Ok(pix)
    }

    /// Releases `pix` and nulls the handle.
    ///
    /// # Safety
    /// `pix` must hold a live image handle from [`ImageApi::read_mem`] or
    /// null.
    pub unsafe fn destroy(&self, pix: &mut PixHandle) -> Result<(), OcrError> {
        let destroy: DestroyPixFn = self.entry("destroy")?;
        let pix: *mut PixHandle = pix;
        unsafe { destroy(pix) };
        Ok(())
    }

    /// # Safety
    /// `pix` must be a live image handle.
    pub unsafe fn width(&self, pix: PixHandle) -> Result<i32, OcrError> {
        let width: PixIntFn = self.entry("width")?;
        Ok(unsafe { width(pix) })
    }

    /// # Safety
    /// `pix` must be a live image handle.
    pub unsafe fn height(&self, pix: PixHandle) -> Result<i32, OcrError> {
        let height: PixIntFn = self.entry("height")?;
        Ok(unsafe { height(pix) })
    }

    /// # Safety
    /// `pix` must be a live image handle.
    pub unsafe fn depth(&self, pix: PixHandle) -> Result<i32, OcrError> {
        let depth: PixIntFn = self.entry("depth")?;
        Ok(unsafe { depth(pix) })
    }

    fn entry<F: Copy>(&self, operation: &'static str) -> Result<F, OcrError> {
        // SAFETY: the fn-pointer aliases in this module mirror the shapes
        // declared by the surface tables the slot was bound from.
        unsafe { self.table.typed::<F>(operation) }.map_err(OcrError::from)
    }
}

fn c_string(value: &str) -> Result<CString, OcrError> {
    CString::new(value)
        .map_err(|_| OcrError::backend(format!("argument '{value}' contains a nul byte")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_engine_slot_is_reported() {
        match EngineApi::from_slot() {
            Err(OcrError::SurfaceUnbound { surface }) => {
                assert_eq!(surface, SurfaceId::Engine);
            }
            Ok(_) => panic!("engine surface should be unbound in this process"),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unbound_image_slot_is_reported() {
        match ImageApi::from_slot() {
            Err(OcrError::SurfaceUnbound { surface }) => {
                assert_eq!(surface, SurfaceId::ImageProcessing);
            }
            Ok(_) => panic!("image surface should be unbound in this process"),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nul_bytes_in_arguments_are_rejected() {
        match c_string("eng\0extra") {
            Err(OcrError::Backend { message }) => assert!(message.contains("nul")),
            other => panic!("unexpected conversion result: {other:?}"),
        }
    }
}
