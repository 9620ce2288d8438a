//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Requests cross as C structs the host can execute directly. View state,
//! navigation targets and theme changes cross as JSON strings inside a
//! single `FfiPortalResult` envelope. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use portal_core::{
    CatalogClient, DetailController, FileStore, HttpMethod, HttpResponse, ListController, MemoryStore,
    PendingRequest, StoreError,
};
use serde::Serialize;

/// Opaque handle to one portal session: both view controllers, the
/// session-scoped store and the durable preference store. C callers
/// receive a pointer to this and pass it back into every FFI function.
pub struct FfiPortal {
    pub(crate) list: ListController,
    pub(crate) detail: DetailController,
    pub(crate) session: MemoryStore,
    pub(crate) prefs: FileStore,
}

impl FfiPortal {
    pub(crate) fn new(base_url: &str, prefs: FileStore) -> Self {
        let client = CatalogClient::new(base_url);
        Self {
            list: ListController::new(client.clone()),
            detail: DetailController::new(client),
            session: MemoryStore::new(),
            prefs,
        }
    }
}

/// Copy `s` into a heap C string owned by the caller. Interior NUL bytes
/// are dropped.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    let s = if s.contains('\0') { s.replace('\0', "") } else { s };
    CString::new(s).unwrap_or_default().into_raw()
}

/// Borrow a caller-provided C string. Invalid UTF-8 reads as empty.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string that outlives
/// the returned reference.
pub(crate) unsafe fn borrow_c_str<'a>(ptr: *const c_char) -> &'a str {
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap_or("")
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A request the host must execute, tagged with the sequence token it has
/// to pass back to the matching `portal_*_apply`.
#[repr(C)]
pub struct FfiPendingRequest {
    pub seq: u64,
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiPendingRequest {
    /// Convert a core `PendingRequest` into a heap-allocated
    /// `FfiPendingRequest`.
    pub(crate) fn from_core(pending: PendingRequest) -> *mut Self {
        let req = pending.request;
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: into_c_string(k),
                    value: into_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiPendingRequest {
            seq: pending.seq,
            method: req.method.into(),
            url: into_c_string(req.url),
            headers,
            headers_len,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a request and
/// passes a pointer to `portal_*_apply`. The FFI layer reads but does not
/// free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

impl FfiHttpResponse {
    pub(crate) fn to_core(&self) -> HttpResponse {
        let body = if self.body.is_null() {
            String::new()
        } else {
            unsafe { borrow_c_str(self.body) }.to_string()
        };
        HttpResponse::new(self.status, body)
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiPortalResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Serialization = 1,
    Store = 2,
    OutOfRange = 3,
    Panic = 4,
    NullArg = 5,
}

/// Result envelope for view snapshots, selections and theme changes.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `json`
/// holds the payload. On failure `error_code` describes the category,
/// `error_message` is a human-readable C string, and `json` is null.
#[repr(C)]
pub struct FfiPortalResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub json: *mut c_char,
}

impl FfiPortalResult {
    fn boxed(error_code: FfiErrorCode, message: Option<String>, json: *mut c_char) -> *mut Self {
        Box::into_raw(Box::new(FfiPortalResult {
            error_code,
            error_message: message.map_or(std::ptr::null_mut(), into_c_string),
            json,
        }))
    }

    /// Build a success result carrying `value` as JSON.
    pub(crate) fn ok_json<T: Serialize + ?Sized>(value: &T) -> *mut Self {
        match serde_json::to_string(value) {
            Ok(json) => Self::boxed(FfiErrorCode::Ok, None, into_c_string(json)),
            Err(e) => Self::boxed(FfiErrorCode::Serialization, Some(e.to_string()), std::ptr::null_mut()),
        }
    }

    /// Build an error result from a `StoreError`.
    pub(crate) fn from_store_error(err: StoreError) -> *mut Self {
        let code = match &err {
            StoreError::Serialize(_) => FfiErrorCode::Serialization,
            _ => FfiErrorCode::Store,
        };
        Self::boxed(code, Some(err.to_string()), std::ptr::null_mut())
    }

    pub(crate) fn out_of_range(what: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::OutOfRange, Some(format!("out of range: {what}")), std::ptr::null_mut())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::NullArg, Some(format!("null argument: {name}")), std::ptr::null_mut())
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::Panic, Some(msg.to_string()), std::ptr::null_mut())
    }
}
