//! C-ABI wrapper around `portal-core`.
//!
//! # Overview
//! Exposes the catalog's list and detail views through `extern "C"`
//! functions so a rendering host written in any language with a C FFI can
//! drive them. The host executes the HTTP requests handed out here and feeds
//! the responses back; view state comes back as JSON.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - One `FfiPortal` handle per session. It owns the session-scoped store
//!   (dropped with the handle) and a file-backed preference store.
//! - Operations that may need the network return an `FfiPendingRequest`, or
//!   null when the view rejected the operation locally. The response goes
//!   back through `portal_list_apply` / `portal_detail_apply` together with
//!   the request's `seq`; a null response means the transport failed.
//! - The C caller owns all returned pointers and must call the matching
//!   `portal_free_*` function to release them.

pub mod types;

use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use portal_core::{ApiError, FileStore, HttpResponse, PendingRequest, PortalConfig};

use types::*;

// ---------------------------------------------------------------------------
// Portal lifecycle
// ---------------------------------------------------------------------------

/// Create a portal session against `base_url`, persisting preferences in
/// the JSON file at `prefs_path`.
///
/// Returns null if either argument is null, if the preference file exists
/// but cannot be read, or if an internal panic occurs.
/// The caller must free the returned pointer with `portal_free`.
#[unsafe(no_mangle)]
pub extern "C" fn portal_new(base_url: *const c_char, prefs_path: *const c_char) -> *mut FfiPortal {
    catch_unwind(|| {
        if base_url.is_null() || prefs_path.is_null() {
            return std::ptr::null_mut();
        }
        let url = unsafe { borrow_c_str(base_url) };
        let path = unsafe { borrow_c_str(prefs_path) };
        match FileStore::open(path) {
            Ok(prefs) => Box::into_raw(Box::new(FfiPortal::new(url, prefs))),
            Err(e) => {
                tracing::warn!(error = %e, path, "could not open preference store");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Create a portal session from `PORTAL_API_BASE_URL` and
/// `PORTAL_PREFS_PATH`, falling back to the public API and
/// `portal-prefs.json` in the working directory.
///
/// Returns null if the preference file exists but cannot be read.
#[unsafe(no_mangle)]
pub extern "C" fn portal_new_from_env() -> *mut FfiPortal {
    catch_unwind(|| {
        let config = PortalConfig::from_env();
        match FileStore::open(config.prefs_path.clone()) {
            Ok(prefs) => Box::into_raw(Box::new(FfiPortal::new(&config.api_base_url, prefs))),
            Err(e) => {
                tracing::warn!(error = %e, path = %config.prefs_path.display(), "could not open preference store");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a portal created by `portal_new`, ending its session. Safe to call
/// with null.
#[unsafe(no_mangle)]
pub extern "C" fn portal_free(portal: *mut FfiPortal) {
    if !portal.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(portal) });
        });
    }
}

// ---------------------------------------------------------------------------
// List view
// ---------------------------------------------------------------------------

/// Run `op` against the portal and hand out whatever request it produced.
fn pending<F>(portal: *mut FfiPortal, op: F) -> *mut FfiPendingRequest
where
    F: FnOnce(&mut FfiPortal) -> Option<PendingRequest> + std::panic::UnwindSafe,
{
    catch_unwind(|| {
        if portal.is_null() {
            return std::ptr::null_mut();
        }
        let portal = unsafe { &mut *portal };
        op(portal).map_or(std::ptr::null_mut(), FfiPendingRequest::from_core)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the outcome a controller expects from what the host passed in.
fn outcome(response: *const FfiHttpResponse, transport_error: *const c_char) -> Result<HttpResponse, ApiError> {
    if response.is_null() {
        let msg = if transport_error.is_null() {
            "request failed".to_string()
        } else {
            unsafe { borrow_c_str(transport_error) }.to_string()
        };
        return Err(ApiError::Transport(msg));
    }
    Ok(unsafe { &*response }.to_core())
}

/// Load page `page` of the unfiltered list.
///
/// Returns null if `portal` is null or the page is out of bounds.
/// The caller must free the returned pointer with `portal_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn portal_list_fetch_page(portal: *mut FfiPortal, page: u32) -> *mut FfiPendingRequest {
    pending(portal, move |p| p.list.fetch_page(page))
}

/// Search by name from page 1.
///
/// Returns null if `portal` or `term` is null, or if `term` is blank (the
/// list view then reports a validation error).
#[unsafe(no_mangle)]
pub extern "C" fn portal_list_search(portal: *mut FfiPortal, term: *const c_char) -> *mut FfiPendingRequest {
    if term.is_null() {
        return std::ptr::null_mut();
    }
    pending(portal, move |p| p.list.search(unsafe { borrow_c_str(term) }))
}

/// Drop any search and reload page 1. Also the retry action after an error.
#[unsafe(no_mangle)]
pub extern "C" fn portal_list_clear(portal: *mut FfiPortal) -> *mut FfiPendingRequest {
    pending(portal, |p| Some(p.list.clear()))
}

/// Next page of the active filter; null on the last page.
#[unsafe(no_mangle)]
pub extern "C" fn portal_list_page_forward(portal: *mut FfiPortal) -> *mut FfiPendingRequest {
    pending(portal, |p| p.list.page_forward())
}

/// Previous page of the active filter; null on the first page.
#[unsafe(no_mangle)]
pub extern "C" fn portal_list_page_back(portal: *mut FfiPortal) -> *mut FfiPendingRequest {
    pending(portal, |p| p.list.page_back())
}

/// Feed the response for list request `seq` back into the list view.
///
/// Pass a null `response` when the transport failed; `transport_error` may
/// then describe the failure (nullable). Returns false if the response was
/// stale and discarded, or if `portal` is null.
#[unsafe(no_mangle)]
pub extern "C" fn portal_list_apply(
    portal: *mut FfiPortal,
    seq: u64,
    response: *const FfiHttpResponse,
    transport_error: *const c_char,
) -> bool {
    catch_unwind(|| {
        if portal.is_null() {
            return false;
        }
        let portal = unsafe { &mut *portal };
        portal.list.apply(seq, outcome(response, transport_error))
    })
    .unwrap_or(false)
}

/// Current list view as JSON.
#[unsafe(no_mangle)]
pub extern "C" fn portal_list_view(portal: *const FfiPortal) -> *mut FfiPortalResult {
    catch_unwind(|| {
        if portal.is_null() {
            return FfiPortalResult::null_arg("portal");
        }
        let portal = unsafe { &*portal };
        FfiPortalResult::ok_json(&portal.list.view())
    })
    .unwrap_or_else(|_| FfiPortalResult::panic("panic in portal_list_view"))
}

/// Select the character at `index` on the current page and hand it to the
/// detail view. On success the result JSON is the navigation target.
#[unsafe(no_mangle)]
pub extern "C" fn portal_list_select(portal: *mut FfiPortal, index: u32) -> *mut FfiPortalResult {
    catch_unwind(|| {
        if portal.is_null() {
            return FfiPortalResult::null_arg("portal");
        }
        let portal = unsafe { &mut *portal };
        let Some(character) = portal.list.characters().get(index as usize) else {
            return FfiPortalResult::out_of_range("character index");
        };
        match portal.list.select(character, &mut portal.session) {
            Ok(nav) => FfiPortalResult::ok_json(&nav),
            Err(e) => FfiPortalResult::from_store_error(e),
        }
    })
    .unwrap_or_else(|_| FfiPortalResult::panic("panic in portal_list_select"))
}

// ---------------------------------------------------------------------------
// Detail view
// ---------------------------------------------------------------------------

/// Enter the detail view for the last selection.
///
/// Returns the episode batch request, or null when there is no selection or
/// nothing to resolve.
#[unsafe(no_mangle)]
pub extern "C" fn portal_detail_activate(portal: *mut FfiPortal) -> *mut FfiPendingRequest {
    pending(portal, |p| p.detail.activate(&p.session, &p.prefs))
}

/// Feed the response for detail request `seq` back into the detail view.
/// Same contract as `portal_list_apply`.
#[unsafe(no_mangle)]
pub extern "C" fn portal_detail_apply(
    portal: *mut FfiPortal,
    seq: u64,
    response: *const FfiHttpResponse,
    transport_error: *const c_char,
) -> bool {
    catch_unwind(|| {
        if portal.is_null() {
            return false;
        }
        let portal = unsafe { &mut *portal };
        portal.detail.apply(seq, outcome(response, transport_error))
    })
    .unwrap_or(false)
}

/// Current detail view as JSON.
#[unsafe(no_mangle)]
pub extern "C" fn portal_detail_view(portal: *const FfiPortal) -> *mut FfiPortalResult {
    catch_unwind(|| {
        if portal.is_null() {
            return FfiPortalResult::null_arg("portal");
        }
        let portal = unsafe { &*portal };
        FfiPortalResult::ok_json(&portal.detail.view())
    })
    .unwrap_or_else(|_| FfiPortalResult::panic("panic in portal_detail_view"))
}

/// Flip the theme and persist it. On success the result JSON is the new
/// theme, `"dark"` or `"light"`.
#[unsafe(no_mangle)]
pub extern "C" fn portal_theme_toggle(portal: *mut FfiPortal) -> *mut FfiPortalResult {
    catch_unwind(|| {
        if portal.is_null() {
            return FfiPortalResult::null_arg("portal");
        }
        let portal = unsafe { &mut *portal };
        match portal.detail.toggle_theme(&mut portal.prefs) {
            Ok(theme) => FfiPortalResult::ok_json(&theme),
            Err(e) => FfiPortalResult::from_store_error(e),
        }
    })
    .unwrap_or_else(|_| FfiPortalResult::panic("panic in portal_theme_toggle"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiPendingRequest` returned by any portal operation.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn portal_free_request(req: *mut FfiPendingRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.url.is_null() {
            drop(unsafe { CString::from_raw(req.url) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let slice = std::ptr::slice_from_raw_parts_mut(req.headers, req.headers_len as usize);
            let headers = unsafe { Box::from_raw(slice) };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiPortalResult`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn portal_free_result(result: *mut FfiPortalResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.json.is_null() {
            drop(unsafe { CString::from_raw(result.json) });
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn portal_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
