//! C-compatible Foreign Function Interface (FFI) for aurorax-search
//!
//! This module provides C-compatible bindings that allow the aurorax-search
//! request builder to be used from C, C++, Python (via ctypes), and other
//! languages that support calling C libraries.
//!
//! # Memory Management
//!
//! - All string parameters should be null-terminated C strings (char*)
//! - Returned strings are allocated by Rust and must be freed with `aurorax_free_string()`
//!
//! # Error Handling
//!
//! All functions return an AuroraxResult code:
//! - 0: Success
//! - 1: Invalid parameter (null pointer, non-UTF-8 or unparseable JSON)
//! - 2: Validation error (block limit, pair key, distance, precision, time range)
//! - 3: Unknown error (the request body could not be handed back as a C string)

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::Error;

/// Result codes for C FFI
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuroraxResult {
    Success = 0,
    InvalidParameter = 1,
    ValidationError = 2,
    UnknownError = 3,
}

/// Convert a library error to a C result code
fn convert_error(error: &Error) -> AuroraxResult {
    match error {
        Error::InvalidInput(_) | Error::Json(_) => AuroraxResult::InvalidParameter,
        Error::TooManyCriteriaBlocks { .. }
        | Error::UnknownPairKey { .. }
        | Error::InvalidDistance { .. }
        | Error::InvalidEpochPrecision(_)
        | Error::InvalidCriteriaBlock { .. }
        | Error::NoCriteriaBlocks
        | Error::InvalidTimeRange { .. } => AuroraxResult::ValidationError,
    }
}

/// Build a conjunction search request body from a JSON search description
///
/// # Parameters
/// - `input_json`: Search description (null-terminated JSON string)
/// - `out_json`: Receives the request body on success; free it with `aurorax_free_string()`
///
/// # Returns
/// AuroraxResult code
#[no_mangle]
pub extern "C" fn aurorax_build_request(
    input_json: *const c_char,
    out_json: *mut *mut c_char,
) -> AuroraxResult {
    // Validate input parameters
    if input_json.is_null() || out_json.is_null() {
        return AuroraxResult::InvalidParameter;
    }

    unsafe {
        *out_json = ptr::null_mut();
    }

    // Convert C string to Rust string
    let input = match unsafe { CStr::from_ptr(input_json) }.to_str() {
        Ok(s) => s,
        Err(_) => return AuroraxResult::InvalidParameter,
    };

    let body = match crate::build_request_json(input) {
        Ok(body) => body,
        Err(e) => {
            log::debug!("aurorax_build_request rejected input: {e}");
            return convert_error(&e);
        }
    };

    match CString::new(body) {
        Ok(c_string) => {
            unsafe {
                *out_json = c_string.into_raw();
            }
            AuroraxResult::Success
        }
        Err(_) => AuroraxResult::UnknownError,
    }
}

/// Free a string allocated by the library
///
/// # Parameters
/// - `ptr`: String pointer returned by library functions
#[no_mangle]
pub extern "C" fn aurorax_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            drop(CString::from_raw(ptr));
        }
    }
}

/// Get library version string
///
/// # Returns
/// Static string with version information (does not need to be freed)
#[no_mangle]
pub extern "C" fn aurorax_version() -> *const c_char {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<CString> = OnceLock::new();

    VERSION_STRING
        .get_or_init(|| {
            CString::new(format!("aurorax-search {}", env!("AURORAX_SEARCH_VERSION")))
                .unwrap_or_default()
        })
        .as_ptr()
}
