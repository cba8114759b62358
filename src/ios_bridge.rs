// Shelf Core - Audiobook and Podcast Media Model
// Copyright (C) 2025 Shelf Core contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! C FFI bridge for iOS - Exposes the media model to Swift
//!
//! # Architecture
//! Swift (ShelfBridgeModule) → C FFI → Rust ([`crate::bridge`])
//!
//! # Memory Management
//! **CRITICAL**: All string pointers returned from Rust functions MUST be freed
//! by the caller using `rust_free_string()`.
//!
//! Example Swift code:
//! ```swift
//! let resultPtr = rust_remove_audio_track(mediaJson, localFileId)
//! defer { rust_free_string(resultPtr) }
//! let jsonString = String(cString: resultPtr)
//! ```

use crate::bridge;
use crate::error::{Result, ShelfError};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Safely convert C string pointer to Rust String
///
/// # Safety
/// Caller must ensure ptr is a valid null-terminated C string
fn c_str_to_string(ptr: *const c_char) -> Result<String> {
    if ptr.is_null() {
        return Err(ShelfError::invalid_input("Null pointer received"));
    }
    unsafe {
        CStr::from_ptr(ptr)
            .to_str()
            .map(|s| s.to_string())
            .map_err(|e| ShelfError::invalid_input(format!("Invalid UTF-8: {}", e)))
    }
}

/// Convert Rust string to C string pointer
///
/// # Safety
/// Caller MUST free the returned pointer using `rust_free_string()`
fn string_to_c_str(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c_string) => c_string.into_raw(),
        Err(_) => {
            let error_json = bridge::error_response("String contains null bytes");
            CString::new(error_json).unwrap_or_default().into_raw()
        }
    }
}

fn respond(args: Result<String>) -> *mut c_char {
    let response = match args {
        Ok(response) => response,
        Err(e) => bridge::error_response(&e.to_string()),
    };
    string_to_c_str(response)
}

// ============================================================================
// MEDIA FUNCTIONS
// ============================================================================

#[no_mangle]
pub extern "C" fn rust_describe_library_item(item_json: *const c_char) -> *mut c_char {
    respond(c_str_to_string(item_json).map(bridge::describe_library_item))
}

#[no_mangle]
pub extern "C" fn rust_set_audio_tracks(
    media_json: *const c_char,
    tracks_json: *const c_char,
) -> *mut c_char {
    respond((|| -> Result<String> {
        let media_json = c_str_to_string(media_json)?;
        let tracks_json = c_str_to_string(tracks_json)?;
        Ok(bridge::set_audio_tracks(media_json, tracks_json))
    })())
}

#[no_mangle]
pub extern "C" fn rust_add_audio_track(
    media_json: *const c_char,
    track_json: *const c_char,
) -> *mut c_char {
    respond((|| -> Result<String> {
        let media_json = c_str_to_string(media_json)?;
        let track_json = c_str_to_string(track_json)?;
        Ok(bridge::add_audio_track(media_json, track_json))
    })())
}

#[no_mangle]
pub extern "C" fn rust_remove_audio_track(
    media_json: *const c_char,
    local_file_id: *const c_char,
) -> *mut c_char {
    respond((|| -> Result<String> {
        let media_json = c_str_to_string(media_json)?;
        let local_file_id = c_str_to_string(local_file_id)?;
        Ok(bridge::remove_audio_track(media_json, local_file_id))
    })())
}

#[no_mangle]
pub extern "C" fn rust_media_local_copy(media_json: *const c_char) -> *mut c_char {
    respond(c_str_to_string(media_json).map(bridge::media_local_copy))
}

#[no_mangle]
pub extern "C" fn rust_configure_environment(environment_json: *const c_char) -> *mut c_char {
    respond(c_str_to_string(environment_json).map(bridge::configure_environment))
}

/// Free a string returned by any `rust_*` function
///
/// # Safety
/// `ptr` must come from this library and must not be used afterwards
#[no_mangle]
pub unsafe extern "C" fn rust_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
