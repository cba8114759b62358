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


//! JNI bridge for Android - Exposes the media model to the Kotlin module
//!
//! # Architecture
//! Kotlin (ShelfBridgeModule) → JNI → Rust ([`crate::bridge`])
//!
//! Each function converts its Java string arguments, runs the matching
//! bridge operation and returns its JSON envelope. Argument conversion
//! failures are reported in the same envelope format.

use crate::bridge;
use crate::error::{Result, ShelfError};
use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use tracing::error;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Convert JString to Rust String
fn jstring_to_string(env: &mut JNIEnv, jstr: JString) -> Result<String> {
    env.get_string(&jstr)
        .map(|s| s.into())
        .map_err(|e| ShelfError::JniError(format!("JNI string conversion failed: {}", e)))
}

/// Hand a response back to Java; null only if the JVM cannot allocate it
fn to_jstring(env: &mut JNIEnv, response: String) -> jstring {
    match env.new_string(response) {
        Ok(s) => s.into_raw(),
        Err(e) => {
            error!(error = %e, "failed to create Java string");
            std::ptr::null_mut()
        }
    }
}

fn argument_error(env: &mut JNIEnv, e: ShelfError) -> jstring {
    let response = bridge::error_response(&e.to_string());
    to_jstring(env, response)
}

// ============================================================================
// MEDIA FUNCTIONS
// ============================================================================

#[no_mangle]
pub extern "C" fn Java_expo_modules_shelfbridge_ShelfBridgeModule_nativeDescribeLibraryItem(
    mut env: JNIEnv,
    _class: JClass,
    item_json: JString,
) -> jstring {
    let item_json = match jstring_to_string(&mut env, item_json) {
        Ok(s) => s,
        Err(e) => return argument_error(&mut env, e),
    };

    let response = bridge::describe_library_item(item_json);
    to_jstring(&mut env, response)
}

#[no_mangle]
pub extern "C" fn Java_expo_modules_shelfbridge_ShelfBridgeModule_nativeSetAudioTracks(
    mut env: JNIEnv,
    _class: JClass,
    media_json: JString,
    tracks_json: JString,
) -> jstring {
    let args = jstring_to_string(&mut env, media_json)
        .and_then(|media| Ok((media, jstring_to_string(&mut env, tracks_json)?)));
    let (media_json, tracks_json) = match args {
        Ok(args) => args,
        Err(e) => return argument_error(&mut env, e),
    };

    let response = bridge::set_audio_tracks(media_json, tracks_json);
    to_jstring(&mut env, response)
}

#[no_mangle]
pub extern "C" fn Java_expo_modules_shelfbridge_ShelfBridgeModule_nativeAddAudioTrack(
    mut env: JNIEnv,
    _class: JClass,
    media_json: JString,
    track_json: JString,
) -> jstring {
    let args = jstring_to_string(&mut env, media_json)
        .and_then(|media| Ok((media, jstring_to_string(&mut env, track_json)?)));
    let (media_json, track_json) = match args {
        Ok(args) => args,
        Err(e) => return argument_error(&mut env, e),
    };

    let response = bridge::add_audio_track(media_json, track_json);
    to_jstring(&mut env, response)
}

#[no_mangle]
pub extern "C" fn Java_expo_modules_shelfbridge_ShelfBridgeModule_nativeRemoveAudioTrack(
    mut env: JNIEnv,
    _class: JClass,
    media_json: JString,
    local_file_id: JString,
) -> jstring {
    let args = jstring_to_string(&mut env, media_json)
        .and_then(|media| Ok((media, jstring_to_string(&mut env, local_file_id)?)));
    let (media_json, local_file_id) = match args {
        Ok(args) => args,
        Err(e) => return argument_error(&mut env, e),
    };

    let response = bridge::remove_audio_track(media_json, local_file_id);
    to_jstring(&mut env, response)
}

#[no_mangle]
pub extern "C" fn Java_expo_modules_shelfbridge_ShelfBridgeModule_nativeMediaLocalCopy(
    mut env: JNIEnv,
    _class: JClass,
    media_json: JString,
) -> jstring {
    let media_json = match jstring_to_string(&mut env, media_json) {
        Ok(s) => s,
        Err(e) => return argument_error(&mut env, e),
    };

    let response = bridge::media_local_copy(media_json);
    to_jstring(&mut env, response)
}

// ============================================================================
// ENVIRONMENT FUNCTIONS
// ============================================================================

/// Called after login and whenever the server or token changes
#[no_mangle]
pub extern "C" fn Java_expo_modules_shelfbridge_ShelfBridgeModule_nativeConfigureEnvironment(
    mut env: JNIEnv,
    _class: JClass,
    environment_json: JString,
) -> jstring {
    let environment_json = match jstring_to_string(&mut env, environment_json) {
        Ok(s) => s,
        Err(e) => return argument_error(&mut env, e),
    };

    let response = bridge::configure_environment(environment_json);
    to_jstring(&mut env, response)
}
