//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;

use crate::{harp_notes_to_json, render_harp_json_to_svg};

/// Render harps described in JSON to SVG.
///
/// Called from Kotlin as:
///   external fun renderHarp(json: String): String?
#[no_mangle]
pub extern "system" fn Java_com_skygrid_app_SkyGrid_renderHarp(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let json_str: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    match render_harp_json_to_svg(&json_str, None) {
        Ok(svg) => match env.new_string(&svg) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(_) => std::ptr::null_mut(),
    }
}

/// Snapshot every key of a harp described in JSON.
///
/// Called from Kotlin as:
///   external fun harpNotes(json: String): String?
#[no_mangle]
pub extern "system" fn Java_com_skygrid_app_SkyGrid_harpNotes(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let json_str: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let notes = crate::harp_from_json(&json_str).and_then(|harp| harp_notes_to_json(&harp));
    match notes {
        Ok(notes) => match env.new_string(&notes) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(_) => std::ptr::null_mut(),
    }
}
