uniffi::setup_scaffolding!();

pub mod bridge;
pub mod config;
pub mod error;
pub mod json;
pub mod media;

// JNI bridge for Android
#[cfg(target_os = "android")]
mod jni_bridge;

// C FFI bridge for iOS
#[cfg(target_os = "ios")]
mod ios_bridge;

pub use crate::config::{ClientSettings, RuntimeEnvironment};
pub use error::{Result, ShelfError};
pub use media::{LibraryItem, MediaType, TrackCollection};

/// Load settings and install them as the runtime environment
pub fn init_from_settings() -> Result<RuntimeEnvironment> {
    let settings = ClientSettings::load()?;
    let env = settings.runtime_environment();
    crate::config::environment::install(env.clone());
    Ok(env)
}
