pub mod certificate;
pub mod config;
pub mod contact;
pub mod content;
pub mod counter;
pub mod error;
pub mod media;
pub mod navigation;
pub mod particles;
pub mod rotator;
pub mod scroll;
pub mod share;
pub mod telemetry;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
