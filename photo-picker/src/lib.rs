//! # Photo Picker
//!
//! Lets an app hand off "give me an image" to the platform: the system
//! gallery picker or the camera. On Android the work is delegated over
//! JNI to the main activity, which owns the intents and permission
//! prompts; on desktop a native file dialog stands in so the UI can be
//! developed without a device.
//!
//! The API is deliberately narrow: a request either yields the path of
//! an image file, or a [`PickerError`] saying why not. Cancellation is
//! an error variant rather than an `Option`, so callers can decide for
//! themselves whether a dismissed dialog is worth reporting.

pub mod picker;

pub use picker::{capture_photo, has_camera_permission, pick_image, AndroidPickerConfig, PickerError};
