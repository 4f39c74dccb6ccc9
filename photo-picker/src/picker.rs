// Platform-specific image picking and camera capture.
//
// On Android, Rust drives a companion activity over JNI: a request is
// launched with `launchGalleryPicker` or `launchCameraCapture`, the
// activity runs the corresponding intent, and Rust polls the static
// result slots (`getPickedPath`, `getPickerError`, `wasPickerCancelled`)
// until one of them fills or the timeout expires. The slots are cleared
// with `resetPickerResult` before every launch so a stale result can
// never be mistaken for a fresh one.
//
// On other platforms, a native file dialog stands in for the gallery and
// the camera is reported as unsupported.

use std::path::PathBuf;

#[cfg(target_os = "android")]
use jni::objects::{JClass, JObject, JString, JValue};
#[cfg(target_os = "android")]
use std::time::Duration;

#[cfg(target_os = "android")]
const POLL_INTERVAL: Duration = Duration::from_millis(100);
#[cfg(target_os = "android")]
const POLL_ATTEMPTS: u32 = 600;

/// Errors that can occur during image picking or capture.
#[derive(Debug, Clone)]
pub enum PickerError {
    /// The user denied a required permission.
    PermissionDenied(String),
    /// No result arrived before the polling window closed.
    Timeout(String),
    /// The user dismissed the picker without choosing anything.
    Cancelled(String),
    /// The operation does not exist on this platform.
    PlatformNotSupported(String),
    /// Anything else, including JNI plumbing failures.
    Other(String),
}

impl std::fmt::Display for PickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            PickerError::Timeout(msg) => write!(f, "Operation timed out: {}", msg),
            PickerError::Cancelled(msg) => write!(f, "Operation cancelled: {}", msg),
            PickerError::PlatformNotSupported(msg) => write!(f, "Platform not supported: {}", msg),
            PickerError::Other(msg) => write!(f, "Picker error: {}", msg),
        }
    }
}

impl std::error::Error for PickerError {}

/// Where to find the companion activity on Android.
#[derive(Debug, Clone)]
pub struct AndroidPickerConfig {
    /// Fully qualified activity class in slash notation,
    /// e.g. `com/example/app/MainActivity`.
    pub main_activity_class: String,
}

impl Default for AndroidPickerConfig {
    fn default() -> Self {
        Self {
            // Dioxus generates the main activity under this package.
            main_activity_class: "dev/dioxus/main/MainActivity".to_string(),
        }
    }
}

/// Opens the system gallery picker and blocks until the user picked an
/// image, cancelled, or the request timed out.
#[cfg(target_os = "android")]
pub fn pick_image() -> Result<PathBuf, PickerError> {
    pick_image_with_config(&AndroidPickerConfig::default())
}

#[cfg(target_os = "android")]
pub fn pick_image_with_config(config: &AndroidPickerConfig) -> Result<PathBuf, PickerError> {
    log::debug!("launching gallery picker via {}", config.main_activity_class);
    run_picker_request(config, "launchGalleryPicker")
}

/// Launches the camera and blocks until a photo was taken, the user
/// backed out, or the request timed out. The returned path points at a
/// temporary file owned by the caller.
#[cfg(target_os = "android")]
pub fn capture_photo() -> Result<PathBuf, PickerError> {
    capture_photo_with_config(&AndroidPickerConfig::default())
}

#[cfg(target_os = "android")]
pub fn capture_photo_with_config(config: &AndroidPickerConfig) -> Result<PathBuf, PickerError> {
    log::debug!("launching camera capture via {}", config.main_activity_class);
    run_picker_request(config, "launchCameraCapture")
}

/// Asks the activity whether camera permission is currently granted.
#[cfg(target_os = "android")]
pub fn has_camera_permission() -> Result<bool, PickerError> {
    has_camera_permission_with_config(&AndroidPickerConfig::default())
}

#[cfg(target_os = "android")]
pub fn has_camera_permission_with_config(config: &AndroidPickerConfig) -> Result<bool, PickerError> {
    let ctx = ndk_context::android_context();
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }.map_err(|e| jni_err("JavaVM", e))?;
    let mut env = vm.attach_current_thread().map_err(|e| jni_err("attach", e))?;

    let (activity, _cls) = activity_instance(&mut env, config)?;
    env.call_method(&activity, "hasCameraPermission", "()Z", &[])
        .and_then(|v| v.z())
        .map_err(|e| jni_err("hasCameraPermission", e))
}

/// Launches one picker request on the activity and polls for its result.
#[cfg(target_os = "android")]
fn run_picker_request(config: &AndroidPickerConfig, launch_method: &str) -> Result<PathBuf, PickerError> {
    let ctx = ndk_context::android_context();
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }.map_err(|e| jni_err("JavaVM", e))?;
    let mut env = vm.attach_current_thread().map_err(|e| jni_err("attach", e))?;

    let (activity, cls) = activity_instance(&mut env, config)?;

    env.call_static_method(&cls, "resetPickerResult", "()V", &[])
        .map_err(|e| jni_err("resetPickerResult", e))?;
    env.call_method(&activity, launch_method, "()V", &[])
        .map_err(|e| jni_err(launch_method, e))?;

    poll_for_result(&mut env, &cls)
}

#[cfg(target_os = "android")]
fn poll_for_result(env: &mut jni::JNIEnv, cls: &JClass) -> Result<PathBuf, PickerError> {
    for _ in 0..POLL_ATTEMPTS {
        std::thread::sleep(POLL_INTERVAL);

        if let Some(path) = read_static_string(env, cls, "getPickedPath")? {
            return Ok(PathBuf::from(path));
        }
        if let Some(message) = read_static_string(env, cls, "getPickerError")? {
            return Err(classify_activity_error(message));
        }
        let cancelled = env
            .call_static_method(cls, "wasPickerCancelled", "()Z", &[])
            .and_then(|v| v.z())
            .map_err(|e| jni_err("wasPickerCancelled", e))?;
        if cancelled {
            return Err(PickerError::Cancelled("request dismissed by the user".to_string()));
        }
    }
    Err(PickerError::Timeout(format!(
        "no picker result within {} seconds",
        POLL_ATTEMPTS as u64 * POLL_INTERVAL.as_millis() as u64 / 1000
    )))
}

/// Calls a static `()Ljava/lang/String;` method and maps a null return
/// to `None`.
#[cfg(target_os = "android")]
fn read_static_string(
    env: &mut jni::JNIEnv,
    cls: &JClass,
    method: &str,
) -> Result<Option<String>, PickerError> {
    let value = env
        .call_static_method(cls, method, "()Ljava/lang/String;", &[])
        .map_err(|e| jni_err(method, e))?
        .l()
        .map_err(|e| jni_err(method, e))?;
    if value.is_null() {
        return Ok(None);
    }
    let value = JString::from(value);
    let text: String = env
        .get_string(&value)
        .map_err(|e| jni_err("string conversion", e))?
        .into();
    Ok(Some(text))
}

/// The activity reports errors as plain messages; permission problems are
/// the one kind the UI treats differently.
#[cfg(target_os = "android")]
fn classify_activity_error(message: String) -> PickerError {
    if message.to_ascii_lowercase().contains("permission") {
        PickerError::PermissionDenied(message)
    } else {
        PickerError::Other(message)
    }
}

/// Resolves the running activity instance and its class.
///
/// Kotlin activities expose themselves through a `@JvmStatic
/// getInstance()`; hand-written ones may only have a static `instance`
/// field, so that is tried second.
#[cfg(target_os = "android")]
fn activity_instance<'local>(
    env: &mut jni::JNIEnv<'local>,
    config: &AndroidPickerConfig,
) -> Result<(JObject<'local>, JClass<'local>), PickerError> {
    let loader = app_class_loader(env)?;
    let cls = load_activity_class(env, &loader, &config.main_activity_class)?;

    let method_sig = format!("()L{};", config.main_activity_class);
    let instance = match env.call_static_method(&cls, "getInstance", &method_sig, &[]) {
        Ok(value) => value.l().map_err(|e| jni_err("getInstance", e))?,
        Err(_) => {
            if env.exception_check().unwrap_or(false) {
                let _ = env.exception_clear();
            }
            let field_sig = format!("L{};", config.main_activity_class);
            env.get_static_field(&cls, "instance", &field_sig)
                .map_err(|e| jni_err("instance field", e))?
                .l()
                .map_err(|e| jni_err("instance field", e))?
        }
    };

    if instance.is_null() {
        return Err(PickerError::Other(
            "activity instance is null, activity not started yet?".to_string(),
        ));
    }
    Ok((instance, cls))
}

/// The application class loader. `find_class` on a native thread only
/// sees system classes, so app classes have to go through this loader.
#[cfg(target_os = "android")]
fn app_class_loader<'local>(env: &mut jni::JNIEnv<'local>) -> Result<JObject<'local>, PickerError> {
    let thread_cls = env
        .find_class("android/app/ActivityThread")
        .map_err(|e| jni_err("ActivityThread", e))?;
    let thread = env
        .call_static_method(
            &thread_cls,
            "currentActivityThread",
            "()Landroid/app/ActivityThread;",
            &[],
        )
        .map_err(|e| jni_err("currentActivityThread", e))?
        .l()
        .map_err(|e| jni_err("currentActivityThread", e))?;
    let app = env
        .call_method(&thread, "getApplication", "()Landroid/app/Application;", &[])
        .map_err(|e| jni_err("getApplication", e))?
        .l()
        .map_err(|e| jni_err("getApplication", e))?;
    if app.is_null() {
        return Err(PickerError::Other("no Application instance yet".to_string()));
    }
    env.call_method(&app, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .map_err(|e| jni_err("getClassLoader", e))?
        .l()
        .map_err(|e| jni_err("getClassLoader", e))
}

#[cfg(target_os = "android")]
fn load_activity_class<'local>(
    env: &mut jni::JNIEnv<'local>,
    loader: &JObject<'local>,
    class_slash: &str,
) -> Result<JClass<'local>, PickerError> {
    // ClassLoader.loadClass wants dots, not slashes.
    let class_dot = class_slash.replace('/', ".");
    let name: JString = env.new_string(class_dot).map_err(|e| jni_err("new_string", e))?;
    let cls = env
        .call_method(
            loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&JObject::from(name))],
        )
        .map_err(|e| jni_err("loadClass", e))?
        .l()
        .map_err(|e| jni_err("loadClass", e))?;
    Ok(JClass::from(cls))
}

#[cfg(target_os = "android")]
fn jni_err(context: &str, err: impl std::fmt::Display) -> PickerError {
    PickerError::Other(format!("JNI {}: {}", context, err))
}

/// Opens a native file dialog restricted to common image formats.
#[cfg(not(target_os = "android"))]
pub fn pick_image() -> Result<PathBuf, PickerError> {
    log::debug!("opening native file dialog");
    rfd::FileDialog::new()
        .add_filter("Images", &["jpg", "jpeg", "png", "webp", "gif", "bmp"])
        .pick_file()
        .ok_or_else(|| PickerError::Cancelled("file dialog dismissed".to_string()))
}

#[cfg(not(target_os = "android"))]
pub fn capture_photo() -> Result<PathBuf, PickerError> {
    Err(PickerError::PlatformNotSupported(
        "camera capture is only available in the Android build".to_string(),
    ))
}

#[cfg(not(target_os = "android"))]
pub fn has_camera_permission() -> Result<bool, PickerError> {
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_points_at_dioxus_activity() {
        let config = AndroidPickerConfig::default();
        assert_eq!(config.main_activity_class, "dev/dioxus/main/MainActivity");
    }

    #[test]
    fn test_error_display_keeps_the_message() {
        let err = PickerError::PermissionDenied("camera".to_string());
        assert_eq!(err.to_string(), "Permission denied: camera");
        let err = PickerError::Cancelled("request dismissed by the user".to_string());
        assert!(err.to_string().contains("dismissed"));
    }

    #[cfg(not(target_os = "android"))]
    #[test]
    fn test_capture_is_unsupported_off_device() {
        assert!(matches!(
            capture_photo(),
            Err(PickerError::PlatformNotSupported(_))
        ));
    }

    #[cfg(not(target_os = "android"))]
    #[test]
    fn test_no_camera_permission_off_device() {
        assert!(!has_camera_permission().unwrap());
    }
}
