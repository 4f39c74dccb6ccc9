use std::path::PathBuf;

#[cfg(target_os = "android")]
fn android_cache_dir() -> Option<PathBuf> {
    use jni::{objects::{JObject, JString}, JavaVM};
    unsafe {
        let ctx = ndk_context::android_context();
        let vm = JavaVM::from_raw(ctx.vm().cast()).ok()?;
        let mut env = vm.attach_current_thread().ok()?; // mutable for JNI calls
        let activity = JObject::from_raw(ctx.context().cast());
        let cache_dir = env
            .call_method(activity, "getCacheDir", "()Ljava/io/File;", &[])
            .ok()?
            .l()
            .ok()?;
        let abs_path_obj = env
            .call_method(cache_dir, "getAbsolutePath", "()Ljava/lang/String;", &[])
            .ok()?
            .l()
            .ok()?;
        let abs_path_jstring: JString = JString::from(abs_path_obj);
        let abs_path: String = env.get_string(&abs_path_jstring).ok()?.into();
        Some(PathBuf::from(abs_path))
    }
}

/// Transient cache directory for captured photos on the current platform.
/// Contents may be evicted by the system at any time.
pub fn get_cache_dir() -> PathBuf {
    #[cfg(target_os = "android")]
    {
        if let Some(dir) = android_cache_dir() {
            return dir;
        }
        // Fallbacks
        for d in [
            "/data/user/0/dev.fototeca.app/cache",
            "/data/data/dev.fototeca.app/cache",
        ] {
            let p = PathBuf::from(d);
            if p.exists() {
                return p;
            }
        }
        PathBuf::from("./cache")
    }

    #[cfg(not(target_os = "android"))]
    {
        match dirs::cache_dir() {
            Some(dir) => dir.join("fototeca"),
            None => std::env::temp_dir().join("fototeca"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_os = "android"))]
    #[test]
    fn test_cache_dir_is_app_scoped() {
        let dir = get_cache_dir();
        assert!(dir.ends_with("fototeca"));
    }
}
