// Async adapters around the photo-picker crate. The picker blocks while
// it waits for the platform, so every call runs on a blocking thread and
// the UI only ever awaits.

use crate::error::AppError;
use image::DynamicImage;
use photo_picker::PickerError;
use std::path::PathBuf;

fn picker_error_to_app_error(e: PickerError) -> AppError {
    match e {
        PickerError::PermissionDenied(msg) => AppError::PermissionDenied(msg),
        PickerError::Timeout(msg) => AppError::Other(format!("Sin respuesta del selector: {}", msg)),
        PickerError::Cancelled(msg) => AppError::Other(msg), // filtered out before conversion
        PickerError::PlatformNotSupported(msg) => AppError::Unsupported(msg),
        PickerError::Other(msg) => AppError::Other(msg),
    }
}

/// Collapses the picker result into the screen's view of it: a path when
/// the user chose something, `None` when they backed out.
fn map_picked(resultado: Result<PathBuf, PickerError>) -> Result<Option<PathBuf>, AppError> {
    match resultado {
        Ok(path) if path.as_os_str().is_empty() => Ok(None),
        Ok(path) => Ok(Some(path)),
        Err(PickerError::Cancelled(_)) => Ok(None),
        Err(e) => Err(picker_error_to_app_error(e)),
    }
}

/// Opens the platform gallery picker. `None` means the user backed out.
pub async fn pick_image() -> Result<Option<PathBuf>, AppError> {
    let resultado = tokio::task::spawn_blocking(photo_picker::pick_image)
        .await
        .map_err(|e| AppError::Other(format!("picker task failed: {}", e)))?;
    map_picked(resultado)
}

/// Launches the camera and decodes the captured frame.
///
/// The platform hands back a temporary file. It is decoded eagerly and
/// removed, since the PNG later written to the cache is the canonical
/// copy.
pub async fn capture_photo() -> Result<Option<DynamicImage>, AppError> {
    tokio::task::spawn_blocking(|| {
        let path = match map_picked(photo_picker::capture_photo())? {
            Some(path) => path,
            None => return Ok(None),
        };
        let imagen = image::open(&path)
            .map_err(|e| AppError::ImageProcessing(format!("failed to decode capture: {}", e)))?;
        if let Err(e) = std::fs::remove_file(&path) {
            log::warn!("could not remove camera temp file {}: {}", path.display(), e);
        }
        Ok(Some(imagen))
    })
    .await
    .map_err(|e| AppError::Other(format!("camera task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_pick_is_not_an_error() {
        let resultado = map_picked(Err(PickerError::Cancelled("dismissed".to_string())));
        assert!(matches!(resultado, Ok(None)));
    }

    #[test]
    fn test_empty_path_counts_as_cancelled() {
        let resultado = map_picked(Ok(PathBuf::new()));
        assert!(matches!(resultado, Ok(None)));
    }

    #[test]
    fn test_selected_path_passes_through() {
        let resultado = map_picked(Ok(PathBuf::from("/tmp/foto.jpg")));
        assert_eq!(resultado.unwrap(), Some(PathBuf::from("/tmp/foto.jpg")));
    }

    #[test]
    fn test_permission_errors_surface() {
        let resultado = map_picked(Err(PickerError::PermissionDenied("camera".to_string())));
        assert!(matches!(resultado, Err(AppError::PermissionDenied(_))));
    }

    #[test]
    fn test_cancelled_pick_leaves_gallery_unchanged() {
        let galeria = crate::galeria::Galeria::new();
        galeria.append_picked("antes.jpg".into());

        // The screen only appends when a path actually comes back.
        if let Ok(Some(path)) = map_picked(Err(PickerError::Cancelled("x".to_string()))) {
            galeria.append_picked(path.into());
        }
        assert_eq!(galeria.fotos().len(), 1);
    }
}
