use crate::error::AppError;
use crate::models::Locator;
use image::DynamicImage;
use std::path::PathBuf;

/// File name for a captured photo, derived from the capture timestamp so
/// repeated captures never collide.
fn capture_filename(epoch_millis: i64) -> String {
    format!("foto_{}.png", epoch_millis)
}

/// Writes a captured image as PNG into `dir` and returns a locator for
/// the new file. Encoding is CPU-bound, so the whole write runs on a
/// blocking thread.
pub async fn save_captured(imagen: DynamicImage, dir: PathBuf) -> Result<Locator, AppError> {
    tokio::task::spawn_blocking(move || {
        std::fs::create_dir_all(&dir)?;
        let destino = dir.join(capture_filename(chrono::Utc::now().timestamp_millis()));
        imagen
            .save(&destino)
            .map_err(|e| AppError::ImageProcessing(format!("failed to encode capture: {}", e)))?;
        log::debug!("captured photo cached at {}", destino.display());
        Ok(Locator::from(destino))
    })
    .await
    .map_err(|e| AppError::Other(format!("cache write task failed: {}", e)))?
}
