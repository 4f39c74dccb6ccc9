//! A scrollable photo grid for Dioxus.
//!
//! [`PhotoGrid`] lays out [`GridPhoto`] entries in a fixed number of
//! columns. Each cell loads its image off the UI thread and renders it
//! as a base64 data URL, so the component works the same under desktop
//! webviews and the Android webview, where `file://` sources are not
//! reliably reachable.

use dioxus::prelude::*;
use std::path::Path;

/// One photo cell in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPhoto {
    /// Stable identity for list rendering.
    pub id: String,
    /// Filesystem path (or ready-made data URL) of the image.
    pub locator: String,
    /// One-line caption under the image, ellipsized when too long.
    pub caption: Option<String>,
}

#[derive(Debug, Clone)]
enum ImageLoadState {
    Loading,
    Loaded(String),
    Failed,
}

/// Scrollable photo grid, two columns unless told otherwise.
#[component]
pub fn PhotoGrid(photos: Vec<GridPhoto>, #[props(default = 2)] columns: u32) -> Element {
    let grid_style = format!(
        "display: grid; grid-template-columns: repeat({}, 1fr); gap: 12px; padding: 12px;",
        columns
    );

    rsx! {
        div { style: "{grid_style}",
            for photo in photos {
                PhotoCell { photo }
            }
        }
    }
}

#[component]
fn PhotoCell(photo: GridPhoto) -> Element {
    let mut load_state = use_signal(|| ImageLoadState::Loading);
    let source = photo.locator.clone();

    use_effect(move || {
        let source = source.clone();
        spawn(async move {
            match tokio::task::spawn_blocking(move || load_data_url(&source)).await {
                Ok(Ok(url)) => load_state.set(ImageLoadState::Loaded(url)),
                Ok(Err(e)) => {
                    log::debug!("photo load failed: {}", e);
                    load_state.set(ImageLoadState::Failed);
                }
                Err(e) => {
                    log::debug!("photo load task failed: {}", e);
                    load_state.set(ImageLoadState::Failed);
                }
            }
        });
    });

    let alt = photo.caption.clone().unwrap_or_else(|| "Photo".to_string());

    rsx! {
        div {
            key: "{photo.id}",
            style: "border-radius: 8px; overflow: hidden; background: #ffffff; box-shadow: 0 1px 3px rgba(0,0,0,0.2);",
            div { style: "aspect-ratio: 1 / 1; background: #f0f0f0;",
                match load_state() {
                    ImageLoadState::Loading => rsx! {
                        div {
                            style: "width: 100%; height: 100%; display: flex; align-items: center; justify-content: center; color: #999;",
                            "⏳"
                        }
                    },
                    ImageLoadState::Loaded(url) => rsx! {
                        img {
                            src: "{url}",
                            alt: "{alt}",
                            style: "width: 100%; height: 100%; object-fit: cover; display: block;",
                        }
                    },
                    ImageLoadState::Failed => rsx! {
                        div {
                            style: "width: 100%; height: 100%; display: flex; align-items: center; justify-content: center; color: #999;",
                            "📷"
                        }
                    },
                }
            }
            if let Some(caption) = &photo.caption {
                div {
                    style: "padding: 8px; font-size: 14px; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                    "{caption}"
                }
            }
        }
    }
}

/// Reads the image behind `source` and returns it as a base64 data URL.
/// Sources that already are data URLs pass through unchanged.
pub fn load_data_url(source: &str) -> std::io::Result<String> {
    use base64::{engine::general_purpose, Engine as _};

    if source.starts_with("data:") {
        return Ok(source.to_string());
    }
    let path = Path::new(source);
    let bytes = std::fs::read(path)?;
    let encoded = general_purpose::STANDARD.encode(&bytes);
    Ok(format!("data:{};base64,{}", guess_mime(path), encoded))
}

/// MIME type from the file extension. Unknown extensions fall back to
/// JPEG, which webviews will still sniff correctly in practice.
fn guess_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_passes_through() {
        let url = "data:image/png;base64,AAAA";
        assert_eq!(load_data_url(url).unwrap(), url);
    }

    #[test]
    fn test_file_becomes_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foto.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let url = load_data_url(path.to_str().unwrap()).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_data_url("/no/such/file.jpg").is_err());
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(guess_mime(Path::new("a.PNG")), "image/png");
        assert_eq!(guess_mime(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("a.webp")), "image/webp");
        assert_eq!(guess_mime(Path::new("sin_extension")), "image/jpeg");
    }
}
