use crate::camera;
use crate::filesystem;
use crate::galeria::{Fotos, Galeria};
use crate::image_processing;
use dioxus::prelude::*;
use dioxus_photo_grid::{GridPhoto, PhotoGrid};

/// The app's single screen: the photo grid plus its two entry points,
/// the gallery picker behind the floating button and the camera in the
/// top bar.
#[component]
pub fn FotosScreen() -> Element {
    let galeria = use_hook(Galeria::new);
    let mut fotos = use_signal(Fotos::default);
    let mut ocupado = use_signal(|| false);
    let mut aviso = use_signal(|| None::<String>);

    // Mirror the holder's snapshots into a render signal. The holder
    // stays the only writer; this loop just follows it and ends when the
    // screen unmounts.
    {
        let galeria = galeria.clone();
        use_effect(move || {
            let mut observador = galeria.observe();
            spawn(async move {
                loop {
                    fotos.set(observador.borrow_and_update().clone());
                    if observador.changed().await.is_err() {
                        break;
                    }
                }
            });
        });
    }

    let abrir_galeria = {
        let galeria = galeria.clone();
        move |_| {
            ocupado.set(true);
            aviso.set(None);
            let galeria = galeria.clone();
            spawn(async move {
                match camera::pick_image().await {
                    Ok(Some(path)) => galeria.append_picked(path.into()),
                    Ok(None) => {} // user backed out, nothing to show
                    Err(e) => {
                        log::error!("image pick failed: {}", e);
                        aviso.set(Some(e.user_message()));
                    }
                }
                ocupado.set(false);
            });
        }
    };

    let abrir_camara = {
        let galeria = galeria.clone();
        move |_| {
            ocupado.set(true);
            aviso.set(None);
            let galeria = galeria.clone();
            spawn(async move {
                match camera::capture_photo().await {
                    Ok(Some(imagen)) => {
                        match image_processing::save_captured(imagen, filesystem::get_cache_dir())
                            .await
                        {
                            Ok(locator) => galeria.append_captured(locator),
                            Err(e) => {
                                log::error!("could not cache capture: {}", e);
                                aviso.set(Some(e.user_message()));
                            }
                        }
                    }
                    Ok(None) => {} // capture abandoned
                    Err(e) => {
                        log::error!("camera capture failed: {}", e);
                        aviso.set(Some(e.user_message()));
                    }
                }
                ocupado.set(false);
            });
        }
    };

    let tarjetas: Vec<GridPhoto> = fotos()
        .iter()
        .enumerate()
        .map(|(i, foto)| GridPhoto {
            id: i.to_string(),
            locator: foto.locator.as_str().to_string(),
            caption: Some(foto.titulo.clone()),
        })
        .collect();

    rsx! {
        div { style: "display: flex; flex-direction: column; min-height: 100vh;",
            // Top bar
            div { class: "topbar",
                h1 { style: "margin: 0; font-size: 20px; font-weight: 700;", "Fotos" }
                button {
                    class: "btn-secondary",
                    style: "padding: 8px 16px; font-size: 14px;",
                    disabled: ocupado(),
                    onclick: abrir_camara,
                    if ocupado() {
                        "⏳ Cámara"
                    } else {
                        "📷 Cámara"
                    }
                }
            }

            if let Some(mensaje) = aviso() {
                div { class: "error-banner", "⚠️ {mensaje}" }
            }

            div { style: "flex: 1;",
                if fotos().is_empty() {
                    div { style: "height: 60vh; display: flex; align-items: center; justify-content: center; color: #666; padding: 24px; text-align: center;",
                        "Aún no hay fotos. Toca + o usa la cámara."
                    }
                } else {
                    PhotoGrid { photos: tarjetas }
                }
            }

            // Floating gallery button
            button {
                class: "btn-fab",
                disabled: ocupado(),
                onclick: abrir_galeria,
                "+"
            }
        }
    }
}
