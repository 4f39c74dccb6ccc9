use std::fmt;

/// Central error types for the app
#[derive(Debug)]
pub enum AppError {
    /// Filesystem error
    Filesystem(std::io::Error),
    /// Permission denied (e.g. camera)
    PermissionDenied(String),
    /// Feature missing on this platform
    Unsupported(String),
    /// Image decode/encode error
    ImageProcessing(String),
    /// General error
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            AppError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            AppError::Unsupported(msg) => write!(f, "Not supported: {}", msg),
            AppError::ImageProcessing(msg) => write!(f, "Image processing error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

/// User-facing messages for the error banner
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Filesystem(_) => "Error al acceder a los archivos del dispositivo.".to_string(),
            AppError::PermissionDenied(msg) => format!("Permiso denegado: {}", msg),
            AppError::Unsupported(_) => {
                "Esta función no está disponible en esta plataforma.".to_string()
            }
            AppError::ImageProcessing(_) => "Error al procesar la imagen.".to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_convert_to_filesystem() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no existe");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Filesystem(_)));
        assert!(err.to_string().starts_with("Filesystem error:"));
    }

    #[test]
    fn test_user_messages_are_in_spanish() {
        let err = AppError::ImageProcessing("bad magic".to_string());
        assert_eq!(err.user_message(), "Error al procesar la imagen.");
        let err = AppError::Other("Algo salió mal".to_string());
        assert_eq!(err.user_message(), "Algo salió mal");
    }
}
