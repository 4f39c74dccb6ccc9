mod fotos;

pub use fotos::FotosScreen;
