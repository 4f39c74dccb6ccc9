pub mod foto;

pub use foto::{Foto, Locator};
