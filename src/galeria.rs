use crate::models::{Foto, Locator};
use std::sync::Arc;
use tokio::sync::watch;

/// One immutable snapshot of the collection. Observers share it by
/// reference counting, so publishing a new snapshot never copies pixels
/// or paths for readers.
pub type Fotos = Arc<Vec<Foto>>;

/// In-memory, observable photo collection and the single source of truth
/// for the gallery screen.
///
/// Mutations replace the whole snapshot through a watch channel, so an
/// observer sees either the pre-mutation or the post-mutation sequence,
/// never a half-updated one. The holder lives exactly as long as the
/// screen that created it; nothing is persisted.
#[derive(Clone)]
pub struct Galeria {
    fotos: Arc<watch::Sender<Fotos>>,
}

impl Galeria {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Fotos::default());
        Self { fotos: Arc::new(tx) }
    }

    /// Live read-only view of the collection. Every committed mutation
    /// wakes the receiver with the new snapshot.
    pub fn observe(&self) -> watch::Receiver<Fotos> {
        self.fotos.subscribe()
    }

    /// The current snapshot.
    #[allow(dead_code)]
    pub fn fotos(&self) -> Fotos {
        self.fotos.borrow().clone()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.fotos.borrow().len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.fotos.borrow().is_empty()
    }

    /// Appends a ready-made record. No duplicate or validity checks, the
    /// locator is taken as-is.
    #[allow(dead_code)]
    pub fn append(&self, foto: Foto) {
        let next = {
            let actual = self.fotos.borrow();
            let mut fotos = actual.as_ref().clone();
            fotos.push(foto);
            Arc::new(fotos)
        };
        self.fotos.send_replace(next);
    }

    /// Appends a gallery pick titled "Foto N", where N counts the
    /// collection after insertion.
    pub fn append_picked(&self, locator: Locator) {
        self.append_numbered(locator, "Foto");
    }

    /// Appends a camera capture titled "Cámara N", numbered the same way.
    pub fn append_captured(&self, locator: Locator) {
        self.append_numbered(locator, "Cámara");
    }

    fn append_numbered(&self, locator: Locator, prefijo: &str) {
        // The titulo and the push happen under one borrow so the number
        // always matches the snapshot it lands in.
        let next = {
            let actual = self.fotos.borrow();
            let titulo = format!("{} {}", prefijo, actual.len() + 1);
            let mut fotos = actual.as_ref().clone();
            fotos.push(Foto::with_titulo(locator, titulo));
            Arc::new(fotos)
        };
        self.fotos.send_replace(next);
    }

    /// Replaces the collection with an empty snapshot. Calling it on an
    /// empty collection is fine and still notifies observers.
    #[allow(dead_code)]
    pub fn clear(&self) {
        self.fotos.send_replace(Fotos::default());
    }
}

impl Default for Galeria {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator(s: &str) -> Locator {
        Locator::from(s)
    }

    #[test]
    fn test_appends_keep_call_order() {
        let galeria = Galeria::new();
        galeria.append(Foto::with_titulo("a.jpg", "uno"));
        galeria.append(Foto::with_titulo("b.jpg", "dos"));
        galeria.append(Foto::with_titulo("c.jpg", "tres"));

        let fotos = galeria.fotos();
        assert_eq!(fotos.len(), 3);
        assert_eq!(fotos[0].titulo, "uno");
        assert_eq!(fotos[2].titulo, "tres");
    }

    #[test]
    fn test_auto_numbering_counts_after_insertion() {
        let galeria = Galeria::new();
        galeria.append_picked(locator("a.jpg"));
        galeria.append_captured(locator("b.png"));
        galeria.append_picked(locator("c.jpg"));

        let fotos = galeria.fotos();
        assert_eq!(fotos[0].titulo, "Foto 1");
        assert_eq!(fotos[1].titulo, "Cámara 2");
        assert_eq!(fotos[2].titulo, "Foto 3");
    }

    #[test]
    fn test_two_picks_scenario() {
        let galeria = Galeria::new();
        galeria.append_picked(locator("A"));
        galeria.append_picked(locator("B"));

        let esperado = vec![
            Foto::with_titulo("A", "Foto 1"),
            Foto::with_titulo("B", "Foto 2"),
        ];
        assert_eq!(*galeria.fotos(), esperado);
    }

    #[test]
    fn test_duplicates_are_permitted() {
        let galeria = Galeria::new();
        galeria.append_picked(locator("misma.jpg"));
        galeria.append_picked(locator("misma.jpg"));
        assert_eq!(galeria.len(), 2);
    }

    #[test]
    fn test_default_titulo_append() {
        let galeria = Galeria::new();
        galeria.append(Foto::new("suelta.jpg"));
        assert_eq!(galeria.fotos()[0].titulo, "Foto");
    }

    #[test]
    fn test_clear_empties_and_is_idempotent() {
        let galeria = Galeria::new();
        galeria.append_picked(locator("a.jpg"));

        galeria.clear();
        assert!(galeria.is_empty());
        galeria.clear();
        assert!(galeria.is_empty());
    }

    #[test]
    fn test_numbering_restarts_after_clear() {
        let galeria = Galeria::new();
        galeria.append_picked(locator("a.jpg"));
        galeria.clear();
        galeria.append_picked(locator("b.jpg"));
        assert_eq!(galeria.fotos()[0].titulo, "Foto 1");
    }

    #[test]
    fn test_observers_share_snapshots_across_clones() {
        let galeria = Galeria::new();
        let observador = galeria.observe();
        assert!(observador.borrow().is_empty());

        galeria.append_picked(locator("a.jpg"));
        assert_eq!(observador.borrow().len(), 1);

        // A clone is a handle onto the same collection, not a copy.
        let clon = galeria.clone();
        clon.append_picked(locator("b.jpg"));
        assert_eq!(observador.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_observer_wakes_on_mutation() {
        let galeria = Galeria::new();
        let mut observador = galeria.observe();
        // Consume the initial empty snapshot up front, as the screen does
        // on mount.
        assert!(observador.borrow_and_update().is_empty());

        galeria.append_captured(locator("captura.png"));
        observador.changed().await.unwrap();

        let fotos = observador.borrow_and_update().clone();
        assert_eq!(fotos.len(), 1);
        assert_eq!(fotos[0].titulo, "Cámara 1");
    }
}
