//! In-memory store of received files.

use chrono::{DateTime, Utc};

/// A file received over the data channel. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferredFile {
    id: u64,
    filename: String,
    content: Vec<u8>,
    is_image: bool,
    received_at: DateTime<Utc>,
}

impl TransferredFile {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size_bytes(&self) -> usize {
        self.content.len()
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn is_image(&self) -> bool {
        self.is_image
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}

/// Insertion-ordered registry with monotonic record IDs.
///
/// Never deduplicates and has no eviction; records live until the registry
/// is dropped.
#[derive(Debug, Clone, Default)]
pub struct FileRegistry {
    files: Vec<TransferredFile>,
    next_id: u64,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new record and returns it.
    pub fn add(
        &mut self,
        filename: impl Into<String>,
        content: Vec<u8>,
        is_image: bool,
    ) -> &TransferredFile {
        let id = self.next_id;
        self.next_id += 1;
        let index = self.files.len();
        self.files.push(TransferredFile {
            id,
            filename: filename.into(),
            content,
            is_image,
            received_at: Utc::now(),
        });
        &self.files[index]
    }

    /// Looks up a record by ID.
    pub fn get(&self, id: u64) -> Option<&TransferredFile> {
        // IDs are assigned in push order, so the list is sorted by id.
        self.files
            .binary_search_by_key(&id, TransferredFile::id)
            .ok()
            .map(|i| &self.files[i])
    }

    /// Records in the order they were received.
    pub fn iter(&self) -> impl Iterator<Item = &TransferredFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut registry = FileRegistry::new();
        registry.add("b.txt", b"2".to_vec(), false);
        registry.add("a.png", b"1".to_vec(), true);

        let names: Vec<&str> = registry.iter().map(TransferredFile::filename).collect();
        assert_eq!(names, ["b.txt", "a.png"]);
    }

    #[test]
    fn duplicate_names_kept() {
        let mut registry = FileRegistry::new();
        let first = registry.add("same.txt", b"one".to_vec(), false).id();
        let second = registry.add("same.txt", b"two".to_vec(), false).id();

        assert_eq!(registry.len(), 2);
        assert_ne!(first, second);
        assert_eq!(registry.get(first).unwrap().content(), b"one");
        assert_eq!(registry.get(second).unwrap().content(), b"two");
    }

    #[test]
    fn ids_are_monotonic() {
        let mut registry = FileRegistry::new();
        let ids: Vec<u64> = (0..3)
            .map(|i| registry.add(format!("{i}.bin"), vec![], false).id())
            .collect();
        assert_eq!(ids, [0, 1, 2]);
    }

    #[test]
    fn record_fields() {
        let mut registry = FileRegistry::new();
        let before = Utc::now();
        let record = registry.add("test.txt", b"Hello World!".to_vec(), false);
        assert_eq!(record.filename(), "test.txt");
        assert_eq!(record.size_bytes(), 12);
        assert!(!record.is_image());
        assert!(record.received_at() >= before);
    }

    #[test]
    fn unknown_id() {
        let mut registry = FileRegistry::new();
        assert!(registry.is_empty());
        registry.add("x", vec![], false);
        assert!(registry.get(7).is_none());
    }
}
