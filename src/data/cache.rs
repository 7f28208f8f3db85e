use std::sync::Arc;

use crate::error::Result;

use super::loader::Loader;
use super::model::Dataset;
use super::normalize::normalize;

/// Holds the loaded dataset for the lifetime of a session.
///
/// Loading happens once; the dataset is then shared read-only through `Arc`.
/// A manual upload [`replace`](DatasetCache::replace)s it, and every change
/// bumps `generation` so views know to reset their selections.
#[derive(Debug, Default)]
pub struct DatasetCache {
    current: Option<Arc<Dataset>>,
    source: Option<String>,
    generation: u64,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset, loading and normalizing it on first use.
    pub fn get_or_load(&mut self, loader: &Loader, base_column: &str) -> Result<Arc<Dataset>> {
        if let Some(ds) = &self.current {
            return Ok(Arc::clone(ds));
        }
        let loaded = loader.load()?;
        let dataset = normalize(loaded.raw, base_column)?;
        Ok(self.replace(dataset, loaded.source))
    }

    /// Install a new dataset (e.g. after an upload) and return it.
    pub fn replace(&mut self, dataset: Dataset, source: String) -> Arc<Dataset> {
        let ds = Arc::new(dataset);
        self.current = Some(Arc::clone(&ds));
        self.source = Some(source);
        self.generation += 1;
        ds
    }

    /// Drop the cached dataset; the next `get_or_load` reloads.
    pub fn invalidate(&mut self) {
        if self.current.take().is_some() {
            self.generation += 1;
        }
        self.source = None;
    }

    pub fn get(&self) -> Option<Arc<Dataset>> {
        self.current.clone()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::data::loader::DatasetSource;
    use crate::data::model::{CellValue, RawDataset};
    use crate::error::DataError;

    struct Counting(Arc<AtomicUsize>);

    impl DatasetSource for Counting {
        fn name(&self) -> String {
            "counting".into()
        }

        fn fetch(&self) -> anyhow::Result<RawDataset> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(RawDataset::new(
                vec!["TNB Model".into(), "Titus".into()],
                vec![vec![CellValue::Integer(1), CellValue::Null]],
            ))
        }
    }

    #[test]
    fn loads_once_and_shares() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = Loader::new().with_source(Counting(Arc::clone(&calls)));
        let mut cache = DatasetCache::new();

        let a = cache.get_or_load(&loader, "TNB Model").unwrap();
        let b = cache.get_or_load(&loader, "TNB Model").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.source(), Some("counting"));
        assert_eq!(cache.generation(), 1);
    }

    #[test]
    fn replace_and_invalidate_bump_generation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = Loader::new().with_source(Counting(Arc::clone(&calls)));
        let mut cache = DatasetCache::new();
        cache.get_or_load(&loader, "TNB Model").unwrap();

        let uploaded = Dataset {
            columns: vec!["TNB Model".into()],
            rows: Vec::new(),
        };
        let ds = cache.replace(uploaded, "upload".into());
        assert!(ds.is_empty());
        assert_eq!(cache.generation(), 2);

        cache.invalidate();
        assert!(cache.get().is_none());
        assert_eq!(cache.generation(), 3);

        cache.get_or_load(&loader, "TNB Model").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn missing_base_column_leaves_cache_empty() {
        let loader = Loader::new().with_source(Counting(Arc::new(AtomicUsize::new(0))));
        let mut cache = DatasetCache::new();
        let err = cache.get_or_load(&loader, "Price").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(_)));
        assert!(cache.get().is_none());
        assert_eq!(cache.generation(), 0);
    }
}
