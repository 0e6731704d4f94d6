//! Corpus cache - memoizes indexed corpora by filename / 语料缓存
//!
//! Append-only map from corpus identifier to an immutable indexed
//! collection. Entries live until the process ends; corpus files are
//! published artifacts, so a source change after first load is invisible
//! until restart. Concurrent first loads of the same key may duplicate
//! work; the results are identical and the last write wins.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::models::IndexedSong;

#[derive(Debug, Default)]
pub struct CorpusCache {
    entries: RwLock<HashMap<String, Arc<Vec<IndexedSong>>>>,
}

impl CorpusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously indexed corpus / 查询已索引的语料
    pub fn get(&self, corpus_id: &str) -> Option<Arc<Vec<IndexedSong>>> {
        self.entries.read().get(corpus_id).cloned()
    }

    /// Store an indexed corpus / 存入已索引的语料
    pub fn insert(&self, corpus_id: &str, songs: Arc<Vec<IndexedSong>>) {
        self.entries.write().insert(corpus_id.to_string(), songs);
    }
}
