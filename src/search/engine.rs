//! Ranking engine - scores songs against free-text queries / 排序引擎
//!
//! Every signal is binary: it either fires at its fixed weight or adds
//! nothing. Scores sum across signals, zero-score songs are dropped, and
//! ties keep corpus order (the sort is stable), so repeated calls return
//! identical output.

use std::sync::Arc;

use crate::models::IndexedSong;

use super::cache::CorpusCache;
use super::index::build_corpus;
use super::phonetic;
use super::store::CorpusStore;

/// Result count when the caller does not give one / 默认返回结果数
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Exact ID match, for quick navigation / 编号精确匹配
const WEIGHT_ID_EXACT: u32 = 200;
/// Query is a substring of the title / 标题子串
const WEIGHT_TITLE_SUBSTRING: u32 = 100;
/// Phonetic match anywhere in the Chinese body / 中文歌词拼音匹配
const WEIGHT_PHONETIC_BODY: u32 = 50;
/// Query is a substring of some Chinese line / 中文行子串
const WEIGHT_CN_LINE_SUBSTRING: u32 = 40;
/// Query is a substring of some English line / 英文行子串
const WEIGHT_EN_LINE_SUBSTRING: u32 = 40;
/// Phonetic match on the title, queries of 2+ characters only / 标题拼音匹配
const WEIGHT_PHONETIC_TITLE: u32 = 30;

/// Search engine over cached, indexed corpora / 基于缓存索引语料的搜索引擎
///
/// Owns its store and cache explicitly so tests can construct one per
/// temporary directory; there is no hidden global state.
pub struct SearchEngine {
    store: CorpusStore,
    cache: CorpusCache,
}

impl SearchEngine {
    pub fn new(data_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            store: CorpusStore::new(data_dir),
            cache: CorpusCache::new(),
        }
    }

    /// Fetch a corpus, indexing it on first access / 获取语料，首次访问时建立索引
    ///
    /// A corpus that fails to load degrades to an empty collection so the
    /// caller can still render an empty state. Failures are not cached:
    /// the next request retries the source.
    pub async fn corpus(&self, corpus_id: &str) -> Arc<Vec<IndexedSong>> {
        if let Some(songs) = self.cache.get(corpus_id) {
            return songs;
        }

        match self.store.load(corpus_id).await {
            Ok(songs) => {
                let indexed = Arc::new(build_corpus(songs));
                self.cache.insert(corpus_id, indexed.clone());
                tracing::info!("corpus {} indexed: {} songs", corpus_id, indexed.len());
                indexed
            }
            Err(e) => {
                tracing::warn!("corpus {} degraded to empty: {}", corpus_id, e);
                Arc::new(Vec::new())
            }
        }
    }

    /// Rank songs against a query / 按查询对歌曲排序
    ///
    /// An empty or whitespace-only query is a browse: the first `limit`
    /// songs in corpus order, unranked.
    pub async fn search(&self, query: &str, corpus_id: &str, limit: usize) -> Vec<IndexedSong> {
        let songs = self.corpus(corpus_id).await;

        if query.trim().is_empty() {
            return songs.iter().take(limit).cloned().collect();
        }

        let query_lower = query.to_lowercase();
        let mut scored: Vec<(u32, &IndexedSong)> = songs
            .iter()
            .filter_map(|entry| {
                let score = score_song(entry, query, &query_lower);
                (score > 0).then_some((score, entry))
            })
            .collect();

        // 稳定排序：同分歌曲保持语料顺序
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .take(limit)
            .map(|(_, entry)| entry.clone())
            .collect()
    }

    /// Direct lookup by song ID, first match wins / 按编号查找，重复编号取首个
    pub async fn song_by_id(&self, id: &str, corpus_id: &str) -> Option<IndexedSong> {
        self.corpus(corpus_id)
            .await
            .iter()
            .find(|entry| entry.song.id == id)
            .cloned()
    }
}

/// Sum the independent relevance signals for one song / 计算单首歌曲的相关性得分
fn score_song(entry: &IndexedSong, query: &str, query_lower: &str) -> u32 {
    let song = &entry.song;
    let index = &entry.index;
    let mut score = 0;

    if song.id == query {
        score += WEIGHT_ID_EXACT;
    }

    if index.title_phonetic.contains(query_lower) {
        score += WEIGHT_TITLE_SUBSTRING;
    }

    if phonetic::matches(&song.cn_lines.join(" "), query) {
        score += WEIGHT_PHONETIC_BODY;
    }

    if index.cn_phonetic.iter().any(|line| line.contains(query_lower)) {
        score += WEIGHT_CN_LINE_SUBSTRING;
    }

    if song
        .en_lines
        .iter()
        .any(|line| line.to_lowercase().contains(query_lower))
    {
        score += WEIGHT_EN_LINE_SUBSTRING;
    }

    if query.chars().count() >= 2 && phonetic::matches(&song.title, query) {
        score += WEIGHT_PHONETIC_TITLE;
    }

    score
}
