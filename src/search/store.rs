//! Corpus store - loads song corpora from the data directory / 语料存储
//!
//! A corpus is a JSON array of song records, published as a whole file and
//! never edited in place. Loading validates strictly at this boundary so
//! nothing downstream ever sees an untyped record.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Song;
use crate::utils::is_safe_corpus_filename;

/// Why a corpus could not be served / 语料不可用的原因
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus name {name:?} is not a plain .json filename")]
    InvalidName { name: String },

    #[error("corpus {name} could not be read: {source}")]
    Unavailable {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus {name} is not valid JSON: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("corpus {name} must be a JSON array of song records")]
    NotAnArray { name: String },
}

/// Loads raw songs from corpus files / 从语料文件加载歌曲
#[derive(Debug, Clone)]
pub struct CorpusStore {
    data_dir: PathBuf,
}

impl CorpusStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load one corpus / 加载一个语料
    ///
    /// Malformed individual records are skipped with a warning naming their
    /// index; only an unreadable, unparsable, or non-array document fails
    /// the whole corpus.
    pub async fn load(&self, corpus_id: &str) -> Result<Vec<Song>, CorpusError> {
        if !is_safe_corpus_filename(corpus_id) {
            return Err(CorpusError::InvalidName {
                name: corpus_id.to_string(),
            });
        }

        let path = self.data_dir.join(corpus_id);
        let content =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| CorpusError::Unavailable {
                    name: corpus_id.to_string(),
                    source,
                })?;

        let document: serde_json::Value =
            serde_json::from_str(&content).map_err(|source| CorpusError::Parse {
                name: corpus_id.to_string(),
                source,
            })?;

        let records = match document {
            serde_json::Value::Array(records) => records,
            _ => {
                return Err(CorpusError::NotAnArray {
                    name: corpus_id.to_string(),
                })
            }
        };

        let total = records.len();
        let mut songs = Vec::with_capacity(total);
        for (position, record) in records.into_iter().enumerate() {
            match parse_record(record) {
                Ok(song) => songs.push(song),
                Err(reason) => {
                    tracing::warn!(
                        "corpus {}: skipping malformed record at index {}: {}",
                        corpus_id,
                        position,
                        reason
                    );
                }
            }
        }

        if songs.len() < total {
            tracing::warn!(
                "corpus {}: loaded {} of {} records",
                corpus_id,
                songs.len(),
                total
            );
        }
        Ok(songs)
    }
}

/// Validate one raw record into a typed song / 校验单条歌曲记录
///
/// Also used by the upload endpoint so a corpus is checked with the same
/// rules at the door as at load time.
pub fn parse_record(record: serde_json::Value) -> Result<Song, String> {
    let song: Song = serde_json::from_value(record).map_err(|e| e.to_string())?;
    if song.id.is_empty() {
        return Err("empty id".to_string());
    }
    if song.title.is_empty() {
        return Err("empty title".to_string());
    }
    Ok(song)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(files: &[(&str, &str)]) -> (tempfile::TempDir, CorpusStore) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        let store = CorpusStore::new(dir.path());
        (dir, store)
    }

    const VALID: &str = r#"[
        {"id":"1","title":"耶稣爱我 Jesus Loves Me","cn_lines":["耶稣爱我"],"en_lines":["Jesus loves me"]},
        {"id":"2","title":"平安夜 Silent Night","cn_lines":["平安夜 圣善夜"],"en_lines":["Silent night, holy night"]}
    ]"#;

    #[tokio::test]
    async fn test_load_valid_corpus() {
        let (_dir, store) = store_with(&[("songs.json", VALID)]);
        let songs = store.load("songs.json").await.unwrap();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].id, "1");
        assert_eq!(songs[1].title, "平安夜 Silent Night");
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let (_dir, store) = store_with(&[]);
        let err = store.load("missing.json").await.unwrap_err();
        assert!(matches!(err, CorpusError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_unsafe_name_rejected() {
        let (_dir, store) = store_with(&[]);
        let err = store.load("../songs.json").await.unwrap_err();
        assert!(matches!(err, CorpusError::InvalidName { .. }));
        let err = store.load("songs.txt").await.unwrap_err();
        assert!(matches!(err, CorpusError::InvalidName { .. }));
    }

    #[tokio::test]
    async fn test_invalid_json_fails_closed() {
        let (_dir, store) = store_with(&[("bad.json", "not json at all")]);
        let err = store.load("bad.json").await.unwrap_err();
        assert!(matches!(err, CorpusError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_non_array_fails_closed() {
        let (_dir, store) = store_with(&[("obj.json", r#"{"id":"1"}"#)]);
        let err = store.load("obj.json").await.unwrap_err();
        assert!(matches!(err, CorpusError::NotAnArray { .. }));
    }

    #[tokio::test]
    async fn test_malformed_record_is_skipped() {
        let corpus = r#"[
            {"id":"1","title":"好","cn_lines":[],"en_lines":[]},
            {"id":"2","cn_lines":[],"en_lines":[]},
            {"id":"","title":"无编号","cn_lines":[],"en_lines":[]},
            {"id":"3","title":"也好","cn_lines":"不是数组","en_lines":[]},
            {"id":"4","title":"最后","cn_lines":[],"en_lines":[]}
        ]"#;
        let (_dir, store) = store_with(&[("mixed.json", corpus)]);
        let songs = store.load("mixed.json").await.unwrap();
        // 缺标题、空编号、行不是数组的记录被跳过，其余保留
        let ids: Vec<&str> = songs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }
}
