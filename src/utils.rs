//! Corpus filename utility functions / 语料文件名工具函数

use std::path::Path;

use chrono::Utc;

/// Check that a corpus filename is safe to touch inside the data directory
/// / 检查语料文件名是否可以安全使用
///
/// Rejects path traversal and anything that is not a plain `.json` name.
pub fn is_safe_corpus_filename(name: &str) -> bool {
    if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
        return false;
    }
    name.ends_with(".json")
}

/// Insert an upload timestamp before the `.json` extension / 在扩展名前插入时间戳
pub fn timestamped_corpus_filename(name: &str) -> String {
    let stem = name.strip_suffix(".json").unwrap_or(name);
    let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S");
    format!("{}_{}.json", stem, timestamp)
}

/// Pick a filename that does not collide with an existing file / 生成不冲突的文件名
///
/// When `name` is already taken, a timestamped variant is used instead of
/// overwriting the published file.
pub fn unique_corpus_filename(data_dir: &Path, name: &str) -> String {
    if !data_dir.join(name).exists() {
        return name.to_string();
    }
    timestamped_corpus_filename(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_filenames() {
        assert!(is_safe_corpus_filename("praisesongs_data.json"));
        assert!(is_safe_corpus_filename("songs_2024.json"));
        assert!(!is_safe_corpus_filename(""));
        assert!(!is_safe_corpus_filename("songs.txt"));
        assert!(!is_safe_corpus_filename("../etc/passwd"));
        assert!(!is_safe_corpus_filename("../../songs.json"));
        assert!(!is_safe_corpus_filename("dir/songs.json"));
        assert!(!is_safe_corpus_filename("dir\\songs.json"));
    }

    #[test]
    fn test_unique_filename() {
        let dir = tempfile::tempdir().unwrap();
        // 不存在时原样返回
        assert_eq!(
            unique_corpus_filename(dir.path(), "songs.json"),
            "songs.json"
        );

        std::fs::write(dir.path().join("songs.json"), "[]").unwrap();
        let renamed = unique_corpus_filename(dir.path(), "songs.json");
        assert_ne!(renamed, "songs.json");
        assert!(renamed.starts_with("songs_"));
        assert!(renamed.ends_with(".json"));
    }
}
