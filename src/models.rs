//! Song record and search index types / 歌曲记录与搜索索引类型

use serde::{Deserialize, Serialize};

/// Song record as stored in a corpus file / 歌曲记录
///
/// A corpus file is a JSON array of these records. `cn_lines` may contain
/// empty strings as stanza breaks and section markers such as "副歌"/"Chorus".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    /// Stable identifier, numeric-looking, also the display order / 歌曲编号
    pub id: String,
    /// Mixed-script title, Chinese then English / 中英文标题
    pub title: String,
    /// Chinese lyric lines / 中文歌词
    pub cn_lines: Vec<String>,
    /// English lyric lines, aligned with `cn_lines` by convention / 英文歌词
    pub en_lines: Vec<String>,
}

/// Derived searchable representation, rebuilt on every corpus load / 搜索索引
///
/// `keywords` is a bag, not a set: duplicates are allowed because scoring
/// only cares about presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchIndex {
    /// Lower-cased rendering of the title / 标题的小写形式
    #[serde(rename = "titlePhonetic")]
    pub title_phonetic: String,
    /// Lower-cased rendering of each Chinese line / 每行中文的小写形式
    #[serde(rename = "cnPhonetic")]
    pub cn_phonetic: Vec<String>,
    /// Lower-cased tokens of at least two characters from title and lines / 关键词
    pub keywords: Vec<String>,
}

/// A song together with its index, as returned to callers / 带索引的歌曲
///
/// Serializes as the original record shape plus a `searchIndex` field,
/// which downstream consumers are free to ignore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedSong {
    #[serde(flatten)]
    pub song: Song,
    #[serde(rename = "searchIndex")]
    pub index: SearchIndex,
}

/// Corpus file metadata for the admin file list / 语料文件信息
#[derive(Debug, Clone, Serialize)]
pub struct CorpusFileInfo {
    pub name: String,
    pub size: u64,
    pub modified: i64,
}
