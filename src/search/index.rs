//! Search index builder / 搜索索引构建
//!
//! Runs once per song at corpus load; search never recomputes any of this.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{IndexedSong, SearchIndex, Song};

/// Token separator class for lyric lines: whitespace plus Chinese and Latin
/// punctuation / 歌词行的分词分隔符
static LINE_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s，。、,.!?]+").expect("valid separator class"));

/// Build the searchable representation of one song / 构建单首歌曲的搜索索引
///
/// The title stands in for its own phonetic rendering until a richer
/// transliteration engine is wired in; lower-casing is what substring
/// scoring actually needs.
pub fn build_index(song: &Song) -> SearchIndex {
    let mut keywords: Vec<String> = Vec::new();

    for word in song.title.split_whitespace() {
        push_keyword(&mut keywords, word);
    }
    for line in song.cn_lines.iter().chain(song.en_lines.iter()) {
        for word in LINE_SEPARATORS.split(line) {
            push_keyword(&mut keywords, word);
        }
    }

    SearchIndex {
        title_phonetic: song.title.to_lowercase(),
        cn_phonetic: song.cn_lines.iter().map(|l| l.to_lowercase()).collect(),
        keywords,
    }
}

/// Index a whole corpus in load order / 按语料顺序建立索引
pub fn build_corpus(songs: Vec<Song>) -> Vec<IndexedSong> {
    songs
        .into_iter()
        .map(|song| IndexedSong {
            index: build_index(&song),
            song,
        })
        .collect()
}

/// Tokens shorter than two characters carry no signal / 过短的词不入索引
fn push_keyword(keywords: &mut Vec<String>, word: &str) {
    if word.chars().count() >= 2 {
        keywords.push(word.to_lowercase());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_song() -> Song {
        Song {
            id: "1".to_string(),
            title: "耶稣爱我 Jesus Loves Me".to_string(),
            cn_lines: vec![
                "耶稣爱我，真是奇妙。".to_string(),
                "副歌".to_string(),
                "".to_string(),
            ],
            en_lines: vec!["Jesus loves me, this I know!".to_string()],
        }
    }

    #[test]
    fn test_title_and_lines_are_lowercased() {
        let index = build_index(&sample_song());
        assert_eq!(index.title_phonetic, "耶稣爱我 jesus loves me");
        assert_eq!(index.cn_phonetic.len(), 3);
        assert_eq!(index.cn_phonetic[0], "耶稣爱我，真是奇妙。");
        assert_eq!(index.cn_phonetic[2], "");
    }

    #[test]
    fn test_keywords_split_on_punctuation() {
        let index = build_index(&sample_song());
        assert!(index.keywords.contains(&"耶稣爱我".to_string()));
        assert!(index.keywords.contains(&"真是奇妙".to_string()));
        assert!(index.keywords.contains(&"jesus".to_string()));
        assert!(index.keywords.contains(&"know".to_string()));
        // 标点不会混进关键词
        assert!(!index.keywords.iter().any(|k| k.contains('，')));
        assert!(!index.keywords.iter().any(|k| k.contains('!')));
    }

    #[test]
    fn test_short_tokens_dropped() {
        let song = Song {
            id: "2".to_string(),
            title: "哦 O Lord".to_string(),
            cn_lines: vec!["主".to_string()],
            en_lines: vec!["I am".to_string()],
        };
        let index = build_index(&song);
        // 单字与单字母被丢弃
        assert!(!index.keywords.contains(&"哦".to_string()));
        assert!(!index.keywords.contains(&"o".to_string()));
        assert!(!index.keywords.contains(&"主".to_string()));
        assert!(!index.keywords.contains(&"i".to_string()));
        assert!(index.keywords.contains(&"lord".to_string()));
        assert!(index.keywords.contains(&"am".to_string()));
    }

    #[test]
    fn test_keywords_keep_duplicates() {
        let song = Song {
            id: "3".to_string(),
            title: "哈利路亚".to_string(),
            cn_lines: vec!["哈利路亚，哈利路亚".to_string()],
            en_lines: vec![],
        };
        let index = build_index(&song);
        let count = index
            .keywords
            .iter()
            .filter(|k| k.as_str() == "哈利路亚")
            .count();
        // 关键词是袋而非集合
        assert_eq!(count, 3);
    }

    #[test]
    fn test_build_corpus_preserves_order() {
        let songs = vec![
            Song {
                id: "1".to_string(),
                title: "a b".to_string(),
                cn_lines: vec![],
                en_lines: vec![],
            },
            Song {
                id: "2".to_string(),
                title: "c d".to_string(),
                cn_lines: vec![],
                en_lines: vec![],
            },
        ];
        let indexed = build_corpus(songs);
        assert_eq!(indexed.len(), 2);
        assert_eq!(indexed[0].song.id, "1");
        assert_eq!(indexed[1].song.id, "2");
    }
}
