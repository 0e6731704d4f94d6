//! Coarse phonetic matching for Chinese text / 中文粗略拼音匹配
//!
//! A finite table maps common characters to approximate pinyin tokens so
//! that a Latin-alphabet query can reach Chinese lyrics without typing the
//! characters. This is not a transliteration engine: characters outside the
//! table simply contribute no phonetic signal, and exact substring matching
//! still applies to them.

/// Approximate pinyin tokens for one character: full syllable then initial
/// / 单字的近似拼音：全拼与声母
///
/// The vocabulary covers the characters that dominate this corpus
/// (devotional terms, pronouns, frequent verbs). Swap this table for a real
/// transliteration library without touching [`matches`].
pub fn phonetic_tokens(c: char) -> &'static [&'static str] {
    match c {
        '的' => &["de", "d"],
        '是' => &["shi", "s"],
        '在' => &["zai", "z"],
        '有' => &["you", "y"],
        '不' => &["bu", "b"],
        '了' => &["le", "l"],
        '人' => &["ren", "r"],
        '我' => &["wo", "w"],
        '他' => &["ta", "t"],
        '她' => &["ta", "t"],
        '它' => &["ta", "t"],
        '们' => &["men", "m"],
        '这' => &["zhe", "z"],
        '那' => &["na", "n"],
        '你' => &["ni", "n"],
        '爱' => &["ai", "a"],
        '神' => &["shen", "s"],
        '主' => &["zhu", "z"],
        '耶' => &["ye", "y"],
        '稣' => &["su", "s"],
        '基' => &["ji", "j"],
        '督' => &["du", "d"],
        '圣' => &["sheng", "s"],
        '灵' => &["ling", "l"],
        '恩' => &["en", "e"],
        '赐' => &["ci", "c"],
        '救' => &["jiu", "j"],
        '赎' => &["shu", "s"],
        '赞' => &["zan", "z"],
        '美' => &["mei", "m"],
        '荣' => &["rong", "r"],
        '光' => &["guang", "g"],
        '和' => &["he", "h"],
        '平' => &["ping", "p"],
        '安' => &["an", "a"],
        '喜' => &["xi", "x"],
        '乐' => &["le", "l"],
        '福' => &["fu", "f"],
        '气' => &["qi", "q"],
        '力' => &["li", "l"],
        '量' => &["liang", "l"],
        '心' => &["xin", "x"],
        '手' => &["shou", "s"],
        '脚' => &["jiao", "j"],
        '口' => &["kou", "k"],
        '眼' => &["yan", "y"],
        '耳' => &["er", "e"],
        '声' => &["sheng", "s"],
        '音' => &["yin", "y"],
        '歌' => &["ge", "g"],
        '唱' => &["chang", "c"],
        '祷' => &["dao", "d"],
        '告' => &["gao", "g"],
        _ => &[],
    }
}

/// Phonetic-tolerant containment check / 拼音容错的包含检查
///
/// True on a direct case-insensitive substring hit. Otherwise true when any
/// table token of any character in `text` and the lower-cased query are
/// mutual prefixes: the user may have typed only the start of a syllable,
/// or typed past the end of our coarse approximation. O(len(text)).
pub fn matches(text: &str, query: &str) -> bool {
    let text_lower = text.to_lowercase();
    let query_lower = query.to_lowercase();

    // 直接子串命中
    if text_lower.contains(&query_lower) {
        return true;
    }

    for ch in text.chars() {
        for token in phonetic_tokens(ch) {
            if token.starts_with(query_lower.as_str()) || query_lower.starts_with(token) {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_substring() {
        assert!(matches("耶稣爱我", "耶稣"));
        assert!(matches("Jesus Loves Me", "jesus"));
        assert!(matches("Jesus Loves Me", "LOVES"));
        assert!(!matches("平安夜", "耶稣"));
    }

    #[test]
    fn test_query_is_prefix_of_token() {
        // "sh" 是 "shen" 的前缀
        assert!(matches("神爱世人", "sh"));
        assert!(matches("神爱世人", "shen"));
    }

    #[test]
    fn test_token_is_prefix_of_query() {
        // 表中 "ye" 是查询 "yesu" 的前缀
        assert!(matches("耶稣爱我", "yesu"));
    }

    #[test]
    fn test_untabled_characters_have_no_signal() {
        // 砼 不在表中，只能精确匹配
        assert!(!matches("砼", "tong"));
        assert!(matches("砼", "砼"));
    }

    #[test]
    fn test_initial_only_query() {
        assert!(matches("赞美诗", "z"));
        assert!(!matches("平安夜", "q"));
    }
}
