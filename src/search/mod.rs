//! Search module - indexing and ranking for the song corpus / 搜索模块
//!
//! Architecture principles / 架构原则：
//! - The module only exposes primitive operations: load a corpus, build an
//!   index, score a query. HTTP handlers control flow, not this module.
//! - A corpus is immutable once loaded; the cache is append-only.
//! - Call direction: api → engine → (cache, store, index, phonetic).
//!
//! Search features / 搜索特性：
//! - Exact ID lookup for quick navigation / 按编号精确跳转
//! - Case-insensitive substring matching on title and lines / 子串匹配
//! - Coarse pinyin prefix matching for Chinese text / 拼音前缀匹配

pub mod cache;
pub mod engine;
pub mod index;
pub mod phonetic;
pub mod store;

pub use engine::{SearchEngine, DEFAULT_SEARCH_LIMIT};
pub use store::{CorpusError, CorpusStore};
