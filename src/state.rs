//! Shared application state / 应用共享状态

use parking_lot::RwLock;

use praisesongs_backend::config::{save_corpus_config, AppConfig, CorpusConfig};
use praisesongs_backend::search::SearchEngine;

pub struct AppState {
    pub config: AppConfig,
    pub engine: SearchEngine,
    /// Active-corpus pointer, mirrored to `<data_dir>/config.json` / 当前语料指针
    corpus: RwLock<CorpusConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, corpus: CorpusConfig) -> Self {
        let engine = SearchEngine::new(config.get_data_dir());
        Self {
            config,
            engine,
            corpus: RwLock::new(corpus),
        }
    }

    /// The corpus end users browse and search / 当前生效的语料
    pub fn active_corpus(&self) -> String {
        self.corpus.read().active_file.clone()
    }

    /// Switch the active corpus and persist the pointer / 切换并持久化当前语料
    pub fn set_active_corpus(&self, active_file: String) -> Result<(), String> {
        let updated = CorpusConfig {
            active_file: active_file.clone(),
        };
        save_corpus_config(&self.config.get_data_dir(), &updated)?;
        self.corpus.write().active_file = active_file;
        Ok(())
    }
}
