//! AI 提示的会话级缓存
//!
//! 同一份代码对同一个失败用例只请求一次提示，后续直接命中缓存。
//! 缓存只存成功的提示，失败的请求不落缓存，下次可以重试。
//! 生命周期与会话一致，不做容量上限和过期淘汰。

use std::collections::HashMap;

/// 一条已获取的提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintEntry {
    pub analysis: String,
    pub hint: String,
    pub suggestions: Vec<String>,
}

/// 以缓存键索引的提示存储
#[derive(Debug, Default)]
pub struct HintCache {
    entries: HashMap<String, HintEntry>,
}

impl HintCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&HintEntry> {
        self.entries.get(key)
    }

    pub fn put(&mut self, key: String, entry: HintEntry) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
