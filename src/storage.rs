use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;
use crate::models::{SparsePoolPolicy, Topic, TopicStore};

/// 解析题目 JSON，必须是非空数组
pub fn parse_topics(content: &str) -> Result<Vec<Topic>, LoadError> {
    let value: Value = serde_json::from_str(content)?;
    match &value {
        Value::Array(items) if !items.is_empty() => {}
        _ => return Err(LoadError::Empty),
    }

    Ok(serde_json::from_value(value)?)
}

/// 从 JSON 文件加载题目
pub fn load_topics(path: &Path, policy: SparsePoolPolicy) -> Result<TopicStore, LoadError> {
    let content = fs::read_to_string(path)?;
    let topics = parse_topics(&content)?;
    let store = TopicStore::new(topics, policy);

    tracing::info!(
        path = %path.display(),
        total = store.topics.len(),
        valid = store.valid_count(),
        "topics loaded"
    );

    Ok(store)
}

#[cfg(test)]
pub fn write_temp(content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("ngword-{}.json", uuid::Uuid::new_v4()));
    fs::write(&path, content).unwrap();
    path
}
