//! 错误类型
//!
//! 会话中的任何错误都不致命：加载失败、无有效题目、NG 候补不足以及
//! 剪贴板失败都会被记录并以对话框或状态栏的形式呈现。

use std::fmt;
use std::io;

/// 题目数据加载失败
#[derive(Debug)]
pub enum LoadError {
    /// 读取文件失败
    Io(io::Error),
    /// JSON 格式错误
    Parse(serde_json::Error),
    /// 数据为空或不是数组
    Empty,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read topic data: {}", e),
            LoadError::Parse(e) => write!(f, "malformed topic data: {}", e),
            LoadError::Empty => write!(f, "topic data is empty"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::Empty => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Parse(e)
    }
}

/// 没有任何题目满足最少 NG 候补数
#[derive(Debug, Clone, PartialEq)]
pub struct NoValidTopicError;

impl fmt::Display for NoValidTopicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no topic has enough NG candidates")
    }
}

impl std::error::Error for NoValidTopicError {}

/// NG 候补少于 6 个（非致命，抽题继续）
#[derive(Debug, Clone, PartialEq)]
pub struct SparseBanPoolWarning {
    pub topic_id: String,
    pub pool_size: usize,
}

impl fmt::Display for SparseBanPoolWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "topic {} has only {} NG candidates",
            self.topic_id, self.pool_size
        )
    }
}

/// 单个复制策略的失败原因
#[derive(Debug)]
pub enum ClipboardError {
    /// 当前环境不支持该策略
    Unavailable(&'static str),
    /// 无法启动剪贴板命令
    Spawn(io::Error),
    /// 剪贴板命令以非零状态退出
    CommandFailed(String),
    /// 写入终端或管道失败
    Write(io::Error),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Unavailable(why) => write!(f, "clipboard unavailable: {}", why),
            ClipboardError::Spawn(e) => write!(f, "failed to spawn clipboard command: {}", e),
            ClipboardError::CommandFailed(status) => {
                write!(f, "clipboard command failed: {}", status)
            }
            ClipboardError::Write(e) => write!(f, "failed to write clipboard data: {}", e),
        }
    }
}

impl std::error::Error for ClipboardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_from_io() {
        let err: LoadError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, LoadError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_sparse_warning_message() {
        let warning = SparseBanPoolWarning {
            topic_id: "t1".to_string(),
            pool_size: 4,
        };
        assert_eq!(warning.to_string(), "topic t1 has only 4 NG candidates");
    }
}
