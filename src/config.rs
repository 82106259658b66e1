//! 配置
//!
//! 优先级：命令行参数 > 配置文件 (~/.config/ngword/config.toml) > 默认值

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::clipboard::DEFAULT_TEMPLATE;
use crate::models::SparsePoolPolicy;
use crate::timer::{DEFAULT_DURATION_SECS, DEFAULT_WARNING_SECS};

/// 命令行参数
#[derive(Debug, Default, Parser)]
#[command(name = "ngword", version, about = "NGワードゲームの進行ツール")]
pub struct Cli {
    /// 题目 JSON 文件
    #[arg(short, long)]
    pub topics: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 每回合秒数
    #[arg(short, long)]
    pub duration: Option<u32>,

    /// NG 候补不足 6 个的题目的处理方式
    #[arg(long, value_enum)]
    pub sparse_pool: Option<SparsePoolPolicy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub topics_path: PathBuf,
    pub round_seconds: u32,
    pub warning_seconds: u32,
    pub sparse_pool: SparsePoolPolicy,
    pub copy_template: String,
    pub clipboard: ClipboardConfig,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    pub native: bool,
    pub osc52: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topics_path: PathBuf::from("topics.json"),
            round_seconds: DEFAULT_DURATION_SECS,
            warning_seconds: DEFAULT_WARNING_SECS,
            sparse_pool: SparsePoolPolicy::default(),
            copy_template: DEFAULT_TEMPLATE.to_string(),
            clipboard: ClipboardConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            native: true,
            osc52: true,
        }
    }
}

impl Config {
    /// 默认配置文件路径 (~/.config/ngword/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ngword").join("config.toml"))
    }

    /// 从 TOML 文件加载，文件不存在时使用默认值
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 解析命令行并合并配置
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match cli.config.clone().or_else(Self::default_path) {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        config.apply(cli);
        Ok(config)
    }

    pub fn apply(&mut self, cli: &Cli) {
        if let Some(path) = &cli.topics {
            self.topics_path = path.clone();
        }
        if let Some(duration) = cli.duration {
            self.round_seconds = duration;
        }
        if let Some(policy) = cli.sparse_pool {
            self.sparse_pool = policy;
        }
    }
}
