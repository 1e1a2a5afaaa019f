//! 配置加载
//!
//! 配置文件 `~/.config/featureboard/config.toml`（可用 `FEATUREBOARD_CONFIG` 覆盖）：
//! - `sort_key`: 初始排序字段，`votes` 或 `recent`
//! - `log_filter`: tracing 过滤指令
//! - `[[suggestions]]`: 启动时载入的种子建议
//!
//! 建议数据只保存在内存中，退出即丢弃；这里只读不写。

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{CommentSeed, SortKey, Status, SuggestionSeed, SuggestionStore};

const APP_DIR_NAME: &str = "featureboard";
const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "featureboard.log";

/// 覆盖配置文件路径的环境变量
pub const CONFIG_ENV: &str = "FEATUREBOARD_CONFIG";
/// 覆盖日志过滤指令的环境变量
pub const LOG_ENV: &str = "FEATUREBOARD_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sort_key: SortKey,
    pub log_filter: String,
    /// 缺省时使用内置演示数据；写 `suggestions = []` 则从空列表开始
    pub suggestions: Vec<SuggestionSeed>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sort_key: SortKey::Votes,
            log_filter: "info".to_string(),
            suggestions: vec![
                SuggestionSeed {
                    title: "Dark Mode Support".to_string(),
                    description: "Add dark mode support for better night-time viewing"
                        .to_string(),
                    votes: 15,
                    status: Status::InProgress,
                    comments: vec![CommentSeed {
                        text: "This would be great!".to_string(),
                        author: "User1".to_string(),
                    }],
                },
                SuggestionSeed {
                    title: "Mobile App".to_string(),
                    description: "Create a mobile app version".to_string(),
                    votes: 10,
                    status: Status::New,
                    comments: Vec::new(),
                },
            ],
        }
    }
}

impl Config {
    /// 种子建议的标题和描述不能为空
    pub fn validate(&self) -> Result<()> {
        for (i, seed) in self.suggestions.iter().enumerate() {
            let reason = if seed.title.is_empty() {
                "title is empty"
            } else if seed.description.is_empty() {
                "description is empty"
            } else {
                continue;
            };
            return Err(Error::InvalidSeed {
                index: i + 1,
                reason: reason.to_string(),
            });
        }
        Ok(())
    }

    pub fn into_store(self) -> SuggestionStore {
        SuggestionStore::seeded(self.sort_key, self.suggestions)
    }
}

/// 从 TOML 文件加载配置，文件不存在时使用默认值
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;

    Ok(config)
}

/// 配置文件路径 (~/.config/featureboard/config.toml)
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    Ok(dirs::config_dir()
        .ok_or(Error::NoConfigDir)?
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME))
}

/// 日志文件路径 (~/.local/share/featureboard/featureboard.log)
pub fn log_path() -> Result<PathBuf> {
    log_path_in(&dirs::data_dir().ok_or(Error::NoDataDir)?)
}

/// 在给定数据根目录下准备日志目录，不存在时创建
pub fn log_path_in(data_root: &Path) -> Result<PathBuf> {
    let data_dir = data_root.join(APP_DIR_NAME);
    fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join(LOG_FILE_NAME))
}
