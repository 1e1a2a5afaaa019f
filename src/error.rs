//! 错误类型
//!
//! 建议仓库本身的操作都是全函数，不会失败；
//! 这里只覆盖进程边界：配置加载、终端与文件 I/O。

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot determine the user config directory")]
    NoConfigDir,

    #[error("cannot determine the user data directory")]
    NoDataDir,

    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid seed suggestion #{index}: {reason}")]
    InvalidSeed { index: usize, reason: String },

    #[error("invalid sort key: '{0}'\n  hint: valid keys are: votes, recent")]
    InvalidSortKey(String),

    #[error("invalid status: '{0}'\n  hint: valid statuses are: new, in-progress, completed")]
    InvalidStatus(String),
}

pub type Result<T> = std::result::Result<T, Error>;
