use std::error::Error as _;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// 搜索过程中的致命错误
///
/// 单个条目的访问失败不属于此类型，见 [`AccessError`](crate::domain::AccessError)。
#[derive(Error, Debug)]
pub enum FindError {
    /// 命令行参数缺失或格式错误
    #[error("无效的参数: {0}")]
    InvalidArgument(String),

    /// 搜索根目录不存在、不是目录或无法开始遍历
    #[error("无法访问搜索目录 {}: {reason}", .path.display())]
    RootUnavailable { path: PathBuf, reason: String },

    /// 未知的匹配类型
    #[error("不支持的匹配类型: '{0}' (可选值: name, mask, regex)")]
    UnsupportedMatchKind(String),

    /// 正则表达式（或由掩码转换得到的表达式）无法编译
    #[error("无效的匹配模式 '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// 结果文件无法创建或写入
    #[error("无法写入结果文件 {}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 配置文件错误
    #[error("配置文件错误 {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

/// 访问错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// 没有读取权限
    PermissionDenied,
    /// 文件在遍历过程中消失，或符号链接指向不存在的目标
    NotFound,
    /// 符号链接循环
    SymlinkLoop,
    /// 其他 IO 错误
    Io,
    /// 遍历器报告的其他错误
    Other,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::PermissionDenied => "权限不足",
            ErrorType::NotFound => "文件不存在",
            ErrorType::SymlinkLoop => "符号链接循环",
            ErrorType::Io => "IO错误",
            ErrorType::Other => "其他",
        }
    }

    fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => ErrorType::PermissionDenied,
            io::ErrorKind::NotFound => ErrorType::NotFound,
            _ => ErrorType::Io,
        }
    }
}

/// 单个条目的访问失败
///
/// 不会中断遍历，只作为诊断信息收集。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessError {
    /// 出错的路径，遍历器无法给出路径时为空
    pub path: PathBuf,
    pub kind: ErrorType,
    pub message: String,
}

impl AccessError {
    pub fn from_io(path: &Path, err: &io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: ErrorType::from_io(err),
            message: os_message(err),
        }
    }

    /// 从遍历器错误中提取路径和原因
    pub fn from_walk_error(err: &ignore::Error) -> Self {
        Self::unwrap_walk_error(err, None)
    }

    fn unwrap_walk_error(err: &ignore::Error, path: Option<&Path>) -> Self {
        match err {
            ignore::Error::WithPath { path, err } => Self::unwrap_walk_error(err, Some(path)),
            ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
                Self::unwrap_walk_error(err, path)
            }
            ignore::Error::Loop { child, .. } => Self {
                path: child.clone(),
                kind: ErrorType::SymlinkLoop,
                message: err.to_string(),
            },
            ignore::Error::Io(io_err) => Self::from_io(path.unwrap_or(Path::new("")), io_err),
            other => Self {
                path: path.map(Path::to_path_buf).unwrap_or_default(),
                kind: ErrorType::Other,
                message: other.to_string(),
            },
        }
    }
}

/// 取最内层的系统错误信息
///
/// 遍历器把自己的错误包装进 `io::Error`，外层信息里已经带有路径。
fn os_message(err: &io::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.get_ref().and_then(|inner| inner.source());
    while let Some(inner) = source {
        message = inner.to_string();
        source = inner.source();
    }
    message
}

impl std::fmt::Display for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to access file: {} ({})", self.path.display(), self.message)
    }
}
