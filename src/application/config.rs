use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::{FindError, WalkOptions};

/// 配置文件名，位于程序同级目录
pub const CONFIG_FILE_NAME: &str = "find-by-name.toml";

/// 应用程序配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 遍历相关配置
    pub walk: WalkConfig,
    /// 日志相关配置
    pub logging: LoggingConfig,
    /// 显示相关配置
    pub display: DisplayConfig,
}

/// 遍历配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// 是否跟随符号链接
    pub follow_links: bool,
    /// 是否停留在同一文件系统
    pub same_file_system: bool,
    /// 最大遍历深度
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 是否写入调试日志和错误日志
    pub enabled: bool,
    /// 日志文件目录
    pub directory: PathBuf,
}

/// 显示配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// 遍历时是否显示进度
    pub progress: bool,
    /// 完成后是否打印摘要
    pub summary: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: PathBuf::from("."),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            progress: true,
            summary: true,
        }
    }
}

impl WalkConfig {
    pub fn options(&self) -> WalkOptions {
        WalkOptions {
            follow_links: self.follow_links,
            same_file_system: self.same_file_system,
            max_depth: self.max_depth,
        }
    }
}

impl Config {
    /// 加载配置
    ///
    /// 指定了路径时文件必须存在；否则尝试程序同级目录下的配置文件，不存在时使用默认配置。
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_config_path() {
                Ok(path) if path.is_file() => Self::load_from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载配置
    pub fn load_from_file(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("无法读取配置文件: {}", config_path.display()))?;

        let config: Config = toml::from_str(&content).map_err(|err| FindError::Config {
            path: config_path.to_path_buf(),
            reason: err.to_string(),
        })?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("无法序列化配置")?;

        fs::write(config_path, content)
            .with_context(|| format!("无法写入配置文件: {}", config_path.display()))?;

        Ok(())
    }

    /// 获取配置文件的默认路径
    pub fn default_config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("无法获取程序路径")?;
        let exe_dir = exe_path.parent().context("无法获取程序目录")?;
        Ok(exe_dir.join(CONFIG_FILE_NAME))
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.walk.max_depth == Some(0) {
            anyhow::bail!("walk.max_depth 不能为 0");
        }

        if self.logging.directory.as_os_str().is_empty() {
            anyhow::bail!("logging.directory 不能为空");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.walk.follow_links);
        assert_eq!(config.walk.max_depth, None);
        assert!(!config.logging.enabled);
        assert_eq!(config.logging.directory, PathBuf::from("."));
        assert!(config.display.progress);
        assert_eq!(config.walk.options(), WalkOptions::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[walk]\nfollow_links = true\n").unwrap();
        assert!(config.walk.follow_links);
        assert!(config.display.summary);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_config_file_operations() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut original_config = Config::default();
        original_config.walk.max_depth = Some(4);
        original_config.save_to_file(&config_path).unwrap();

        let loaded_config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let temp_dir = tempdir().unwrap();
        assert!(Config::load(Some(&temp_dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_malformed_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("bad.toml");
        fs::write(&config_path, "[walk]\nmax_depth = \"deep\"\n").unwrap();

        let err = Config::load_from_file(&config_path).unwrap_err();
        assert!(matches!(err.downcast_ref::<FindError>(), Some(FindError::Config { .. })));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.walk.max_depth = Some(0);
        assert!(config.validate().is_err());

        config = Config::default();
        config.logging.directory = PathBuf::new();
        assert!(config.validate().is_err());
    }
}
