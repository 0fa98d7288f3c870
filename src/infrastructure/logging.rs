use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

/// 日志记录器trait
pub trait LoggerTrait: Send + Sync {
    fn is_enabled(&self) -> bool;
    fn log_message(&self, message: &str) -> Result<()>;
    fn log_file(&self, path: &Path, status: &str) -> Result<()>;
    fn finalize(&self, visited_files: u64, matched_files: u64, access_errors: usize, duration: std::time::Duration) -> Result<()>;
}

/// 在 `directory` 下新建 `<prefix>_<时间戳>.log`
///
/// 同一秒内已存在同名文件时追加序号，不会写入别的运行的日志。
/// 新文件以 UTF-8 BOM 开头。
pub fn create_log_file(directory: &Path, prefix: &str) -> Result<(File, PathBuf)> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();

    let mut attempt = 0u32;
    loop {
        let name = if attempt == 0 {
            format!("{}_{}.log", prefix, timestamp)
        } else {
            format!("{}_{}_{}.log", prefix, timestamp, attempt)
        };
        let path = directory.join(name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                // 写入UTF-8 BOM以确保文件被正确识别为UTF-8
                file.write_all(&[0xEF, 0xBB, 0xBF])?;
                return Ok((file, path));
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(err) => {
                return Err(err).with_context(|| format!("无法创建日志文件: {}", path.display()));
            }
        }
    }
}

/// 调试日志记录器（记录搜索参数、匹配文件和摘要）
pub struct Logger {
    log_file: Option<File>,
    log_path: PathBuf,
    enabled: bool,
}

impl Logger {
    /// 创建新的日志记录器，日志文件位于 `directory` 下
    pub fn new(enabled: bool, directory: &Path) -> Result<Self> {
        if !enabled {
            return Ok(Self::disabled());
        }

        let (mut file, log_path) = create_log_file(directory, "debug")?;

        writeln!(file, "# find-by-name 调试日志")?;
        writeln!(file, "# 开始时间: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(file, "# --------------------------------------------")?;

        Ok(Self {
            log_file: Some(file),
            log_path,
            enabled: true,
        })
    }

    pub fn disabled() -> Self {
        Self {
            log_file: None,
            log_path: PathBuf::new(),
            enabled: false,
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    fn write_line(&self, line: &str) -> Result<()> {
        if let Some(mut file) = self.log_file.as_ref() {
            writeln!(file, "{}", line)?;
            file.flush()?;
        }
        Ok(())
    }
}

impl LoggerTrait for Logger {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn log_message(&self, message: &str) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        self.write_line(&format!("[{}] {}", timestamp, message))
    }

    fn log_file(&self, path: &Path, status: &str) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        self.write_line(&format!("[{}] 文件: {} | 状态: {}", timestamp, path.display(), status))
    }

    fn finalize(&self, visited_files: u64, matched_files: u64, access_errors: usize, duration: std::time::Duration) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let now = Local::now();
        self.write_line("# --------------------------------------------")?;
        self.write_line(&format!("# 搜索完成时间: {}", now.format("%Y-%m-%d %H:%M:%S")))?;
        self.write_line(&format!("# 总用时: {:.3}秒", duration.as_secs_f64()))?;
        self.write_line(&format!("# 检查文件数: {}", visited_files))?;
        self.write_line(&format!("# 匹配文件数: {}", matched_files))?;
        self.write_line(&format!("# 访问错误数: {}", access_errors))?;
        self.write_line("# ============================================")
    }
}
