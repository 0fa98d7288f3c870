use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;

use crate::domain::{AccessError, ErrorType};
use crate::infrastructure::logging::create_log_file;

/// 访问错误日志记录器
///
/// 错误总是计数；只有启用时才写入 `error_<时间戳>.log`。
pub struct ErrorLogger {
    error_file: Option<File>,
    error_path: PathBuf,
    enabled: bool,
    error_counts: RefCell<HashMap<ErrorType, usize>>,
}

impl ErrorLogger {
    /// 创建新的错误日志记录器
    pub fn new(enabled: bool, directory: &Path) -> Result<Self> {
        if !enabled {
            return Ok(Self {
                error_file: None,
                error_path: PathBuf::new(),
                enabled: false,
                error_counts: RefCell::new(HashMap::new()),
            });
        }

        let (mut file, error_path) = create_log_file(directory, "error")?;

        writeln!(file, "# find-by-name 错误日志")?;
        writeln!(file, "# 开始时间: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(file, "# ============================================")?;
        writeln!(file)?;

        Ok(Self {
            error_file: Some(file),
            error_path,
            enabled: true,
            error_counts: RefCell::new(HashMap::new()),
        })
    }

    pub fn error_path(&self) -> &Path {
        &self.error_path
    }

    /// 记录一次访问错误
    pub fn log_error(&self, error: &AccessError) -> Result<()> {
        *self.error_counts.borrow_mut().entry(error.kind).or_insert(0) += 1;

        if !self.enabled {
            return Ok(());
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        if let Some(mut file) = self.error_file.as_ref() {
            writeln!(file, "[{}] {}", timestamp, error.kind.as_str())?;
            writeln!(file, "  文件路径: {}", error.path.display())?;
            writeln!(file, "  详细信息: {}", error.message)?;
            writeln!(file)?;
            file.flush()?;
        }

        Ok(())
    }

    /// 获取错误统计信息
    pub fn get_error_summary(&self) -> HashMap<ErrorType, usize> {
        self.error_counts.borrow().clone()
    }

    /// 获取总错误数
    pub fn get_total_errors(&self) -> usize {
        self.error_counts.borrow().values().sum()
    }

    pub fn has_errors(&self) -> bool {
        self.get_total_errors() > 0
    }

    /// 完成错误日志记录
    pub fn finalize(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let summary = self.get_error_summary();
        let total = self.get_total_errors();

        if let Some(mut file) = self.error_file.as_ref() {
            writeln!(file, "# ============================================")?;
            writeln!(file, "# 结束时间: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;

            if summary.is_empty() {
                writeln!(file, "# 无错误记录")?;
            } else {
                writeln!(file, "# 错误统计:")?;
                for (error_type, count) in &summary {
                    writeln!(file, "#   {}: {} 次", error_type.as_str(), count)?;
                }
                writeln!(file, "#   总计: {} 个错误", total)?;
            }

            file.flush()?;
        }

        Ok(())
    }

    /// 打印错误摘要到控制台
    pub fn print_error_summary(&self) {
        if !self.has_errors() {
            return;
        }

        println!("\n搜索过程中有条目无法访问:");
        println!("----------------------------");

        for (error_type, count) in &self.get_error_summary() {
            println!("  {}: {} 次", error_type.as_str(), count);
        }

        println!("  总计: {} 个错误", self.get_total_errors());
        if self.enabled {
            println!("  详细错误信息请查看: {}", self.error_path.display());
        }
    }
}
