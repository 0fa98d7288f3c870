use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::AccessError;

/// 格式化持续时间
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}.{:03}s", secs, duration.subsec_millis())
    }
}

/// 创建遍历进度指示器，禁用时返回隐藏的进度条
pub fn new_progress(enabled: bool) -> Result<ProgressBar> {
    if !enabled {
        return Ok(ProgressBar::hidden());
    }

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    progress.set_message("已检查 0 文件");
    Ok(progress)
}

/// 向标准错误输出报告访问错误，不打断进度条
pub fn report_access_error(progress: &ProgressBar, error: &AccessError) {
    progress.suspend(|| eprintln!("{}", error));
}

/// 搜索摘要
#[derive(Debug)]
pub struct SearchSummary {
    pub start_time: Instant,
    pub duration: Duration,
    pub visited_files: u64,
    pub matched_files: u64,
    pub access_errors: usize,
    pub output: PathBuf,
}

impl SearchSummary {
    pub fn new(output: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            duration: Duration::ZERO,
            visited_files: 0,
            matched_files: 0,
            access_errors: 0,
            output,
        }
    }

    /// 记录结束时间
    pub fn finish(&mut self) {
        self.duration = self.start_time.elapsed();
    }

    pub fn print(&self) {
        println!("\n搜索摘要:");
        println!("----------------------------");
        println!("总用时: {}", format_duration(self.duration));
        println!("检查文件: {}", self.visited_files);
        println!("匹配文件: {}", self.matched_files);
        println!("访问错误: {}", self.access_errors);
        println!("结果文件: {}", self.output.display());
    }
}
