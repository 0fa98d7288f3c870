use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use find_by_name::application::{self, Args};

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let summary = application::run(&args)?;

    // 没有任何匹配且有条目无法访问时，结果可能不完整
    if summary.matched_files == 0 && summary.access_errors > 0 {
        eprintln!("未找到匹配文件，且有 {} 个条目无法访问", summary.access_errors);
        return Ok(ExitCode::from(3));
    }

    Ok(ExitCode::SUCCESS)
}
