use anyhow::{Context, Result};

use crate::application::args::Args;
use crate::application::config::Config;
use crate::domain::{SearchOutcome, Traverser, VisitOutcome};
use crate::infrastructure::{ErrorLogger, Logger, LoggerTrait};
use crate::presentation::{new_progress, report_access_error, write_results, SearchSummary};

/// 执行一次完整的搜索：校验参数、遍历目录、写入结果文件
pub fn run(args: &Args) -> Result<SearchSummary> {
    let config = Config::load(args.config.as_deref())?;
    let request = args.validate()?;

    let logging_enabled = args.log || config.logging.enabled;
    let logger = Logger::new(logging_enabled, &config.logging.directory)?;
    let error_logger = ErrorLogger::new(logging_enabled, &config.logging.directory)?;

    if logger.is_enabled() {
        logger.log_message(&format!("搜索目录: {}", request.root.display()))?;
        logger.log_message(&format!("文件名模式: {}", request.pattern))?;
        logger.log_message(&format!("匹配方式: {}", request.kind))?;
        logger.log_message(&format!("结果文件: {}", args.output))?;
        logger.log_message(&format!("遍历选项: {:?}", config.walk.options()))?;
    }

    let mut summary = SearchSummary::new(args.output_path().to_path_buf());
    let progress = new_progress(config.display.progress && !args.quiet)?;

    let traverser = Traverser::new(config.walk.options());
    let mut outcome = SearchOutcome::default();

    for visit in traverser.visits(&request)? {
        match &visit {
            VisitOutcome::Matched(path) => {
                if logger.is_enabled() {
                    logger.log_file(path, "匹配")?;
                }
            }
            VisitOutcome::AccessError(err) => {
                report_access_error(&progress, err);
                error_logger.log_error(err)?;
            }
            VisitOutcome::Skipped => {}
        }

        outcome.record(visit);
        progress.set_message(format!("已检查 {} 文件", outcome.visited));
        progress.tick();
    }

    progress.finish_with_message(format!("完成! 已检查 {} 文件", outcome.visited));

    write_results(&outcome.matches, args.output_path())
        .context("搜索已完成，但结果无法保存")?;

    summary.finish();
    summary.visited_files = outcome.visited;
    summary.matched_files = outcome.matches.len() as u64;
    summary.access_errors = outcome.diagnostics.len();

    logger.finalize(
        summary.visited_files,
        summary.matched_files,
        summary.access_errors,
        summary.duration,
    )?;
    error_logger.finalize()?;

    if config.display.summary && !args.quiet {
        summary.print();
        error_logger.print_error_summary();
    }

    Ok(summary)
}
