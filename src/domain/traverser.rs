use std::fs;
use std::path::{Path, PathBuf};

use ignore::{DirEntry, Walk, WalkBuilder};

use crate::domain::error::{AccessError, FindError};
use crate::domain::matcher::{MatchKind, NamePattern};

/// 一次搜索请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub root: PathBuf,
    pub pattern: String,
    pub kind: MatchKind,
}

impl SearchRequest {
    /// 创建搜索请求，模式不能为空
    pub fn new(root: impl Into<PathBuf>, pattern: impl Into<String>, kind: MatchKind) -> Result<Self, FindError> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(FindError::InvalidArgument("文件名模式不能为空".to_string()));
        }
        Ok(Self {
            root: root.into(),
            pattern,
            kind,
        })
    }
}

/// 单个文件的访问结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    /// 文件名匹配
    Matched(PathBuf),
    /// 文件名不匹配
    Skipped,
    /// 条目无法访问，遍历继续
    AccessError(AccessError),
}

/// 遍历选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// 是否跟随符号链接进入目录
    pub follow_links: bool,
    /// 是否停留在根目录所在的文件系统
    pub same_file_system: bool,
    /// 最大遍历深度，`None` 表示不限制
    pub max_depth: Option<usize>,
}

/// 搜索结果：匹配路径和诊断信息
#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// 匹配的路径，按遍历顺序排列
    pub matches: Vec<PathBuf>,
    /// 遍历中遇到的访问错误
    pub diagnostics: Vec<AccessError>,
    /// 检查过的文件数
    pub visited: u64,
}

impl SearchOutcome {
    pub fn record(&mut self, outcome: VisitOutcome) {
        match outcome {
            VisitOutcome::Matched(path) => {
                self.visited += 1;
                self.matches.push(path);
            }
            VisitOutcome::Skipped => self.visited += 1,
            VisitOutcome::AccessError(err) => self.diagnostics.push(err),
        }
    }
}

impl FromIterator<VisitOutcome> for SearchOutcome {
    fn from_iter<I: IntoIterator<Item = VisitOutcome>>(iter: I) -> Self {
        let mut outcome = SearchOutcome::default();
        for visit in iter {
            outcome.record(visit);
        }
        outcome
    }
}

/// 深度优先的目录遍历器
#[derive(Debug, Clone, Default)]
pub struct Traverser {
    options: WalkOptions,
}

impl Traverser {
    pub fn new(options: WalkOptions) -> Self {
        Self { options }
    }

    /// 开始遍历，返回逐个文件的访问结果
    ///
    /// 模式在这里编译一次。根目录不存在、不是目录或无法列出内容时返回 `RootUnavailable`。
    pub fn visits(&self, request: &SearchRequest) -> Result<Visits, FindError> {
        let pattern = NamePattern::new(&request.pattern, request.kind)?;
        check_root(&request.root)?;

        let mut builder = WalkBuilder::new(&request.root);
        builder
            .standard_filters(false) // 不使用任何忽略规则
            .hidden(false)
            .follow_links(self.options.follow_links)
            .same_file_system(self.options.same_file_system)
            .max_depth(self.options.max_depth);

        Ok(Visits {
            walk: builder.build(),
            pattern,
        })
    }

    /// 遍历到结束，收集匹配路径和诊断信息
    pub fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, FindError> {
        Ok(self.visits(request)?.collect())
    }
}

fn check_root(root: &Path) -> Result<(), FindError> {
    let unavailable = |reason: String| FindError::RootUnavailable {
        path: root.to_path_buf(),
        reason,
    };

    let metadata = fs::metadata(root).map_err(|err| unavailable(err.to_string()))?;
    if !metadata.is_dir() {
        return Err(unavailable("不是目录".to_string()));
    }

    // 根目录无法列出时遍历无从开始
    fs::read_dir(root).map_err(|err| unavailable(err.to_string()))?;
    Ok(())
}

/// 遍历过程中每个文件的访问结果序列
///
/// 目录本身不会出现在序列中。
pub struct Visits {
    walk: Walk,
    pattern: NamePattern,
}

impl Visits {
    fn visit(&self, entry: &DirEntry) -> Option<VisitOutcome> {
        let file_type = entry.file_type()?;

        if file_type.is_symlink() {
            // 未跟随的符号链接：只有指向普通文件时才参与匹配
            match fs::metadata(entry.path()) {
                Ok(metadata) if metadata.is_file() => {}
                Ok(_) => return None,
                Err(err) => {
                    return Some(VisitOutcome::AccessError(AccessError::from_io(entry.path(), &err)));
                }
            }
        } else if !file_type.is_file() {
            return None;
        }

        let name = entry.file_name().to_string_lossy();
        if self.pattern.is_match(&name) {
            Some(VisitOutcome::Matched(entry.path().to_path_buf()))
        } else {
            Some(VisitOutcome::Skipped)
        }
    }
}

impl Iterator for Visits {
    type Item = VisitOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walk.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    return Some(VisitOutcome::AccessError(AccessError::from_walk_error(&err)));
                }
            };

            if let Some(outcome) = self.visit(&entry) {
                return Some(outcome);
            }
        }
    }
}

/// 使用默认遍历选项搜索 `root` 下文件名匹配的文件
pub fn search(root: &Path, pattern: &str, kind: MatchKind) -> Result<SearchOutcome, FindError> {
    let request = SearchRequest::new(root, pattern, kind)?;
    Traverser::default().search(&request)
}
