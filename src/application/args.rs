use std::path::{Path, PathBuf};

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

use crate::domain::{FindError, MatchKind, SearchRequest};

/// 按文件名在目录树中查找文件，并把匹配路径写入结果文件
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// 要搜索的目录
    #[clap(short = 'd', value_name = "DIRECTORY", value_parser = NonEmptyStringValueParser::new())]
    pub directory: String,

    /// 文件名模式
    #[clap(short = 'n', value_name = "PATTERN", value_parser = NonEmptyStringValueParser::new())]
    pub name: String,

    /// 匹配方式: mask, name 或 regex
    #[clap(short = 't', value_name = "TYPE", value_parser = NonEmptyStringValueParser::new())]
    pub kind: String,

    /// 结果文件，每次运行都会覆盖
    #[clap(short = 'o', value_name = "OUTPUT", value_parser = NonEmptyStringValueParser::new())]
    pub output: String,

    /// 配置文件路径 (默认读取程序同级目录下的 find-by-name.toml)
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// 启用日志记录，日志文件保存到配置的日志目录
    #[clap(long)]
    pub log: bool,

    /// 不显示进度和摘要
    #[clap(short, long)]
    pub quiet: bool,
}

impl Args {
    /// 校验参数并生成搜索请求
    pub fn validate(&self) -> Result<SearchRequest, FindError> {
        for (flag, value) in [
            ("-d", &self.directory),
            ("-n", &self.name),
            ("-t", &self.kind),
            ("-o", &self.output),
        ] {
            if value.is_empty() {
                return Err(FindError::InvalidArgument(format!("参数 {} 的值不能为空", flag)));
            }
        }

        let root = Path::new(&self.directory);
        if !root.exists() {
            return Err(FindError::InvalidArgument(format!("目录不存在: {}", root.display())));
        }
        if !root.is_dir() {
            return Err(FindError::InvalidArgument(format!("不是目录: {}", root.display())));
        }

        let kind: MatchKind = self.kind.parse()?;
        SearchRequest::new(root, self.name.as_str(), kind)
    }

    pub fn output_path(&self) -> &Path {
        Path::new(&self.output)
    }
}
