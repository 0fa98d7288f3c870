use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::domain::error::FindError;

/// 文件名匹配方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// 完全相同的文件名（区分大小写）
    Name,
    /// 通配符掩码，支持 `*` 和 `?`
    Mask,
    /// 正则表达式，必须匹配整个文件名
    Regex,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Name => "name",
            MatchKind::Mask => "mask",
            MatchKind::Regex => "regex",
        }
    }
}

impl FromStr for MatchKind {
    type Err = FindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(MatchKind::Name),
            "mask" => Ok(MatchKind::Mask),
            "regex" => Ok(MatchKind::Regex),
            other => Err(FindError::UnsupportedMatchKind(other.to_string())),
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 编译后的文件名模式
///
/// 每次搜索只编译一次，之后对每个文件名调用 [`NamePattern::is_match`]。
#[derive(Debug, Clone)]
pub enum NamePattern {
    /// 精确比较
    Exact(String),
    /// 两端锚定的正则表达式
    Anchored(Regex),
}

impl NamePattern {
    /// 按匹配方式编译模式
    pub fn new(pattern: &str, kind: MatchKind) -> Result<Self, FindError> {
        match kind {
            MatchKind::Name => Ok(NamePattern::Exact(pattern.to_string())),
            MatchKind::Mask => compile_anchored(pattern, &mask_to_regex(pattern)),
            MatchKind::Regex => compile_anchored(pattern, pattern),
        }
    }

    /// 检查文件名是否满足模式
    pub fn is_match(&self, filename: &str) -> bool {
        match self {
            NamePattern::Exact(name) => filename == name,
            NamePattern::Anchored(regex) => regex.is_match(filename),
        }
    }
}

/// 将通配符掩码转换为正则表达式
///
/// 先逐字符转义字面量，再替换通配符：`*` 变为 `.*`，`?` 变为 `.`。
/// 掩码中没有转义通配符本身的写法，`*` 和 `?` 总是通配符。
pub fn mask_to_regex(mask: &str) -> String {
    let mut expr = String::with_capacity(mask.len() + 8);
    // 文件名中可能含有换行符，通配符同样要能匹配
    expr.push_str("(?s)");

    let mut buf = [0u8; 4];
    for ch in mask.chars() {
        match ch {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            literal => expr.push_str(&regex::escape(literal.encode_utf8(&mut buf))),
        }
    }
    expr
}

fn compile_anchored(pattern: &str, expr: &str) -> Result<NamePattern, FindError> {
    match Regex::new(&format!(r"\A(?:{})\z", expr)) {
        Ok(regex) => Ok(NamePattern::Anchored(regex)),
        // `(?x)` 模式下结尾的 `#` 注释会吞掉闭合括号，换行结束注释后重试
        Err(source) if expr.contains('#') => Regex::new(&format!("\\A(?:{}\n)\\z", expr))
            .map(NamePattern::Anchored)
            .map_err(|_| FindError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }),
        Err(source) => Err(FindError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        }),
    }
}

/// 判断单个文件名是否匹配
///
/// 每次调用都会重新编译模式；遍历目录时请使用 [`NamePattern`]。
pub fn is_match(filename: &str, pattern: &str, kind: MatchKind) -> Result<bool, FindError> {
    Ok(NamePattern::new(pattern, kind)?.is_match(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_kind_from_str() {
        assert_eq!("name".parse::<MatchKind>().unwrap(), MatchKind::Name);
        assert_eq!("mask".parse::<MatchKind>().unwrap(), MatchKind::Mask);
        assert_eq!("regex".parse::<MatchKind>().unwrap(), MatchKind::Regex);

        match "glob".parse::<MatchKind>() {
            Err(FindError::UnsupportedMatchKind(kind)) => assert_eq!(kind, "glob"),
            other => panic!("Expected UnsupportedMatchKind, got {:?}", other),
        }
        // 大小写敏感
        assert!("Mask".parse::<MatchKind>().is_err());
    }

    #[test]
    fn test_name_is_exact_and_case_sensitive() {
        assert!(is_match("a.txt", "a.txt", MatchKind::Name).unwrap());
        assert!(!is_match("a.TXT", "a.txt", MatchKind::Name).unwrap());
        // 不展开通配符
        assert!(!is_match("a.txt", "*.txt", MatchKind::Name).unwrap());
        assert!(is_match("*.txt", "*.txt", MatchKind::Name).unwrap());
    }

    #[test]
    fn test_mask_without_wildcards_is_equality() {
        for (name, mask) in [
            ("a.txt", "a.txt"),
            ("a.txt", "abtxt"),
            ("abtxt", "a.txt"),
            ("a+b(1).txt", "a+b(1).txt"),
            ("[x]{2}.rs", "[x]{2}.rs"),
            ("xx.rs", "[x]{2}.rs"),
            ("^$|", "^$|"),
        ] {
            assert_eq!(
                is_match(name, mask, MatchKind::Mask).unwrap(),
                name == mask,
                "name={} mask={}",
                name,
                mask
            );
        }
    }

    #[test]
    fn test_mask_star_matches_everything() {
        for name in ["", "a", ".hidden", "report_2024.csv", "line\nbreak"] {
            assert!(is_match(name, "*", MatchKind::Mask).unwrap(), "{:?}", name);
        }
    }

    #[test]
    fn test_mask_question_marks_count_characters() {
        let name = "data.bin";
        assert!(is_match(name, &"?".repeat(name.len()), MatchKind::Mask).unwrap());
        assert!(!is_match(name, &"?".repeat(name.len() - 1), MatchKind::Mask).unwrap());
        assert!(!is_match(name, &"?".repeat(name.len() + 1), MatchKind::Mask).unwrap());
    }

    #[test]
    fn test_mask_examples() {
        assert!(is_match("report_2024.csv", "report_*.csv", MatchKind::Mask).unwrap());
        assert!(!is_match("report2024.csv", "report_*.csv", MatchKind::Mask).unwrap());
        assert!(is_match("notes.txt", "*.txt", MatchKind::Mask).unwrap());
        assert!(!is_match("notes.txt.bak", "*.txt", MatchKind::Mask).unwrap());
        assert!(!is_match("notes_txt", "*.txt", MatchKind::Mask).unwrap());
        assert!(is_match("file1.log", "file?.log", MatchKind::Mask).unwrap());
        assert!(!is_match("file12.log", "file?.log", MatchKind::Mask).unwrap());
    }

    #[test]
    fn test_regex_is_full_match() {
        assert!(is_match("file1.log", r"file[0-9]\.log", MatchKind::Regex).unwrap());
        assert!(!is_match("xfile1.logx", r"file[0-9]\.log", MatchKind::Regex).unwrap());
        assert!(!is_match("file1.logx", r"file[0-9]\.log", MatchKind::Regex).unwrap());
        // 顶层的选择分支也必须整体锚定
        assert!(!is_match("ab", "a|b", MatchKind::Regex).unwrap());
        assert!(is_match("b", "a|b", MatchKind::Regex).unwrap());
    }

    #[test]
    fn test_verbose_regex_with_trailing_comment() {
        let pattern = "(?x)abc # trailing comment";
        assert!(is_match("abc", pattern, MatchKind::Regex).unwrap());
        assert!(!is_match("abcd", pattern, MatchKind::Regex).unwrap());
        // 普通模式下 `#` 仍是字面量
        assert!(is_match("a#b", "a#b", MatchKind::Regex).unwrap());
        assert!(matches!(
            is_match("a#", "a#(", MatchKind::Regex),
            Err(FindError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_invalid_regex() {
        match is_match("file", "file(", MatchKind::Regex) {
            Err(FindError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "file("),
            other => panic!("Expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_mask_to_regex() {
        assert_eq!(mask_to_regex("*.txt"), r"(?s).*\.txt");
        assert_eq!(mask_to_regex("a?b"), "(?s)a.b");
    }
}
