use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::domain::FindError;

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// 将匹配路径写入结果文件，每行一个，覆盖已有内容
pub fn write_results(paths: &[PathBuf], output: &Path) -> Result<(), FindError> {
    let to_error = |source: std::io::Error| FindError::OutputWrite {
        path: output.to_path_buf(),
        source,
    };

    let file = File::create(output).map_err(to_error)?;
    let mut writer = BufWriter::new(file);

    for path in paths {
        write!(writer, "{}{}", path.display(), LINE_ENDING).map_err(to_error)?;
    }

    writer.flush().map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_write_results_overwrites() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("result.txt");
        fs::write(&output, "stale content\nmore stale content\n").unwrap();

        let paths = vec![PathBuf::from("a/one.txt"), PathBuf::from("two.txt")];
        write_results(&paths, &output).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["a/one.txt", "two.txt"]);
        assert!(content.ends_with(LINE_ENDING));
    }

    #[test]
    fn test_write_empty_results() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("result.txt");

        write_results(&[], &output).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn test_write_error() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("missing").join("result.txt");

        match write_results(&[PathBuf::from("a")], &output) {
            Err(FindError::OutputWrite { path, .. }) => assert_eq!(path, output),
            other => panic!("Expected OutputWrite, got {:?}", other),
        }
    }
}
