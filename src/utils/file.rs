use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use log::{debug, warn};
use walkdir::WalkDir;

pub fn is_svg_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false)
}

/// 收集資料夾內的 SVG 檔案，依路徑排序
pub fn collect_svg_files(dir: &Path, recursive: bool) -> io::Result<Vec<PathBuf>> {
    let mut walker = WalkDir::new(dir).min_depth(1).follow_links(true);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let message = e.to_string();
            e.into_io_error().unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message))
        })?;
        let path = entry.path();
        if is_svg_file(path) {
            files.push(path.to_path_buf());
        } else if entry.file_type().is_file() {
            debug!("略過非 SVG 檔案：{}", path.display());
        }
    }
    files.sort();

    if files.is_empty() {
        warn!("資料夾 {} 中沒有 SVG 檔案", dir.display());
    }
    Ok(files)
}

/// 寫入文字檔，覆寫既有內容
pub fn write_text_file(path: &Path, content: &str) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn collects_svg_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("a.SVG"), "<svg/>").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.svg"), "<svg/>").unwrap();

        let flat = collect_svg_files(dir.path(), false).unwrap();
        let names: Vec<_> = flat.iter().map(|p| p.file_name().unwrap().to_string_lossy().into_owned()).collect();
        assert_eq!(names, vec!["a.SVG", "b.svg"]);

        let deep = collect_svg_files(dir.path(), true).unwrap();
        assert_eq!(deep.len(), 3);
        assert!(deep.contains(&dir.path().join("sub").join("c.svg")));
    }

    #[test]
    fn write_text_file_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xaml");
        write_text_file(&path, "first version").unwrap();
        write_text_file(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn missing_dir_is_an_error() {
        assert!(collect_svg_files(Path::new("/no/such/dir"), false).is_err());
    }
}
