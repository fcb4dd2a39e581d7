use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

mod build_dictionary;

const BIN_PATH: &str = env!("CARGO_BIN_EXE_svg_to_xaml");

pub const SQUARE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16"><rect width="16" height="16" fill="#336699"/></svg>"##;
pub const CIRCLE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24"><circle cx="12" cy="12" r="10" fill="none" stroke="red" stroke-width="2"/></svg>"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let project_dir = temp_dir.path().canonicalize().expect("canonicalize temp dir");
        Self {
            _temp_dir: temp_dir,
            project_dir,
        }
    }

    /// Folder `svgs/` holding `a.svg` and `b.svg`.
    pub fn with_two_svgs() -> Self {
        let test = Self::new();
        test.write_file("svgs/a.svg", SQUARE_SVG);
        test.write_file("svgs/b.svg", CIRCLE_SVG);
        test
    }

    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.project_dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&file_path, content).expect("write file");
    }

    pub fn path(&self, path: &str) -> PathBuf {
        self.project_dir.join(path)
    }

    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path(path);
        fs::read_to_string(&file_path)
            .unwrap_or_else(|e| panic!("read {}: {}", file_path.display(), e))
    }

    pub fn build_dictionary(&self, args: &[&str]) -> Output {
        Command::new(BIN_PATH)
            .current_dir(&self.project_dir)
            .env("NO_COLOR", "1")
            .arg("build-dictionary")
            .arg("--no-progress")
            .args(args)
            .output()
            .expect("run binary")
    }
}

pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed\nstdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

pub fn img_titles(html: &str) -> Vec<String> {
    let doc = roxmltree::Document::parse(html).expect("preview is well-formed");
    doc.descendants()
        .filter(|n| n.has_tag_name("img"))
        .map(|n| n.attribute("title").unwrap_or_default().to_string())
        .collect()
}

pub fn drawing_image_keys(xaml: &str) -> Vec<String> {
    let doc = roxmltree::Document::parse(xaml).expect("xaml is well-formed");
    doc.descendants()
        .filter(|n| n.tag_name().name() == "DrawingImage")
        .filter_map(|n| n.attribute(("http://schemas.microsoft.com/winfx/2006/xaml", "Key")))
        .map(str::to_string)
        .collect()
}

pub fn exists(path: &Path) -> bool {
    path.exists()
}

#[test]
fn help_lists_build_dictionary() {
    let output = Command::new(BIN_PATH).arg("--help").output().expect("run binary");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("build-dictionary"));
}

#[test]
fn missing_required_arguments_fail() {
    let test = CliTest::new();
    let output = test.build_dictionary(&["-i", "svgs"]);
    assert!(!output.status.success());
    assert_eq!(exists(&test.path("svgs.xaml")), false);
}
