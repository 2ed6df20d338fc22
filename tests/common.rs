#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use rattendance::db::initialize::init_db;
use rattendance::db::pool::DbPool;
use rattendance::face::{DetectorError, FacePresence, FaceRegion};
use std::env;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

/// HOME used by every CLI invocation, so the user's real config is never read.
pub fn test_home() -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push("rattendance_test_home");
    fs::create_dir_all(&path).ok();
    path
}

pub fn rti() -> Command {
    let mut cmd = cargo_bin_cmd!("rattendance");
    cmd.env("HOME", test_home())
        .env("APPDATA", test_home())
        .env_remove("RATTENDANCE_SMTP_PASSWORD");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    // WAL side files of a previous run would be replayed into the new DB
    for suffix in ["", "-wal", "-shm"] {
        fs::remove_file(format!("{db_path}{suffix}")).ok();
    }
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB through the CLI, as an operator would.
pub fn init_cli_db(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Open a fresh, initialized DB for library-level tests.
pub fn open_test_db(name: &str) -> DbPool {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

/// Solid-color PNG of the given size.
pub fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(w, h, Rgb([200, 150, 120]));
    let mut out = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .expect("encode png");
    out
}

pub fn write_png(name: &str, w: u32, h: u32) -> String {
    let p = temp_out(name, "png");
    fs::write(&p, png_bytes(w, h)).expect("write png");
    p
}

/// Detector returning a fixed number of faces (or failing), counting calls.
pub struct StubDetector {
    pub faces: usize,
    pub fail: bool,
    pub calls: usize,
}

impl StubDetector {
    pub fn with_faces(faces: usize) -> Self {
        Self {
            faces,
            fail: false,
            calls: 0,
        }
    }

    pub fn failing() -> Self {
        Self {
            faces: 0,
            fail: true,
            calls: 0,
        }
    }
}

impl FacePresence for StubDetector {
    fn detect_faces(&mut self, image: &DynamicImage) -> Result<Vec<FaceRegion>, DetectorError> {
        self.calls += 1;
        if self.fail {
            return Err(DetectorError::InferenceFailed("stub failure".into()));
        }
        Ok((0..self.faces)
            .map(|_| FaceRegion {
                x: 0.0,
                y: 0.0,
                width: image.width() as f32,
                height: image.height() as f32,
                confidence: 0.9,
            })
            .collect())
    }
}

/// Concatenated content of every zip entry whose name starts with `prefix`.
pub fn xlsx_entries(path: &Path, prefix: &str) -> String {
    let file = fs::File::open(path).expect("open xlsx");
    let mut archive = zip::ZipArchive::new(file).expect("xlsx is a zip");
    let mut out = String::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).expect("zip entry");
        if entry.name().starts_with(prefix) && entry.name().ends_with(".xml") {
            entry.read_to_string(&mut out).expect("read entry");
        }
    }
    out
}

/// Number of `<row ` elements in a worksheet XML part.
pub fn sheet_rows(path: &Path, sheet: usize) -> usize {
    xlsx_entries(path, &format!("xl/worksheets/sheet{}.xml", sheet))
        .matches("<row ")
        .count()
}

/// Number of pictures anchored on all drawings.
pub fn picture_count(path: &Path) -> usize {
    xlsx_entries(path, "xl/drawings/drawing")
        .matches("<xdr:pic>")
        .count()
}
