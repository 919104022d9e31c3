#![allow(dead_code)]

use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use vsix_outline::Telemetry;
use zip::write::FileOptions;

/// Write a zip at `dir/name` holding `entries`; names ending in `/` become directories.
pub fn write_vsix(dir: &Path, name: &str, entries: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
    for entry in entries {
        if entry.ends_with('/') {
            zip.add_directory(*entry, FileOptions::default()).unwrap();
        } else {
            zip.start_file(*entry, FileOptions::default()).unwrap();
            zip.write_all(format!("contents of {entry}").as_bytes()).unwrap();
        }
    }
    zip.finish().unwrap();
    path
}

/// Create light and dark SVGs for each icon name under `dir/images`.
pub fn write_icons(dir: &Path, names: &[&str]) {
    for theme in ["light", "dark"] {
        let theme_dir = dir.join("images").join(theme);
        std::fs::create_dir_all(&theme_dir).unwrap();
        for name in names {
            std::fs::write(theme_dir.join(format!("{name}.svg")), "<svg/>").unwrap();
        }
    }
}

#[derive(Default)]
pub struct Recording {
    pub events: Mutex<Vec<(String, Vec<(String, String)>)>>,
    pub errors: Mutex<Vec<String>>,
}

impl Telemetry for Recording {
    fn send_event(&self, name: &str, properties: &[(&str, String)]) {
        let properties = properties
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        self.events.lock().unwrap().push((name.to_string(), properties));
    }

    fn send_error(&self, error: &(dyn Error + 'static)) {
        self.errors.lock().unwrap().push(error.to_string());
    }
}
