use crate::models::Settings;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions accepted for project background images.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "bmp"];

/// Loads the persisted preferences, falling back to defaults when the file
/// does not exist yet.
pub fn load_settings(path: &Path) -> Result<Settings, Box<dyn Error>> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let json = fs::read_to_string(path)?;
    let settings = serde_json::from_str(&json)?;
    Ok(settings)
}

pub fn save_settings(settings: &Settings, path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

/// Lists the project names found in `dir` (one `.txt` file per project),
/// newest-modified first so the selector surfaces recent work.
pub fn list_projects(dir: &Path) -> Vec<String> {
    let mut entries: Vec<(String, std::time::SystemTime)> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let path = e.path();
            let name = path.file_stem()?.to_str()?.to_owned();
            if path.extension()?.to_str()? != "txt" {
                return None;
            }
            let modified = e.metadata().ok()?.modified().ok()?;
            Some((name, modified))
        })
        .collect();

    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.into_iter().map(|(name, _)| name).collect()
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Copies a chosen background image into `themes_dir` so the project file can
/// reference a path that stays valid, returning the destination path.
pub fn import_background_image(
    source: &Path,
    themes_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    if !is_supported_image(source) {
        return Err(format!(
            "unsupported image format; accepted: {}",
            SUPPORTED_IMAGE_EXTENSIONS.join(", ")
        )
        .into());
    }

    let file_name = source.file_name().ok_or("invalid image path")?;
    fs::create_dir_all(themes_dir)?;
    let dest = themes_dir.join(file_name);
    fs::copy(source, &dest)?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{File, FileTimes};
    use std::time::{Duration, SystemTime};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("todoapp-utils-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn settings_roundtrip() {
        let dir = temp_dir("settings");
        let path = dir.join("settings.json");

        assert!(!load_settings(&path).unwrap().dark_theme);

        save_settings(&Settings { dark_theme: true }, &path).unwrap();
        assert!(load_settings(&path).unwrap().dark_theme);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn projects_listed_newest_first() {
        let dir = temp_dir("projects");
        fs::write(dir.join("errands.txt"), "").unwrap();
        fs::write(dir.join("garden.txt"), "").unwrap();
        fs::write(dir.join("notes.md"), "").unwrap();

        // Backdate one file so the ordering does not depend on write timing.
        let old = SystemTime::now() - Duration::from_secs(3600);
        File::options()
            .write(true)
            .open(dir.join("errands.txt"))
            .unwrap()
            .set_times(FileTimes::new().set_modified(old))
            .unwrap();

        let projects = list_projects(&dir);
        assert_eq!(projects, vec!["garden".to_owned(), "errands".to_owned()]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn listing_a_missing_directory_is_empty() {
        let dir = std::env::temp_dir().join("todoapp-utils-none-such");
        assert!(list_projects(&dir).is_empty());
    }

    #[test]
    fn image_extension_check() {
        assert!(is_supported_image(Path::new("a/photo.PNG")));
        assert!(is_supported_image(Path::new("wall.jpeg")));
        assert!(!is_supported_image(Path::new("document.pdf")));
        assert!(!is_supported_image(Path::new("no-extension")));
    }

    #[test]
    fn background_import_copies_into_themes_dir() {
        let dir = temp_dir("import");
        let source = dir.join("skyline.png");
        fs::write(&source, b"not really a png").unwrap();

        let themes = dir.join("themes");
        let dest = import_background_image(&source, &themes).unwrap();
        assert_eq!(dest, themes.join("skyline.png"));
        assert!(dest.exists());

        assert!(import_background_image(&dir.join("readme.txt"), &themes).is_err());

        fs::remove_dir_all(&dir).ok();
    }
}
