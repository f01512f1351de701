use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, warn};

/// File extensions recognized as images, matched case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Picks and lists image files from a single configured directory.
///
/// Selected files are exposed as web paths of the form `/images/<filename>`,
/// matching the route the directory is served under. The RNG is owned by the
/// resolver so selection can be seeded in tests.
pub struct ImageResolver {
    images_dir: PathBuf,
    rng: Mutex<StdRng>,
}

impl ImageResolver {
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Resolver with a deterministic RNG.
    pub fn with_seed(images_dir: impl Into<PathBuf>, seed: u64) -> Self {
        Self {
            images_dir: images_dir.into(),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Picks one image file uniformly at random from the images directory.
    ///
    /// Returns `None` when the directory holds no eligible files. A missing
    /// directory is created on the way out so later uploads have somewhere to
    /// land; failures to read or create it are logged and treated as "no
    /// image available".
    pub fn pick_random_image(&self) -> Option<String> {
        if !self.images_dir.is_dir() {
            match fs::create_dir_all(&self.images_dir) {
                Ok(()) => info!("📁 Created images directory: {}", self.images_dir.display()),
                Err(e) => warn!(
                    "Could not create images directory {}: {}",
                    self.images_dir.display(),
                    e
                ),
            }
            return None;
        }

        let images = self.eligible_files();
        if images.is_empty() {
            return None;
        }

        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let picked = &images[rng.gen_range(0..images.len())];
        Some(format!("/images/{picked}"))
    }

    /// Lists every eligible image in directory-listing order, no randomness.
    ///
    /// Returns an empty list when the directory is missing or unreadable.
    pub fn list_all_images(&self) -> Vec<String> {
        self.eligible_files()
            .into_iter()
            .map(|name| format!("/images/{name}"))
            .collect()
    }

    fn eligible_files(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.images_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Could not read images directory {}: {}",
                    self.images_dir.display(),
                    e
                );
                return Vec::new();
            }
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_image_file(name))
            .collect()
    }
}

/// True when the filename carries a recognized image extension.
pub fn is_image_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &std::path::Path, name: &str) {
        fs::write(dir.join(name), b"data").unwrap();
    }

    #[test]
    fn test_list_filters_by_extension() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a.png");
        touch(dir.path(), "b.jpg");
        touch(dir.path(), "c.txt");
        touch(dir.path(), "d.bmp");

        let resolver = ImageResolver::with_seed(dir.path(), 1);
        let mut images = resolver.list_all_images();
        images.sort();
        assert_eq!(images, vec!["/images/a.png", "/images/b.jpg"]);
    }

    #[test]
    fn test_list_is_stable_across_calls() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a.png");
        touch(dir.path(), "b.GIF");

        let resolver = ImageResolver::with_seed(dir.path(), 1);
        assert_eq!(resolver.list_all_images(), resolver.list_all_images());
        assert_eq!(resolver.list_all_images().len(), 2);
    }

    #[test]
    fn test_pick_returns_none_without_eligible_files() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "notes.txt");

        let resolver = ImageResolver::with_seed(dir.path(), 1);
        assert_eq!(resolver.pick_random_image(), None);
    }

    #[test]
    fn test_pick_never_returns_filtered_out_files() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "a.png");
        touch(dir.path(), "c.txt");

        let resolver = ImageResolver::with_seed(dir.path(), 7);
        for _ in 0..50 {
            assert_eq!(resolver.pick_random_image(), Some("/images/a.png".into()));
        }
    }

    #[test]
    fn test_pick_is_deterministic_with_seed() {
        let dir = tempdir().unwrap();
        for name in ["a.png", "b.png", "c.png", "d.png"] {
            touch(dir.path(), name);
        }

        let first: Vec<_> = {
            let resolver = ImageResolver::with_seed(dir.path(), 42);
            (0..10).map(|_| resolver.pick_random_image()).collect()
        };
        let second: Vec<_> = {
            let resolver = ImageResolver::with_seed(dir.path(), 42);
            (0..10).map(|_| resolver.pick_random_image()).collect()
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_pick_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("images");

        let resolver = ImageResolver::with_seed(&missing, 1);
        assert_eq!(resolver.pick_random_image(), None);
        assert!(missing.is_dir());
    }

    #[test]
    fn test_subdirectories_are_not_listed() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        touch(dir.path(), "real.png");

        let resolver = ImageResolver::with_seed(dir.path(), 1);
        assert_eq!(resolver.list_all_images(), vec!["/images/real.png"]);
    }
}
