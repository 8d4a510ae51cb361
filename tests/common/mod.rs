// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// A test block the parser recognizes.
pub fn test_block(name: &str) -> String {
    format!("{name} = {{\n\tsuccess = {{\n\t\talways = yes\n\t}}\n}}\n\n")
}

/// A block of generic script data that is not a test.
pub fn data_block(name: &str) -> String {
    format!("{name} = {{\n\tvalue = 1\n}}\n\n")
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write file");
}

/// A fake game installation:
///
/// ```text
/// <root>/game/launcher/launcher-settings.json
/// <root>/game/binaries/game.sh
/// <root>/game/content/tools/scripted_tests/
/// <root>/data/save games/
/// <root>/mods/
/// ```
pub struct GameFixture {
    pub root: TempDir,
    pub game_dir: PathBuf,
    pub content_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl GameFixture {
    pub fn new(game_id: &str) -> Self {
        let root = tempdir().expect("Failed to create temporary directory");
        let game_dir = root.path().join("game");
        let content_dir = game_dir.join("content");
        let data_dir = root.path().join("data");

        fs::create_dir_all(content_dir.join("tools").join("scripted_tests")).unwrap();
        fs::create_dir_all(data_dir.join("save games")).unwrap();
        fs::create_dir_all(game_dir.join("binaries")).unwrap();

        let settings = serde_json::json!({
            "gameId": game_id,
            "gameDataPath": data_dir.to_string_lossy(),
            "exePath": "../binaries/game.sh",
            "dlcPath": "../content",
        });
        write_file(
            &game_dir.join("launcher").join("launcher-settings.json"),
            &settings.to_string(),
        );

        Self {
            root,
            game_dir,
            content_dir,
            data_dir,
        }
    }

    pub fn victoria3() -> Self {
        Self::new("victoria3")
    }

    pub fn tests_dir(&self) -> PathBuf {
        self.content_dir.join("tools").join("scripted_tests")
    }

    pub fn save_dir(&self) -> PathBuf {
        self.data_dir.join("save games")
    }

    pub fn executable(&self) -> PathBuf {
        self.game_dir.join("binaries").join("game.sh")
    }

    /// Adds a base game test file and returns its path.
    pub fn add_test_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.tests_dir().join(name);
        write_file(&path, content);
        path
    }

    /// Creates a mod with the given test files and returns its root.
    pub fn add_mod(&self, mod_name: &str, files: &[(&str, &str)]) -> PathBuf {
        let mod_root = self.root.path().join("mods").join(mod_name);
        let tests_dir = mod_root.join("tools").join("scripted_tests");
        fs::create_dir_all(&tests_dir).unwrap();
        for (name, content) in files {
            write_file(&tests_dir.join(name), content);
        }
        mod_root
    }

    /// Writes the runner config next to the game and returns its path.
    pub fn write_config(&self, config: serde_json::Value) -> PathBuf {
        let path = self.root.path().join("test-config.json");
        write_file(&path, &config.to_string());
        path
    }

    /// Installs an executable shell script as the game binary.
    #[cfg(unix)]
    pub fn install_game_script(&self, body: &str) {
        install_script(&self.executable(), body);
    }
}

/// Writes an executable `/bin/sh` script.
#[cfg(unix)]
pub fn install_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    write_file(path, &format!("#!/bin/sh\n{body}\n"));
    let mut permissions = fs::metadata(path).unwrap().permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions).unwrap();
}

/// Lists the file names in a directory, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
