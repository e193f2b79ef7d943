use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write config file at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

/// Sectioned `name=value` store backing `config.ini`.
///
/// Reads go through the currently selected section. Reading a missing entry
/// inserts the supplied default, so a later [`ConfigFile::save`] writes every
/// recognized option back to disk.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    sections: Vec<Section>,
    current: Option<usize>,
    edited: bool,
}

impl ConfigFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the file at `path`. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let mut sections: Vec<Section> = Vec::new();

        for line in content.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
                sections.push(Section {
                    name: name.to_string(),
                    entries: Vec::new(),
                });
                continue;
            }

            let (name, value) = line.split_once('=').unwrap_or((line, ""));
            match sections.last_mut() {
                Some(section) => section.entries.push((name.to_string(), value.to_string())),
                None => warn!("Ignoring config line outside of any section: '{line}'"),
            }
        }

        Self {
            sections,
            current: None,
            edited: false,
        }
    }

    /// Selects a section for the following reads and writes, creating it if needed.
    pub fn select_section(&mut self, name: &str) {
        if let Some(index) = self.sections.iter().position(|section| section.name == name) {
            self.current = Some(index);
            return;
        }

        self.sections.push(Section {
            name: name.to_string(),
            entries: Vec::new(),
        });
        self.current = Some(self.sections.len() - 1);
        self.edited = true;
    }

    /// Returns the stored value, or inserts and returns `default`.
    ///
    /// With no section selected nothing is inserted and the default is returned.
    pub fn read_or_insert(&mut self, name: &str, default: &str) -> String {
        if let Some(value) = self.get(name) {
            return value.to_string();
        }

        self.write(name, default);
        default.to_string()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let section = &self.sections[self.current?];
        section
            .entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets an entry in the selected section. Returns `false` if no section is selected.
    pub fn write(&mut self, name: &str, value: &str) -> bool {
        let Some(index) = self.current else {
            return false;
        };

        let entries = &mut self.sections[index].entries;
        match entries.iter_mut().find(|(entry, _)| entry == name) {
            Some((_, stored)) => *stored = value.to_string(),
            None => entries.push((name.to_string(), value.to_string())),
        }
        self.edited = true;
        true
    }

    pub fn is_edited(&self) -> bool {
        self.edited
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.name.as_str())
    }

    pub fn serialize(&self) -> String {
        let mut output = String::new();
        for section in &self.sections {
            output.push('[');
            output.push_str(&section.name);
            output.push_str("]\n");
            for (name, value) in &section.entries {
                output.push_str(name);
                output.push('=');
                output.push_str(value);
                output.push('\n');
            }
            output.push('\n');
        }
        output
    }

    /// Writes the store to `path` if anything changed since it was loaded.
    pub fn save(&mut self, path: &Path) -> Result<(), ConfigError> {
        if !self.edited {
            return Ok(());
        }

        fs::write(path, self.serialize()).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.edited = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "[Settings]\nWidth=300\nBarSpeed=10\n\n[Keys]\nKeyDonL=C\n\n";

    #[test]
    fn parses_sections_and_entries() {
        let mut config = ConfigFile::parse(SAMPLE);
        assert_eq!(config.section_names().collect::<Vec<_>>(), vec!["Settings", "Keys"]);

        config.select_section("Settings");
        assert_eq!(config.get("Width"), Some("300"));
        assert_eq!(config.get("BarSpeed"), Some("10"));
        assert_eq!(config.get("KeyDonL"), None);

        config.select_section("Keys");
        assert_eq!(config.get("KeyDonL"), Some("C"));
        assert!(!config.is_edited());
    }

    #[test]
    fn value_keeps_everything_after_first_equals() {
        let mut config = ConfigFile::parse("[S]\nFont=a=b=c.ttf\nEmpty=\nBare\n");
        config.select_section("S");
        assert_eq!(config.get("Font"), Some("a=b=c.ttf"));
        assert_eq!(config.get("Empty"), Some(""));
        assert_eq!(config.get("Bare"), Some(""));
    }

    #[test]
    fn tolerates_crlf_line_endings() {
        let mut config = ConfigFile::parse("[Settings]\r\nWidth=320\r\n\r\n");
        config.select_section("Settings");
        assert_eq!(config.get("Width"), Some("320"));
        assert!(!config.is_edited());
    }

    #[test]
    fn ignores_entries_before_first_section() {
        let mut config = ConfigFile::parse("Orphan=1\n[Settings]\nWidth=1\n");
        config.select_section("Settings");
        assert_eq!(config.get("Orphan"), None);
        assert_eq!(config.serialize(), "[Settings]\nWidth=1\n\n");
    }

    #[test]
    fn read_or_insert_writes_back_missing_defaults() {
        let mut config = ConfigFile::parse(SAMPLE);
        config.select_section("Settings");

        assert_eq!(config.read_or_insert("Width", "240"), "300");
        assert!(!config.is_edited());

        assert_eq!(config.read_or_insert("Height", "640"), "640");
        assert!(config.is_edited());
        assert_eq!(config.get("Height"), Some("640"));
    }

    #[test]
    fn read_without_section_returns_default_only() {
        let mut config = ConfigFile::new();
        assert_eq!(config.read_or_insert("Width", "240"), "240");
        assert!(!config.is_edited());
        assert_eq!(config.serialize(), "");
    }

    #[test]
    fn selecting_new_section_appends_it() {
        let mut config = ConfigFile::parse(SAMPLE);
        config.select_section("Keys2");
        config.read_or_insert("KeyResetCounter", "R");

        assert_eq!(
            config.serialize(),
            "[Settings]\nWidth=300\nBarSpeed=10\n\n[Keys]\nKeyDonL=C\n\n[Keys2]\nKeyResetCounter=R\n\n"
        );
    }

    #[test]
    fn write_replaces_existing_entry_in_place() {
        let mut config = ConfigFile::parse(SAMPLE);
        config.select_section("Settings");
        assert!(config.write("Width", "480"));
        assert_eq!(config.serialize(), SAMPLE.replacen("300", "480", 1));
    }

    #[test]
    fn save_is_skipped_when_unedited() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.ini");

        let mut config = ConfigFile::parse(SAMPLE);
        config.save(&path).expect("save");
        assert!(!path.exists());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.ini");

        let mut config = ConfigFile::load(&path).expect("missing file loads empty");
        config.select_section("Settings");
        config.read_or_insert("Width", "240");
        config.save(&path).expect("save");
        assert!(!config.is_edited());

        let written = fs::read_to_string(&path).expect("read back");
        assert_eq!(written, "[Settings]\nWidth=240\n\n");

        let mut reloaded = ConfigFile::load(&path).expect("load");
        reloaded.select_section("Settings");
        assert_eq!(reloaded.get("Width"), Some("240"));
    }

    #[test]
    fn save_into_missing_directory_reports_write_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("config.ini");

        let mut config = ConfigFile::new();
        config.select_section("Settings");
        let err = config.save(&path).expect_err("parent directory does not exist");
        assert!(matches!(err, ConfigError::Write { .. }));
    }
}
