// Application settings
// Loaded from ~/.config/hrdesk/settings.json

use std::fs;
use std::path::{Path, PathBuf};

use hrdesk_messaging::{BirthdayStyle, LinkConfig, OfficeProfile};
use serde::Deserialize;

/// Roster file used when nothing else is configured, relative to the working directory.
pub const DEFAULT_ROSTER_FILE: &str = "employees.csv";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Roster
    #[serde(rename = "roster.path")]
    pub roster_path: PathBuf,

    // Birthday greetings
    #[serde(rename = "birthday.defaultStyle")]
    pub default_birthday_style: BirthdayStyle,

    #[serde(rename = "birthday.videoLink")]
    pub video_link: Option<String>,

    // Messaging deep links
    #[serde(rename = "link")]
    pub link: LinkConfig,

    // Sender and office shown in messages
    #[serde(rename = "office")]
    pub office: OfficeProfile,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from(DEFAULT_ROSTER_FILE),
            default_birthday_style: BirthdayStyle::Formal,
            video_link: None,
            link: LinkConfig::default(),
            office: OfficeProfile::default(),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hrdesk");
        config_dir.join("settings.json")
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`. A missing, unreadable or invalid file falls back
    /// to defaults; nothing is written.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("no settings at {}, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("error parsing {}: {e}; using default settings", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("error reading {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Parse settings JSON, ignoring lines that start with `//`.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&cleaned)
    }

    /// Write the commented default settings file, creating parent directories.
    pub fn write_default_file(path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = r#"{
    // Roster CSV, relative to the working directory unless absolute
    "roster.path": "employees.csv",

    // Birthday greetings: "formal" or "casual"
    "birthday.defaultStyle": "formal",
    // Video link appended to every greeting (omit or null for none)
    "birthday.videoLink": null,

    // Deep links: https://<domain>/<number>?text=<message>
    // A leading 0 in the number is replaced with country_code
    "link": {
        "domain": "wa.me",
        "country_code": "972"
    },

    // Sender and office shown in messages
    "office": {
        "sender_name": "תאיר",
        "office_name": "עורכי דין י.שפירא",
        "signature": "משרד י.שפירא ושות' עורכי דין",
        "address": "נירים 4 תל אביב",
        "floor": "2"
    }
}
"#;

        fs::write(path, default_config)
    }
}
