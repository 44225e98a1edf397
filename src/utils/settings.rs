//! Small JSON records the companion apps persist between runs

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, NaiveTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants::MILLIS_PER_DAY;
use crate::validation::error::{KinematicsError, Result};

pub const CHIME_SETTINGS_FILE: &str = "chimetime.json";
pub const NOTE_FILE: &str = "anotedata.json";

/// The chime repeats once a day
pub const CHIME_PERIOD_MILLIS: i64 = MILLIS_PER_DAY;

/// Daily chime time, stored as `{"chimeHour":8,"chimeMin":0}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChimeSettings {
    pub chime_hour: u32,
    pub chime_min: u32,
}

impl Default for ChimeSettings {
    fn default() -> Self {
        Self {
            chime_hour: 8,
            chime_min: 0,
        }
    }
}

impl ChimeSettings {
    pub fn new(chime_hour: u32, chime_min: u32) -> Self {
        Self { chime_hour, chime_min }
    }

    /// `None` when hour or minute is out of range
    pub fn chime_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.chime_hour, self.chime_min, 0)
    }

    /// Next chime at or after `now`: today if the time is still ahead,
    /// otherwise tomorrow.
    pub fn next_chime_after(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let time = self.chime_time()?;
        let today = now.date().and_time(time);
        if today < now {
            Some(now.date().succ_opt()?.and_time(time))
        } else {
            Some(today)
        }
    }

    pub fn millis_until_next_chime(&self, now: NaiveDateTime) -> Option<i64> {
        let next = self.next_chime_after(now)?;
        Some((next - now).num_milliseconds())
    }
}

/// Free-text note, stored as `{"noteContent":"..."}`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub note_content: String,
}

/// Loads and stores one settings record as a JSON file
#[derive(Debug, Clone)]
pub struct SettingsStore<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T> SettingsStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Store named `file_name` inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self::new(dir.as_ref().join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record; a missing file yields the defaults
    pub fn load(&self) -> Result<T> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                Ok(T::default())
            }
            Err(source) => Err(KinematicsError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    pub fn store(&self, record: &T) -> Result<()> {
        let json = serde_json::to_string(record)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "settings stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 31)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    #[test]
    fn test_chime_wire_format() {
        let json = serde_json::to_string(&ChimeSettings::new(7, 45)).unwrap();
        assert_eq!(json, r#"{"chimeHour":7,"chimeMin":45}"#);
        let parsed: ChimeSettings = serde_json::from_str(r#"{"chimeHour":21,"chimeMin":5}"#).unwrap();
        assert_eq!(parsed, ChimeSettings::new(21, 5));
    }

    #[test]
    fn test_note_wire_format() {
        let record = NoteRecord {
            note_content: "buy milk".to_string(),
        };
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"noteContent":"buy milk"}"#);
    }

    #[test]
    fn test_next_chime_later_today() {
        let settings = ChimeSettings::default();
        assert_eq!(settings.next_chime_after(at(6, 30, 0)), Some(at(8, 0, 0)));
        assert_eq!(settings.millis_until_next_chime(at(7, 59, 59)), Some(1000));
    }

    #[test]
    fn test_next_chime_exactly_now() {
        let settings = ChimeSettings::default();
        assert_eq!(settings.next_chime_after(at(8, 0, 0)), Some(at(8, 0, 0)));
    }

    #[test]
    fn test_next_chime_rolls_to_tomorrow() {
        let settings = ChimeSettings::new(8, 0);
        let next = settings.next_chime_after(at(8, 0, 1)).unwrap();
        assert_eq!(next, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap().and_hms_opt(8, 0, 0).unwrap());
        assert_eq!(settings.millis_until_next_chime(at(8, 0, 0)), Some(0));
        assert!(settings.millis_until_next_chime(at(8, 0, 1)).unwrap() < CHIME_PERIOD_MILLIS);
    }

    #[test]
    fn test_invalid_chime_time() {
        assert_eq!(ChimeSettings::new(24, 0).next_chime_after(at(0, 0, 0)), None);
        assert_eq!(ChimeSettings::new(8, 60).chime_time(), None);
    }

    #[test]
    fn test_store_missing_file_gives_defaults() {
        let dir = std::env::temp_dir().join(format!("kinematics_settings_missing_{}", std::process::id()));
        let store: SettingsStore<ChimeSettings> = SettingsStore::in_dir(&dir, CHIME_SETTINGS_FILE);
        assert_eq!(store.load().unwrap(), ChimeSettings::default());
    }

    #[test]
    fn test_store_roundtrip() {
        let path = std::env::temp_dir().join(format!("kinematics_note_{}.json", std::process::id()));
        let store: SettingsStore<NoteRecord> = SettingsStore::new(&path);
        let record = NoteRecord {
            note_content: "Zażółć gęślą jaźń".to_string(),
        };
        store.store(&record).unwrap();
        assert_eq!(store.load().unwrap(), record);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_store_rejects_corrupt_file() {
        let path = std::env::temp_dir().join(format!("kinematics_chime_bad_{}.json", std::process::id()));
        fs::write(&path, "chime at eight").unwrap();
        let store: SettingsStore<ChimeSettings> = SettingsStore::new(&path);
        assert!(matches!(store.load(), Err(KinematicsError::Json(_))));
        let _ = fs::remove_file(path);
    }
}
