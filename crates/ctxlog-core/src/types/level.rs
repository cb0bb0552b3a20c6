//! Log levels

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Importance of a log record
///
/// Levels are plain integers so that callers can define their own levels
/// between the named ones. The named levels are spaced four apart, leaving
/// room on both sides of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(pub i32);

impl Level {
    pub const DEBUG: Level = Level(-4);
    pub const INFO: Level = Level(0);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(8);

    /// Numeric value of the level
    pub fn value(self) -> i32 {
        self.0
    }

    /// The named level this one is reported relative to, and the offset from it
    fn base(self) -> (&'static str, i32) {
        if self < Level::INFO {
            ("DEBUG", self.0 - Level::DEBUG.0)
        } else if self < Level::WARN {
            ("INFO", self.0 - Level::INFO.0)
        } else if self < Level::ERROR {
            ("WARN", self.0 - Level::WARN.0)
        } else {
            ("ERROR", self.0 - Level::ERROR.0)
        }
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Level(value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, offset) = self.base();
        if offset == 0 {
            f.write_str(name)
        } else {
            write!(f, "{}{:+}", name, offset)
        }
    }
}

/// Error returned when a level name cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid level: {0:?}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Accepts `debug`, `info`, `warn`, `error` in any case, optionally
    /// followed by a signed offset such as `INFO+2` or `warn-1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLevelError(s.to_string());
        let trimmed = s.trim();
        let (name, offset) = match trimmed.find(['+', '-']) {
            Some(pos) => {
                let offset: i32 = trimmed[pos..].parse().map_err(|_| err())?;
                (&trimmed[..pos], offset)
            }
            None => (trimmed, 0),
        };

        let base = match name.to_ascii_lowercase().as_str() {
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" | "warning" => Level::WARN,
            "error" => Level::ERROR,
            _ => return Err(err()),
        };

        base.0.checked_add(offset).map(Level).ok_or_else(err)
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::DEBUG < Level::INFO);
        assert!(Level::INFO < Level::WARN);
        assert!(Level::WARN < Level::ERROR);
        assert!(Level(2) > Level::INFO && Level(2) < Level::WARN);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::DEBUG.to_string(), "DEBUG");
        assert_eq!(Level::INFO.to_string(), "INFO");
        assert_eq!(Level::WARN.to_string(), "WARN");
        assert_eq!(Level::ERROR.to_string(), "ERROR");
        assert_eq!(Level(2).to_string(), "INFO+2");
        assert_eq!(Level(-5).to_string(), "DEBUG-1");
        assert_eq!(Level(100).to_string(), "ERROR+92");
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("info".parse::<Level>().unwrap(), Level::INFO);
        assert_eq!("WARN".parse::<Level>().unwrap(), Level::WARN);
        assert_eq!("warning".parse::<Level>().unwrap(), Level::WARN);
        assert_eq!("Error".parse::<Level>().unwrap(), Level::ERROR);
        assert_eq!("INFO+2".parse::<Level>().unwrap(), Level(2));
        assert_eq!("debug-1".parse::<Level>().unwrap(), Level(-5));
        assert!("verbose".parse::<Level>().is_err());
        assert!("info+x".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_parse_offset_out_of_range() {
        assert!("error+2147483647".parse::<Level>().is_err());
        assert!("DEBUG-2147483648".parse::<Level>().is_err());
        assert_eq!("debug+2147483647".parse::<Level>().unwrap(), Level(i32::MAX - 4));

        let yaml: Result<Level, _> = serde_yaml::from_str("ERROR+2147483647");
        assert!(yaml.is_err());
    }

    #[test]
    fn test_level_display_parse_agree() {
        for value in -10..20 {
            let level = Level(value);
            assert_eq!(level.to_string().parse::<Level>().unwrap(), level);
        }
    }

    #[test]
    fn test_level_serde() {
        let json = serde_json::to_string(&Level::WARN).unwrap();
        assert_eq!(json, "\"WARN\"");

        let level: Level = serde_json::from_str("\"INFO+1\"").unwrap();
        assert_eq!(level, Level(1));
    }
}
