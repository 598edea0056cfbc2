use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::record::Metric;

/// Region value meaning "do not filter".
pub const GLOBAL_REGION: &str = "Global";

/// A WHO region, or the `Global` sentinel covering every country.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Region {
    #[default]
    Global,
    Who(String),
}

impl Region {
    pub fn who(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == GLOBAL_REGION {
            Region::Global
        } else {
            Region::Who(name)
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Region::Global)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Region::Global => GLOBAL_REGION,
            Region::Who(name) => name,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Region::who(s))
    }
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Region::who(name))
    }
}

/// The pair of dropdown values driving every chart.
///
/// Always handled as a whole value so a recomputation never observes a
/// metric from one user action paired with a region from another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Selection {
    pub metric: Metric,
    pub region: Region,
}

impl Selection {
    pub fn new(metric: Metric, region: Region) -> Self {
        Self { metric, region }
    }

    /// Stable string form, used as a cache key.
    pub fn key(&self) -> String {
        format!("{}|{}", self.metric.column(), self.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_sentinel_parses_to_global() {
        assert_eq!("Global".parse::<Region>().unwrap(), Region::Global);
        assert_eq!(Region::who("Global"), Region::Global);
        assert!(Region::default().is_global());
    }

    #[test]
    fn test_who_region_round_trips() {
        let region: Region = "Eastern Mediterranean".parse().unwrap();
        assert_eq!(region, Region::Who("Eastern Mediterranean".to_string()));
        assert_eq!(region.to_string(), "Eastern Mediterranean");
    }

    #[test]
    fn test_region_serde_is_plain_string() {
        let json = serde_json::to_string(&Region::Who("Europe".to_string())).unwrap();
        assert_eq!(json, "\"Europe\"");
        let region: Region = serde_json::from_str("\"Global\"").unwrap();
        assert_eq!(region, Region::Global);
    }

    #[test]
    fn test_selection_key_distinguishes_pairs() {
        let a = Selection::new(Metric::Deaths, Region::who("Europe"));
        let b = Selection::new(Metric::Deaths, Region::Global);
        assert_ne!(a.key(), b.key());
        assert_eq!(a.key(), "Deaths|Europe");
    }
}
