//! Orientation labels and the label map written at the end of a session
//!
//! The label map is serialized as a flat JSON object mapping file name to
//! `"portrait"` or `"landscape"`, in the order the items were labeled.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::files::{write_json, FileError};

/// Orientation chosen for an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }

    /// Lenient mapping used when reading hand-edited label files:
    /// `"portrait"` is portrait, anything else is landscape.
    pub fn from_label(label: &str) -> Self {
        if label == "portrait" {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "portrait" | "p" => Ok(Orientation::Portrait),
            "landscape" | "l" => Ok(Orientation::Landscape),
            other => Err(format!("unknown orientation '{}'", other)),
        }
    }
}

/// Insertion-ordered map from item name to orientation.
///
/// Entries are never removed. Labeling the same name again replaces the
/// orientation but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    entries: Vec<(String, Orientation)>,
    positions: HashMap<String, usize>,
}

impl LabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a label. Returns `true` if `name` was not labeled before.
    pub fn record(&mut self, name: impl Into<String>, orientation: Orientation) -> bool {
        let name = name.into();
        if let Some(&pos) = self.positions.get(&name) {
            self.entries[pos].1 = orientation;
            return false;
        }
        self.positions.insert(name.clone(), self.entries.len());
        self.entries.push((name, orientation));
        true
    }

    pub fn get(&self, name: &str) -> Option<Orientation> {
        self.positions.get(name).map(|&pos| self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Orientation)> {
        self.entries.iter().map(|(name, o)| (name.as_str(), *o))
    }

    /// Number of entries with the given orientation.
    pub fn count(&self, orientation: Orientation) -> usize {
        self.entries.iter().filter(|(_, o)| *o == orientation).count()
    }
}

impl Serialize for LabelMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, orientation) in &self.entries {
            map.serialize_entry(name, orientation)?;
        }
        map.end()
    }
}

/// Write the label map to `path` as indented JSON.
pub fn write_labels(labels: &LabelMap, path: &Path) -> Result<(), FileError> {
    write_json(path, labels)?;
    tracing::info!(path = %path.display(), count = labels.len(), "wrote orientation labels");
    Ok(())
}
