use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TRANSCRIPT: &str = "output.txt";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Side file mirroring everything shown on the console
    #[serde(default = "default_transcript")]
    pub transcript: PathBuf,
    /// IANA zone for booking timestamps; local time when unset
    #[serde(default)]
    pub timezone: Option<String>,
    pub classes: Vec<ClassConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ClassConfig {
    pub name: String,
    pub max_capacity: usize,
    pub num_slots: usize,
}

impl ClassConfig {
    pub fn new(name: &str, max_capacity: usize, num_slots: usize) -> Self {
        Self {
            name: name.to_string(),
            max_capacity,
            num_slots,
        }
    }
}

impl Default for Config {
    /// The stock catalog: Yoga and Zumba.
    fn default() -> Self {
        Self {
            transcript: default_transcript(),
            timezone: None,
            classes: vec![
                ClassConfig::new("Yoga", 20, 10),
                ClassConfig::new("Zumba", 30, 15),
            ],
        }
    }
}

fn default_transcript() -> PathBuf {
    PathBuf::from(DEFAULT_TRANSCRIPT)
}
