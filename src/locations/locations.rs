use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::timing::{validate_schedule, Schedule};

/// One record of the locations file, before its schedule has been checked.
#[derive(Deserialize)]
struct LocationEntry {
    name: String,
    timezone: String,
    #[serde(default)]
    schedule: Value,
}

/// A business location and its weekly hours.
///
/// `schedule` is `None` when the stored schedule failed validation. Such a
/// location is still listed but reported as not configured rather than
/// evaluated.
#[derive(Clone, Debug)]
pub struct Location {
    pub name: String,
    pub timezone: String,
    pub schedule: Option<Schedule>,
}

impl Location {
    fn from_entry(entry: LocationEntry) -> Self {
        if entry.timezone.parse::<Tz>().is_err() {
            warn!(
                "Location '{}' has unknown timezone '{}', status will use system local time",
                entry.name, entry.timezone
            );
        }

        let schedule = if validate_schedule(&entry.schedule) {
            match Schedule::from_value(&entry.schedule) {
                Ok(schedule) => {
                    if schedule.always_closed() {
                        info!("Location '{}' is closed every day", entry.name);
                    }
                    Some(schedule)
                }
                Err(err) => {
                    warn!("Location '{}' schedule unreadable: {}", entry.name, err);
                    None
                }
            }
        } else {
            warn!("Location '{}' has no valid schedule", entry.name);
            None
        };

        Self {
            name: entry.name,
            timezone: entry.timezone,
            schedule,
        }
    }

    pub fn configured(&self) -> bool {
        self.schedule.is_some()
    }
}

/// Every location the service answers for, in file order.
#[derive(Clone, Debug, Default)]
pub struct Locations {
    locations: Vec<Location>,
}

impl Locations {
    /// Parses the JSON array form of the locations file.
    pub fn from_config(config: &str) -> Result<Self> {
        let entries: Vec<LocationEntry> =
            serde_json::from_str(config).context("Could not deserialize locations")?;

        let mut locations: Vec<Location> = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.name.trim().is_empty() {
                bail!("Location with an empty name");
            }
            if locations.iter().any(|l| l.name == entry.name) {
                bail!("Location '{}' is listed more than once", entry.name);
            }
            locations.push(Location::from_entry(entry));
        }
        Ok(Self { locations })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let config = fs::read_to_string(path)
            .with_context(|| format!("Could not read locations file {}", path.display()))?;
        let locations = Self::from_config(&config)
            .with_context(|| format!("Invalid locations file {}", path.display()))?;
        info!(
            "Loaded {} locations from {} ({} configured)",
            locations.len(),
            path.display(),
            locations.iter().filter(|l| l.configured()).count()
        );
        Ok(locations)
    }

    pub fn get(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
