use std::fmt;

use serde::{Deserialize, Serialize};

/// Base linear speed in scene units per second; multiplied up by car rank.
pub const BASE_SPEED: f32 = 500.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarId(pub usize);

/// The player's level and car pick, made before a session starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub level: LevelId,
    pub car: CarId,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LevelEntry {
    /// Time limit in whole seconds.
    pub time: i32,
    /// Laps required to win.
    pub laps: i32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CarEntry {
    /// Speed rank; faster cars carry a higher rank.
    pub rank: i32,
}

/// External level/car data, loaded once by the host and handed in here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Catalog {
    pub levels: Vec<LevelEntry>,
    pub cars: Vec<CarEntry>,
}

impl Catalog {
    pub fn level(&self, id: LevelId) -> Result<LevelEntry, ConfigError> {
        self.levels
            .get(id.0)
            .copied()
            .ok_or(ConfigError::UnknownLevel(id.0))
    }

    pub fn car_rank(&self, id: CarId) -> Result<i32, ConfigError> {
        self.cars
            .get(id.0)
            .map(|car| car.rank)
            .ok_or(ConfigError::UnknownCar(id.0))
    }
}

/// Immutable per-session parameters, resolved once from the catalog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaceConfig {
    pub laps_required: i32,
    pub time_limit_seconds: i32,
    pub max_speed: f32,
}

impl RaceConfig {
    pub fn resolve(catalog: &Catalog, selection: Selection) -> Result<RaceConfig, ConfigError> {
        let entry = catalog.level(selection.level)?;
        if entry.time < 1 || entry.laps < 1 {
            return Err(ConfigError::MalformedLevel {
                level: selection.level.0,
                time: entry.time,
                laps: entry.laps,
            });
        }
        let rank = catalog.car_rank(selection.car)?;
        Ok(RaceConfig {
            laps_required: entry.laps,
            time_limit_seconds: entry.time,
            max_speed: BASE_SPEED * (2 + rank) as f32,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    UnknownLevel(usize),
    UnknownCar(usize),
    MalformedLevel { level: usize, time: i32, laps: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownLevel(index) => write!(f, "no level at index {}", index),
            ConfigError::UnknownCar(index) => write!(f, "no car at index {}", index),
            ConfigError::MalformedLevel { level, time, laps } => write!(
                f,
                "level {} has unusable data (time: {}, laps: {})",
                level, time, laps
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog {
            levels: vec![
                LevelEntry { time: 60, laps: 3 },
                LevelEntry { time: 90, laps: 5 },
            ],
            cars: vec![CarEntry { rank: 0 }, CarEntry { rank: 2 }],
        }
    }

    #[test]
    fn resolves_max_speed_from_car_rank() {
        let config = RaceConfig::resolve(
            &catalog(),
            Selection {
                level: LevelId(0),
                car: CarId(1),
            },
        )
        .unwrap();
        assert_eq!(config.laps_required, 3);
        assert_eq!(config.time_limit_seconds, 60);
        assert_eq!(config.max_speed, 2000.0, "rank 2 should quadruple the base");
    }

    #[test]
    fn unknown_indices_are_errors() {
        let catalog = catalog();
        let bad_level = RaceConfig::resolve(
            &catalog,
            Selection {
                level: LevelId(9),
                car: CarId(0),
            },
        );
        assert_eq!(bad_level.unwrap_err(), ConfigError::UnknownLevel(9));

        let bad_car = RaceConfig::resolve(
            &catalog,
            Selection {
                level: LevelId(0),
                car: CarId(7),
            },
        );
        assert_eq!(bad_car.unwrap_err(), ConfigError::UnknownCar(7));
    }

    #[test]
    fn degenerate_level_data_is_an_error() {
        let mut catalog = catalog();
        catalog.levels[0] = LevelEntry { time: 0, laps: 3 };
        let err = RaceConfig::resolve(
            &catalog,
            Selection {
                level: LevelId(0),
                car: CarId(0),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MalformedLevel { .. }));
    }
}
