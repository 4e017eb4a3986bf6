//! Station manifest records and validation.
//!
//! The manifest is a small JSON document describing the rooms and tuning
//! values a station is generated from. This module defines the serde
//! records and the validation rules; actual JSON parsing happens in the
//! binaries that embed the file.

use crate::constants::room_types;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One room definition in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSpec {
    /// Display name, e.g. "Power Bay".
    pub name: String,
    /// Room type ID from [`room_types`].
    pub room_type: u8,
    /// Storage tank capacity in resource units.
    pub tank_capacity: f32,
    /// Tank amount below which the room counts as starved.
    pub tank_required: f32,
    /// Seconds an operator can stay before contamination, at mask level 1.
    pub contamination_limit: f32,
    /// Light fixtures drawing passive power.
    pub light_count: u32,
}

/// The whole station manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationManifest {
    pub name: String,
    pub rooms: Vec<RoomSpec>,
    /// Credits produced per work cycle at level 1.
    pub workstation_production: f32,
    /// Shift countdown length in seconds.
    pub shift_length: f32,
    /// Credits needed to win the session.
    pub win_credits: f32,
}

/// Validation failures for a station manifest.
#[derive(Debug, PartialEq)]
pub enum ManifestError {
    NoRooms,
    UnknownRoomType(u8),
    DuplicateRoomType(u8),
    NonPositiveCapacity(String),
    RequiredExceedsCapacity(String),
    NonPositiveContaminationLimit(String),
    NonPositiveProduction,
    NonPositiveShiftLength,
    NonPositiveWinCredits,
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestError::NoRooms => write!(f, "manifest defines no rooms"),
            ManifestError::UnknownRoomType(rt) => write!(f, "unknown room type: {}", rt),
            ManifestError::DuplicateRoomType(rt) => {
                write!(f, "duplicate room type: {}", room_types::label(*rt))
            }
            ManifestError::NonPositiveCapacity(name) => {
                write!(f, "room '{}' has non-positive tank capacity", name)
            }
            ManifestError::RequiredExceedsCapacity(name) => {
                write!(f, "room '{}' requires more than its tank holds", name)
            }
            ManifestError::NonPositiveContaminationLimit(name) => {
                write!(f, "room '{}' has non-positive contamination limit", name)
            }
            ManifestError::NonPositiveProduction => {
                write!(f, "work station production must be > 0")
            }
            ManifestError::NonPositiveShiftLength => write!(f, "shift length must be > 0"),
            ManifestError::NonPositiveWinCredits => write!(f, "win credits must be > 0"),
        }
    }
}

impl std::error::Error for ManifestError {}

/// Check every invariant the generator depends on.
pub fn validate_manifest(manifest: &StationManifest) -> Result<(), ManifestError> {
    if manifest.rooms.is_empty() {
        return Err(ManifestError::NoRooms);
    }

    let mut seen: BTreeSet<u8> = BTreeSet::new();
    for room in &manifest.rooms {
        if !room_types::is_valid(room.room_type) {
            return Err(ManifestError::UnknownRoomType(room.room_type));
        }
        if !seen.insert(room.room_type) {
            return Err(ManifestError::DuplicateRoomType(room.room_type));
        }
        if room.tank_capacity <= 0.0 {
            return Err(ManifestError::NonPositiveCapacity(room.name.clone()));
        }
        if room.tank_required > room.tank_capacity {
            return Err(ManifestError::RequiredExceedsCapacity(room.name.clone()));
        }
        if room.contamination_limit <= 0.0 {
            return Err(ManifestError::NonPositiveContaminationLimit(
                room.name.clone(),
            ));
        }
    }

    if manifest.workstation_production <= 0.0 {
        return Err(ManifestError::NonPositiveProduction);
    }
    if manifest.shift_length <= 0.0 {
        return Err(ManifestError::NonPositiveShiftLength);
    }
    if manifest.win_credits <= 0.0 {
        return Err(ManifestError::NonPositiveWinCredits);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_manifest() -> StationManifest {
        StationManifest {
            name: "Test Station".to_string(),
            rooms: vec![
                RoomSpec {
                    name: "Power Bay".to_string(),
                    room_type: room_types::POWER,
                    tank_capacity: 100.0,
                    tank_required: 10.0,
                    contamination_limit: 30.0,
                    light_count: 4,
                },
                RoomSpec {
                    name: "Oxygen Plant".to_string(),
                    room_type: room_types::OXYGEN,
                    tank_capacity: 100.0,
                    tank_required: 10.0,
                    contamination_limit: 30.0,
                    light_count: 4,
                },
            ],
            workstation_production: 3.0,
            shift_length: 600.0,
            win_credits: 10_000.0,
        }
    }

    #[test]
    fn test_valid_manifest_passes() {
        assert!(validate_manifest(&valid_manifest()).is_ok());
    }

    #[test]
    fn test_empty_rooms_rejected() {
        let mut m = valid_manifest();
        m.rooms.clear();
        assert_eq!(validate_manifest(&m), Err(ManifestError::NoRooms));
    }

    #[test]
    fn test_unknown_room_type_rejected() {
        let mut m = valid_manifest();
        m.rooms[0].room_type = 42;
        assert_eq!(validate_manifest(&m), Err(ManifestError::UnknownRoomType(42)));
    }

    #[test]
    fn test_duplicate_room_type_rejected() {
        let mut m = valid_manifest();
        m.rooms[1].room_type = room_types::POWER;
        assert_eq!(
            validate_manifest(&m),
            Err(ManifestError::DuplicateRoomType(room_types::POWER))
        );
    }

    #[test]
    fn test_required_over_capacity_rejected() {
        let mut m = valid_manifest();
        m.rooms[0].tank_required = 500.0;
        assert!(matches!(
            validate_manifest(&m),
            Err(ManifestError::RequiredExceedsCapacity(_))
        ));
    }

    #[test]
    fn test_bad_tuning_rejected() {
        let mut m = valid_manifest();
        m.workstation_production = 0.0;
        assert_eq!(
            validate_manifest(&m),
            Err(ManifestError::NonPositiveProduction)
        );

        let mut m = valid_manifest();
        m.shift_length = -1.0;
        assert_eq!(
            validate_manifest(&m),
            Err(ManifestError::NonPositiveShiftLength)
        );
    }

    #[test]
    fn test_error_display() {
        let err = ManifestError::DuplicateRoomType(room_types::POWER);
        assert!(err.to_string().contains("Power"));
    }
}
