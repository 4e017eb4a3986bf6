//! Game constants: room types and overseer standards bands.
//!
//! These are simple `u8` constants with no engine dependency. Both the
//! native engine and the headless harness use these.

pub mod room_types {
    /// Power room: fuse board task, feeds the power tank.
    pub const POWER: u8 = 0;
    /// Oxygen room: tank disposal task, feeds the oxygen tank.
    pub const OXYGEN: u8 = 1;

    /// Every room type the station can contain, in generation order.
    pub const ALL: [u8; 2] = [POWER, OXYGEN];

    /// Returns true if this is a known room type.
    pub fn is_valid(rt: u8) -> bool {
        ALL.contains(&rt)
    }

    /// Human-readable room name for logs and reports.
    pub fn label(rt: u8) -> &'static str {
        match rt {
            POWER => "Power",
            OXYGEN => "Oxygen",
            _ => "Unknown",
        }
    }
}

pub mod standards {
    /// Overseer standards bands, from most lenient to most demanding.
    pub const STANDARD: u8 = 0;
    pub const ELEVATED: u8 = 1;
    pub const HIGH: u8 = 2;
    pub const MAXIMUM: u8 = 3;
    pub const CRITICAL: u8 = 4;

    /// Display label for a standards band.
    pub fn label(band: u8) -> &'static str {
        match band {
            STANDARD => "Standard",
            ELEVATED => "Elevated",
            HIGH => "High",
            MAXIMUM => "Maximum",
            _ => "Critical",
        }
    }
}
