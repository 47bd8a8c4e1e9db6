//! Configuration type definitions
//!
//! These types represent the selector configuration: one angle per bin, the
//! neutral angle, the allowed angle range and the dwell before auto-return.

use sortbin_protocol::Material;

/// Largest angle a standard hobby servo accepts
pub const MAX_ANGLE: u8 = 180;

/// Default dwell before returning to neutral (ms)
pub const DEFAULT_DWELL_MS: u32 = 3000;

/// Absolute actuator angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position(pub u8);

impl Position {
    /// Angle in degrees
    pub const fn degrees(self) -> u8 {
        self.0
    }
}

/// Inclusive range of angles the actuator may be commanded to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AngleRange {
    /// Lowest allowed angle
    pub min: u8,
    /// Highest allowed angle
    pub max: u8,
}

impl Default for AngleRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: MAX_ANGLE,
        }
    }
}

impl AngleRange {
    /// Check if a position lies inside the range
    pub fn contains(&self, position: Position) -> bool {
        (self.min..=self.max).contains(&position.0)
    }

    /// Clamp a position into the range
    pub fn clamp(&self, position: Position) -> Position {
        Position(position.0.clamp(self.min, self.max))
    }
}

/// Angle for neutral and for each bin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BinPositions {
    /// Rest position between classifications
    pub neutral: Position,
    /// Plastic bin
    pub plastic: Position,
    /// Organic bin
    pub organic: Position,
    /// Metal bin
    pub metal: Position,
}

impl Default for BinPositions {
    fn default() -> Self {
        Self {
            neutral: Position(90),
            plastic: Position(0),
            organic: Position(180),
            metal: Position(45),
        }
    }
}

impl BinPositions {
    /// Position of the bin for a material
    pub fn for_material(&self, material: Material) -> Position {
        match material {
            Material::Plastic => self.plastic,
            Material::Organic => self.organic,
            Material::Metal => self.metal,
        }
    }

    /// Iterate over every configured position, neutral first
    pub fn iter(&self) -> impl Iterator<Item = Position> {
        [self.neutral, self.plastic, self.organic, self.metal].into_iter()
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Range minimum above maximum, or maximum above [`MAX_ANGLE`]
    InvalidAngleRange,
    /// A bin or neutral angle lies outside the allowed range
    PositionOutOfRange { position: Position },
    /// Dwell of zero would return before the move completes
    ZeroDwell,
}

/// Complete selector configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SorterConfig {
    /// Allowed actuator angles
    pub angle_range: AngleRange,
    /// Neutral and bin angles
    pub positions: BinPositions,
    /// Time to stay at a bin before returning to neutral (ms)
    pub dwell_ms: u32,
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            angle_range: AngleRange::default(),
            positions: BinPositions::default(),
            dwell_ms: DEFAULT_DWELL_MS,
        }
    }
}

impl SorterConfig {
    /// Check internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let range = self.angle_range;
        if range.min > range.max || range.max > MAX_ANGLE {
            return Err(ConfigError::InvalidAngleRange);
        }

        if let Some(position) = self.positions.iter().find(|p| !range.contains(*p)) {
            return Err(ConfigError::PositionOutOfRange { position });
        }

        if self.dwell_ms == 0 {
            return Err(ConfigError::ZeroDwell);
        }

        Ok(())
    }

    /// Position for a material
    pub fn position_for(&self, material: Material) -> Position {
        self.positions.for_material(material)
    }

    /// Neutral position
    pub fn neutral(&self) -> Position {
        self.positions.neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SorterConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_position_lookup() {
        let config = SorterConfig::default();
        assert_eq!(config.position_for(Material::Plastic), Position(0));
        assert_eq!(config.position_for(Material::Organic), Position(180));
        assert_eq!(config.position_for(Material::Metal), Position(45));
        assert_eq!(config.neutral(), Position(90));
    }

    #[test]
    fn test_position_out_of_range() {
        let mut config = SorterConfig::default();
        config.angle_range = AngleRange { min: 10, max: 170 };
        // Plastic at 0 is now outside the range
        assert_eq!(
            config.validate(),
            Err(ConfigError::PositionOutOfRange {
                position: Position(0)
            })
        );
    }

    #[test]
    fn test_invalid_angle_range() {
        let mut config = SorterConfig::default();
        config.angle_range = AngleRange { min: 100, max: 50 };
        assert_eq!(config.validate(), Err(ConfigError::InvalidAngleRange));

        config.angle_range = AngleRange { min: 0, max: 200 };
        assert_eq!(config.validate(), Err(ConfigError::InvalidAngleRange));
    }

    #[test]
    fn test_zero_dwell() {
        let config = SorterConfig {
            dwell_ms: 0,
            ..SorterConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDwell));
    }

    #[test]
    fn test_range_clamp() {
        let range = AngleRange { min: 10, max: 170 };
        assert_eq!(range.clamp(Position(0)), Position(10));
        assert_eq!(range.clamp(Position(90)), Position(90));
        assert_eq!(range.clamp(Position(180)), Position(170));
    }
}
