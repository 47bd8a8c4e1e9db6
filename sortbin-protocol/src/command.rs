//! Inbound commands
//!
//! The host sends one material label per line. Matching is exact and
//! case-sensitive; every other line decodes to [`Command::Unrecognized`].

/// Material classes the selector has a bin for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Material {
    /// `PLASTICO`
    Plastic,
    /// `ORGANICO`
    Organic,
    /// `METAL`
    Metal,
}

impl Material {
    /// All materials, in wire-table order
    pub const ALL: [Material; 3] = [Material::Plastic, Material::Organic, Material::Metal];

    /// Wire label for this material
    pub fn label(self) -> &'static str {
        match self {
            Material::Plastic => "PLASTICO",
            Material::Organic => "ORGANICO",
            Material::Metal => "METAL",
        }
    }

    /// Look up a material by its exact wire label
    pub fn from_label(label: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|material| material.label().as_bytes() == label)
    }
}

/// A decoded command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Move to the bin for this material
    Sort(Material),
    /// Anything else; acknowledged but not acted on
    Unrecognized,
}

impl Command {
    /// Decode a trimmed line
    pub fn parse(line: &[u8]) -> Self {
        match Material::from_label(line) {
            Some(material) => Command::Sort(material),
            None => Command::Unrecognized,
        }
    }
}
