use clap::ValueEnum;
use std::fmt;

/// Top-level volumes of the Encyclopedia of Chess Openings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum EcoVolume {
    #[value(alias = "a")]
    A,
    #[value(alias = "b")]
    B,
    #[value(alias = "c")]
    C,
    #[value(alias = "d")]
    D,
    #[value(alias = "e")]
    E,
}

impl EcoVolume {
    pub const ALL: [EcoVolume; 5] = [
        EcoVolume::A,
        EcoVolume::B,
        EcoVolume::C,
        EcoVolume::D,
        EcoVolume::E,
    ];

    /// Human-readable title of the volume
    pub fn description(self) -> &'static str {
        match self {
            EcoVolume::A => "Volume A: Flank openings",
            EcoVolume::B => "Volume B: Semi-Open Games other than the French Defense",
            EcoVolume::C => "Volume C: Open Games and the French Defense",
            EcoVolume::D => "Volume D: Closed Games and Semi-Closed Games",
            EcoVolume::E => "Volume E: Indian Defenses",
        }
    }

    pub fn letter(self) -> char {
        match self {
            EcoVolume::A => 'A',
            EcoVolume::B => 'B',
            EcoVolume::C => 'C',
            EcoVolume::D => 'D',
            EcoVolume::E => 'E',
        }
    }

    /// Look up a volume by its letter. Stored identities are case-sensitive,
    /// so only uppercase letters resolve.
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.letter() == letter)
    }

    /// Volume of an ECO code such as "B20"
    pub fn from_code(code: &str) -> Option<Self> {
        code.chars().next().and_then(Self::from_letter)
    }
}

impl fmt::Display for EcoVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
