use serde::{Deserialize, Serialize};

/// The kind of vehicle that calls at a stop or operates a route.
///
/// Mirrors the original `Point.mode` column (`tube`, `underground`, `bus`,
/// `rail`, `tram`) one-for-one rather than collapsing `tube`/`underground`
/// into a single variant: upstream data uses both spellings and a stop's
/// mode is looked up verbatim, not normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Bus,
    Tube,
    Underground,
    Rail,
    Tram,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Tube => "tube",
            Mode::Underground => "underground",
            Mode::Bus => "bus",
            Mode::Rail => "rail",
            Mode::Tram => "tram",
        }
    }
}
