//! Heuristic vibe classification.
//!
//! Popularity and duration stand in for mood and energy. The rules are
//! deterministic and look at nothing else, so the same track always lands
//! in the same buckets.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::types::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vibe {
    #[default]
    All,
    Happy,
    Sad,
    Energetic,
    Chill,
    Party,
}

impl Vibe {
    pub const ALL: [Vibe; 6] = [
        Vibe::All,
        Vibe::Happy,
        Vibe::Sad,
        Vibe::Energetic,
        Vibe::Chill,
        Vibe::Party,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Vibe::All => "all",
            Vibe::Happy => "happy",
            Vibe::Sad => "sad",
            Vibe::Energetic => "energetic",
            Vibe::Chill => "chill",
            Vibe::Party => "party",
        }
    }

    /// Membership rule over popularity (0-100) and duration in minutes.
    pub fn matches(&self, popularity: u8, duration_minutes: f64) -> bool {
        match self {
            Vibe::All => true,
            Vibe::Happy => popularity > 60,
            Vibe::Sad => popularity < 50 && duration_minutes > 3.5,
            Vibe::Energetic => popularity > 70 && duration_minutes < 4.0,
            Vibe::Chill => popularity > 40 && popularity < 70 && duration_minutes > 3.0,
            Vibe::Party => popularity > 75,
        }
    }
}

impl fmt::Display for Vibe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vibe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Vibe::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown vibe '{s}', expected one of: {}",
                    Vibe::ALL.map(|v| v.as_str()).join(", ")
                )
            })
    }
}

/// Whether `track` belongs to `vibe`.
pub fn classify(track: &Track, vibe: Vibe) -> bool {
    vibe.matches(track.popularity, track.duration_minutes())
}

/// Tracks of `tracks` belonging to `vibe`, in their original order.
///
/// The input is left untouched, so switching vibes always starts again from
/// the full list.
pub fn filter_by_vibe<'a>(tracks: &'a [Track], vibe: Vibe) -> Vec<&'a Track> {
    tracks.iter().filter(|t| classify(t, vibe)).collect()
}
