//! Display ordering for platforms and rating tiers.

use std::cmp::Ordering;

/// Hardware family a platform name belongs to, in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlatformFamily {
    /// PC storefronts and desktop operating systems.
    Pc,
    /// PlayStation consoles and handhelds.
    Sony,
    /// Nintendo consoles and handhelds.
    Nintendo,
    /// Xbox consoles.
    Xbox,
    /// Anything else, sorted last.
    Other,
}

impl PlatformFamily {
    /// Classify a platform name (as returned by the catalogue, e.g. "PS5" or "Nintendo Switch").
    pub fn classify(platform: &str) -> Self {
        let name = platform.to_lowercase();
        let name = name.as_str();

        if name == "pc"
            || name == "steam"
            || ["windows", "linux", "mac"].iter().any(|k| name.contains(k))
        {
            PlatformFamily::Pc
        } else if name.contains("playstation") || name.contains("ps") {
            PlatformFamily::Sony
        } else if name == "nes"
            || name == "snes"
            || ["nintendo", "switch", "wii", "gamecube", "3ds", "ds"]
                .iter()
                .any(|k| name.contains(k))
        {
            PlatformFamily::Nintendo
        } else if name.contains("xbox")
            || name.contains("xb")
            || matches!(name, "xone" | "series x|s" | "series s" | "series x")
        {
            PlatformFamily::Xbox
        } else {
            PlatformFamily::Other
        }
    }
}

/// Sort platforms by family (PC, Sony, Nintendo, Xbox, other), then alphabetically.
pub fn sort_platforms(platforms: &[String]) -> Vec<String> {
    let mut sorted = platforms.to_vec();
    sorted.sort_by(|a, b| compare_platforms(a, b));
    sorted
}

fn compare_platforms(a: &str, b: &str) -> Ordering {
    PlatformFamily::classify(a)
        .cmp(&PlatformFamily::classify(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Critic-score band used to colour ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    /// 75 and above.
    Favorable,
    /// 50 to 74.
    Mixed,
    /// Below 50.
    Unfavorable,
}

impl RatingTier {
    /// Tier for a 0-100 rating.
    pub fn of(rating: i32) -> Self {
        match rating {
            75.. => RatingTier::Favorable,
            50..=74 => RatingTier::Mixed,
            _ => RatingTier::Unfavorable,
        }
    }
}
