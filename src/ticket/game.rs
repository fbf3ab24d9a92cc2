use std::fmt;
use std::str::FromStr;

/// The two supported draw games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Powerball,
    MegaMillions,
}

impl GameKind {
    /// Resolves a game name case-insensitively.
    ///
    /// Accepts "powerball", "mega millions" and the spellings "megamillions"
    /// and "mega-millions". Anything else is `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "powerball" => Some(GameKind::Powerball),
            "mega millions" | "megamillions" | "mega-millions" => Some(GameKind::MegaMillions),
            _ => None,
        }
    }

    /// Marker printed between the main numbers and the special ball.
    pub fn marker(&self) -> &'static str {
        match self {
            GameKind::Powerball => "PB",
            GameKind::MegaMillions => "MB",
        }
    }

    /// Label of the special ball
    pub fn special_label(&self) -> &'static str {
        match self {
            GameKind::Powerball => "Powerball",
            GameKind::MegaMillions => "Mega Ball",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GameKind::Powerball => "Powerball",
            GameKind::MegaMillions => "Mega Millions",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameKind::from_name(s).ok_or_else(|| {
            format!(
                "unknown game '{}' (expected \"powerball\" or \"mega millions\")",
                s
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(GameKind::from_name("Powerball"), Some(GameKind::Powerball));
        assert_eq!(GameKind::from_name("POWERBALL"), Some(GameKind::Powerball));
        assert_eq!(
            GameKind::from_name("Mega Millions"),
            Some(GameKind::MegaMillions)
        );
        assert_eq!(
            GameKind::from_name("mega-millions"),
            Some(GameKind::MegaMillions)
        );
        assert_eq!(GameKind::from_name("  megamillions "), Some(GameKind::MegaMillions));
    }

    #[test]
    fn test_from_name_unknown() {
        assert_eq!(GameKind::from_name("lotto"), None);
        assert_eq!(GameKind::from_name(""), None);
        assert!("euromillions".parse::<GameKind>().is_err());
    }

    #[test]
    fn test_markers_and_labels() {
        assert_eq!(GameKind::Powerball.marker(), "PB");
        assert_eq!(GameKind::MegaMillions.marker(), "MB");
        assert_eq!(GameKind::MegaMillions.special_label(), "Mega Ball");
        assert_eq!(GameKind::MegaMillions.to_string(), "Mega Millions");
    }
}
