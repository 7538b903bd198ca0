use std::fmt;

/// Severity vocabulary used by the prediction service, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    None,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::None,
        Severity::Mild,
        Severity::Moderate,
        Severity::Severe,
    ];

    /// Matches both display labels ("Severe") and probability keys ("severe").
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|severity| severity.key().eq_ignore_ascii_case(raw))
    }

    pub fn from_level(level: i64) -> Option<Self> {
        usize::try_from(level)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn key(self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case() {
        assert_eq!(Severity::parse("Severe"), Some(Severity::Severe));
        assert_eq!(Severity::parse("moderate"), Some(Severity::Moderate));
        assert_eq!(Severity::parse(" NONE "), Some(Severity::None));
        assert_eq!(Severity::parse("extreme"), None);
    }

    #[test]
    fn levels_follow_order() {
        assert_eq!(Severity::from_level(3), Some(Severity::Severe));
        assert_eq!(Severity::from_level(-1), None);
        assert_eq!(Severity::from_level(4), None);
        assert!(Severity::Mild < Severity::Moderate);
        assert_eq!(Severity::Moderate.level(), 2);
    }
}
