//! ANSI styling for the text tables.
//!
//! Color is on unless `NO_COLOR` is set or `TERM` is `dumb`.

/// Relative exposure of a table row against the largest value shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExposureBand {
    Low,
    Moderate,
    High,
}

impl ExposureBand {
    /// Band for `count` out of `max`, split into thirds.
    #[must_use]
    pub fn classify(count: u64, max: u64) -> Self {
        if max == 0 {
            return Self::Low;
        }
        // Integer thirds: count/max > 2/3 <=> 3*count > 2*max.
        let scaled = u128::from(count) * 3;
        let max = u128::from(max);
        if scaled > max * 2 {
            Self::High
        } else if scaled > max {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// Escape sequences for each styling role. Every field is empty in the plain
/// palette so renderers can interpolate unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    /// Table headers and section titles.
    pub heading: &'static str,
    /// Ids and separators.
    pub muted: &'static str,
    /// Window and model annotations.
    pub accent: &'static str,
    low: &'static str,
    moderate: &'static str,
    high: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: "\x1b[0m",
            heading: "\x1b[1;97m",
            muted: "\x1b[90m",
            accent: "\x1b[36m",
            low: "\x1b[32m",
            moderate: "\x1b[38;5;208m",
            high: "\x1b[31m",
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            heading: "",
            muted: "",
            accent: "",
            low: "",
            moderate: "",
            high: "",
        }
    }

    /// Colored palette unless the environment opts out.
    #[must_use]
    pub fn detect() -> Self {
        let term = std::env::var("TERM").ok();
        if color_allowed(std::env::var_os("NO_COLOR").is_some(), term.as_deref()) {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    #[must_use]
    pub fn band(&self, band: ExposureBand) -> &'static str {
        match band {
            ExposureBand::Low => self.low,
            ExposureBand::Moderate => self.moderate,
            ExposureBand::High => self.high,
        }
    }

    /// Shorthand for `band(ExposureBand::classify(count, max))`.
    #[must_use]
    pub fn exposure(&self, count: u64, max: u64) -> &'static str {
        self.band(ExposureBand::classify(count, max))
    }
}

/// Color decision from the two environment signals.
#[must_use]
pub fn color_allowed(no_color: bool, term: Option<&str>) -> bool {
    !no_color && !term.is_some_and(|term| term.eq_ignore_ascii_case("dumb"))
}

/// Render a count with comma-grouped digits.
///
/// ```
/// # use quakerisk_cli::terminal::group_thousands;
/// assert_eq!(group_thousands(512), "512");
/// assert_eq!(group_thousands(67_663), "67,663");
/// ```
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let lead = match digits.len() % 3 {
        0 => 3,
        n => n,
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    grouped.push_str(&digits[..lead]);
    for group in digits.as_bytes()[lead..].chunks(3) {
        grouped.push(',');
        grouped.extend(group.iter().map(|&b| char::from(b)));
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_group_from_the_right() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(100_000), "100,000");
        assert_eq!(group_thousands(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn exposure_splits_into_thirds() {
        assert_eq!(ExposureBand::classify(9, 9), ExposureBand::High);
        assert_eq!(ExposureBand::classify(7, 9), ExposureBand::High);
        assert_eq!(ExposureBand::classify(6, 9), ExposureBand::Moderate);
        assert_eq!(ExposureBand::classify(3, 9), ExposureBand::Low);
        assert_eq!(ExposureBand::classify(0, 0), ExposureBand::Low);
        assert_eq!(ExposureBand::classify(u64::MAX, u64::MAX), ExposureBand::High);
    }

    #[test]
    fn plain_palette_emits_nothing() {
        let palette = ColorPalette::plain();
        assert!(palette.reset.is_empty());
        assert!(palette.exposure(3, 3).is_empty());
        assert_eq!(ColorPalette::colored().exposure(1, 1), "\x1b[31m");
    }

    #[test]
    fn environment_can_disable_color() {
        assert!(color_allowed(false, None));
        assert!(color_allowed(false, Some("xterm-256color")));
        assert!(!color_allowed(true, Some("xterm-256color")));
        assert!(!color_allowed(false, Some("DUMB")));
    }
}
