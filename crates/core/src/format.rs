//! Display formatting for dashboard values.
//!
//! Everything here is pure: numbers in, strings or tiers out.

const SUCCESS_COLOR: &str = "#10b981";
const WARNING_COLOR: &str = "#f59e0b";
const DANGER_COLOR: &str = "#ef4444";

/// Abbreviates large counts: `1_500_000` → `"1.5M"`, `2_300` → `"2.3K"`, `42` → `"42"`.
///
/// One decimal place, rounded half-up on the exact integer value.
pub fn abbreviate(n: u64) -> String {
    if n >= 1_000_000 {
        tenths(n, 100_000) + "M"
    } else if n >= 1_000 {
        tenths(n, 100) + "K"
    } else {
        n.to_string()
    }
}

fn tenths(n: u64, unit: u64) -> String {
    let t = n / unit + u64::from(n % unit >= unit / 2);
    format!("{}.{}", t / 10, t % 10)
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Success,
    Warning,
    Danger,
}

impl Tier {
    pub fn color(self) -> &'static str {
        match self {
            Tier::Success => SUCCESS_COLOR,
            Tier::Warning => WARNING_COLOR,
            Tier::Danger => DANGER_COLOR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Success => "success",
            Tier::Warning => "warning",
            Tier::Danger => "danger",
        }
    }
}

/// Tier for a winner probability in `[0, 1]`.
pub fn probability_tier(probability: f64) -> Tier {
    if probability > 0.5 {
        Tier::Success
    } else if probability > 0.3 {
        Tier::Warning
    } else {
        Tier::Danger
    }
}

/// Tier for a 0–100 sub-score. Competition and risk are `lower_is_better`.
pub fn score_tier(score: f64, lower_is_better: bool) -> Tier {
    let normalized = bar_percent(score);
    let effective = if lower_is_better {
        100.0 - normalized
    } else {
        normalized
    };

    if effective >= 70.0 {
        Tier::Success
    } else if effective >= 40.0 {
        Tier::Warning
    } else {
        Tier::Danger
    }
}

/// Width of a progress bar. Only for bar geometry; displayed numbers stay unclamped.
pub fn bar_percent(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

/// `0.625` → `"62.5"`.
pub fn probability_percent(probability: f64) -> String {
    format!("{:.1}", probability * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Thresholds apply to the raw risk score, not the inverted one used for colors.
    pub fn from_risk(score_risk: f64) -> Self {
        if score_risk > 80.0 {
            RiskLevel::High
        } else if score_risk > 50.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            RiskLevel::High => "exclamation-triangle",
            RiskLevel::Medium => "info-circle",
            RiskLevel::Low => "check-circle",
        }
    }
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviates_by_magnitude() {
        assert_eq!(abbreviate(1_500_000), "1.5M");
        assert_eq!(abbreviate(2_300), "2.3K");
        assert_eq!(abbreviate(42), "42");
        assert_eq!(abbreviate(0), "0");
        assert_eq!(abbreviate(999), "999");
        assert_eq!(abbreviate(1_000), "1.0K");
        assert_eq!(abbreviate(1_000_000), "1.0M");
    }

    #[test]
    fn abbreviation_rounds_half_up() {
        assert_eq!(abbreviate(1_250), "1.3K");
        assert_eq!(abbreviate(1_249), "1.2K");
        assert_eq!(abbreviate(2_450_000), "2.5M");
    }

    #[test]
    fn abbreviates_the_largest_counts() {
        assert_eq!(abbreviate(u64::MAX), "18446744073709.6M");
        assert_eq!(abbreviate(999_999), "1000.0K");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn score_tiers_with_inversion() {
        assert_eq!(score_tier(85.0, false), Tier::Success);
        assert_eq!(score_tier(85.0, true), Tier::Danger);
        assert_eq!(score_tier(55.0, false), Tier::Warning);
        assert_eq!(score_tier(20.0, true), Tier::Success);
        assert_eq!(score_tier(70.0, false), Tier::Success);
        assert_eq!(score_tier(39.9, false), Tier::Danger);
    }

    #[test]
    fn probability_tiers() {
        assert_eq!(probability_tier(0.62), Tier::Success);
        assert_eq!(probability_tier(0.5), Tier::Warning);
        assert_eq!(probability_tier(0.31), Tier::Warning);
        assert_eq!(probability_tier(0.3), Tier::Danger);
    }

    #[test]
    fn bar_percent_clamps() {
        assert_eq!(bar_percent(120.0), 100.0);
        assert_eq!(bar_percent(-5.0), 0.0);
        assert_eq!(bar_percent(42.5), 42.5);
        assert_eq!(bar_percent(f64::NAN), 0.0);
    }

    #[test]
    fn risk_levels_use_raw_score() {
        assert_eq!(RiskLevel::from_risk(81.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_risk(80.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_risk(50.0), RiskLevel::Low);
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;y&#39;"
        );
    }
}
