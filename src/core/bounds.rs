//! Threshold ranges.
//!
//! Implements the monitoring plugin range grammar (`[@]start:end`, `[@]end`, `[@]`)
//! and matching of measured values against it.

use std::fmt;
use std::str::FromStr;

use crate::error::{NagkitError, Result};

/// A numeric interval with optionally inverted matching.
///
/// A missing bound leaves that side unconstrained. When `inverted` is false a value
/// matches if it lies inside the interval (inclusive), otherwise if it lies outside.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    inverted: bool,
    lower: Option<f64>,
    upper: Option<f64>,
}

impl Bounds {
    /// Unconstrained, non-inverted bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-inverted bounds covering `lower..=upper`.
    pub fn between(lower: f64, upper: f64) -> Self {
        Self::new().with_lower(lower).with_upper(upper)
    }

    pub fn with_lower(mut self, value: f64) -> Self {
        self.lower = Some(value);
        self
    }

    pub fn with_upper(mut self, value: f64) -> Self {
        self.upper = Some(value);
        self
    }

    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Parse a range specifier such as `10`, `10:20`, `~:5`, `@0:3` or an empty string.
    pub fn parse(specifier: &str) -> Result<Self> {
        let (inverted, body) = match specifier.strip_prefix('@') {
            Some(rest) => (true, rest),
            None => (false, specifier),
        };

        let parts: Vec<&str> = body.split(':').collect();
        let (start, end) = match parts.as_slice() {
            [end] => ("", *end),
            [start, end] => (*start, *end),
            _ => {
                return Err(NagkitError::invalid_range(format!(
                    "range specifier [{}] must contain at most one colon",
                    specifier
                )))
            }
        };

        Ok(Self {
            inverted,
            lower: Some(parse_part(start, true)?),
            upper: Some(parse_part(end, false)?),
        })
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    /// Check whether `value` matches these bounds.
    ///
    /// NaN and infinite values never match, regardless of inversion.
    pub fn matches(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }

        let below = self.lower.is_some_and(|lower| value < lower);
        let above = self.upper.is_some_and(|upper| value > upper);
        let inside = !below && !above;

        inside != self.inverted
    }

    /// Render the canonical range specifier for these bounds.
    pub fn to_range_text(&self) -> String {
        let prefix = if self.inverted { "@" } else { "" };
        let start = self.start_text();
        let end = self.end_text();

        let body = match (start.is_empty(), end.is_empty()) {
            (true, true) => String::new(),
            (true, false) => end,
            (false, true) => format!("{}:", start),
            (false, false) => format!("{}:{}", start, end),
        };

        format!("{}{}", prefix, body)
    }

    /// Describe why a value that failed to match these bounds is a problem.
    ///
    /// The wording is the opposite sense of [`fmt::Display`]: non-inverted bounds yield
    /// `outside range lo:hi`, inverted bounds yield `inside range lo:hi`.
    pub fn violation_hint(&self) -> String {
        let sense = if self.inverted { "inside" } else { "outside" };
        format!("{} range {}", sense, self.interval_text())
    }

    /// Lower bound as it appears in a range specifier. Zero is implied and left out.
    pub(crate) fn start_text(&self) -> String {
        match self.lower {
            None => "~".to_string(),
            Some(lower) if lower == f64::NEG_INFINITY => "~".to_string(),
            Some(lower) if lower == 0.0 => String::new(),
            Some(lower) => format_number(lower),
        }
    }

    /// Upper bound as it appears in a range specifier. Positive infinity is left out.
    pub(crate) fn end_text(&self) -> String {
        match self.upper {
            None => String::new(),
            Some(upper) if upper == f64::INFINITY => String::new(),
            Some(upper) => format_number(upper),
        }
    }

    pub(crate) fn interval_text(&self) -> String {
        let lower = match self.lower {
            Some(lower) if lower.is_finite() => format_number(lower),
            _ => "-inf".to_string(),
        };
        let upper = match self.upper {
            Some(upper) if upper.is_finite() => format_number(upper),
            _ => "inf".to_string(),
        };

        format!("{}:{}", lower, upper)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sense = if self.inverted { "outside" } else { "inside" };
        write!(f, "{} range {}", sense, self.interval_text())
    }
}

impl FromStr for Bounds {
    type Err = NagkitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Shortest decimal text that parses back to the same `f64`, without exponent.
///
/// Integral values render without a decimal point.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

fn parse_part(part: &str, is_start: bool) -> Result<f64> {
    match part {
        "" if is_start => Ok(0.0),
        "" => Ok(f64::INFINITY),
        "~" if is_start => Ok(f64::NEG_INFINITY),
        "~" => Err(NagkitError::invalid_range(
            "negative infinity can not be used as range end",
        )),
        _ => part.parse::<f64>().map_err(|e| {
            NagkitError::invalid_range(format!(
                "could not parse range part [{}] as float ({})",
                part, e
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bounds_is_unconstrained() {
        let bounds = Bounds::new();
        assert!(!bounds.is_inverted());
        assert_eq!(bounds.lower(), None);
        assert_eq!(bounds.upper(), None);
        assert!(bounds.matches(-1e12));
        assert!(bounds.matches(1e12));
    }

    #[test]
    fn test_parse_specifiers() {
        let cases = [
            ("", false, 0.0, f64::INFINITY),
            (":", false, 0.0, f64::INFINITY),
            ("~:", false, f64::NEG_INFINITY, f64::INFINITY),
            ("1:", false, 1.0, f64::INFINITY),
            (":1", false, 0.0, 1.0),
            ("10", false, 0.0, 10.0),
            ("1:2", false, 1.0, 2.0),
            ("-3.5:2.25", false, -3.5, 2.25),
            ("@", true, 0.0, f64::INFINITY),
            ("@~:0", true, f64::NEG_INFINITY, 0.0),
        ];

        for (specifier, inverted, lower, upper) in cases {
            let bounds = Bounds::parse(specifier).unwrap();
            assert_eq!(bounds.is_inverted(), inverted, "specifier {:?}", specifier);
            assert_eq!(bounds.lower(), Some(lower), "specifier {:?}", specifier);
            assert_eq!(bounds.upper(), Some(upper), "specifier {:?}", specifier);
        }
    }

    #[test]
    fn test_parse_invalid_specifiers() {
        for specifier in [":~", "~", "no:float", "::", "1:2:3", "@abc"] {
            let err = Bounds::parse(specifier);
            assert!(
                matches!(err, Err(NagkitError::InvalidRange(_))),
                "specifier {:?} should fail",
                specifier
            );
        }
    }

    #[test]
    fn test_to_range_text() {
        let cases = [
            ("", ""),
            (":", ""),
            ("~:", "~:"),
            ("@", "@"),
            ("@:", "@"),
            ("1:", "1:"),
            ("1:2", "1:2"),
            (":2", "2"),
            ("@1:9", "@1:9"),
            ("@-100:0", "@-100:0"),
            ("-100:", "-100:"),
            ("0.5:1e3", "0.5:1000"),
        ];

        for (specifier, expected) in cases {
            let bounds = Bounds::parse(specifier).unwrap();
            assert_eq!(bounds.to_range_text(), expected, "specifier {:?}", specifier);
        }
    }

    #[test]
    fn test_range_text_is_idempotent() {
        for specifier in ["", "~:", "@", "1:", "5", "@1:9", "-10:-5", "~:7.25", "@0.1:"] {
            let canonical = Bounds::parse(specifier).unwrap().to_range_text();
            let reparsed = Bounds::parse(&canonical).unwrap().to_range_text();
            assert_eq!(canonical, reparsed, "specifier {:?}", specifier);
        }
    }

    #[test]
    fn test_match_inside() {
        let bounds = Bounds::between(10.0, 20.0);
        for value in [10.0, 15.0, 20.0] {
            assert!(bounds.matches(value), "{} should match", value);
        }
        for value in [9.0, 21.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(!bounds.matches(value), "{} should not match", value);
        }
    }

    #[test]
    fn test_match_inverted() {
        let bounds = Bounds::between(10.0, 20.0).inverted(true);
        for value in [9.0, 21.0] {
            assert!(bounds.matches(value), "{} should match", value);
        }
        for value in [10.0, 15.0, 20.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(!bounds.matches(value), "{} should not match", value);
        }
    }

    #[test]
    fn test_display_and_violation_hint() {
        let inside = Bounds::between(10.0, 20.0);
        let outside = Bounds::between(10.0, 20.0).inverted(true);

        assert_eq!(inside.to_string(), "inside range 10:20");
        assert_eq!(outside.to_string(), "outside range 10:20");
        assert_eq!(inside.violation_hint(), outside.to_string());
        assert_eq!(outside.violation_hint(), inside.to_string());
    }

    #[test]
    fn test_violation_hint_defaults() {
        assert_eq!(
            Bounds::parse("").unwrap().violation_hint(),
            "outside range 0:inf"
        );
        assert_eq!(
            Bounds::parse("~:5").unwrap().violation_hint(),
            "outside range -inf:5"
        );
        assert_eq!(Bounds::new().violation_hint(), "outside range -inf:inf");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(4200000000.0), "4200000000");
        assert_eq!(format_number(420000.42), "420000.42");
        assert_eq!(format_number(13.37), "13.37");
        assert_eq!(format_number(-5.0), "-5");
    }
}
