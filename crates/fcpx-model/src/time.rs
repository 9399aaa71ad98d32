//! Rational time values in the FCPXML textual convention.
//!
//! Attribute values such as `start` and `duration` are fractions of a
//! second: `"0s"`, `"5s"`, `"1001/30000s"`. The arithmetic itself is
//! `num_rational::Ratio<i64>`; this type owns only the parsing and the
//! round-trip-stable rendering of that convention. Malformed input parses
//! to `None` so callers can treat it as default/absent, never as a crash.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use num_rational::Ratio;

/// A signed rational number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RationalTime(Ratio<i64>);

impl RationalTime {
    pub fn zero() -> RationalTime {
        RationalTime(Ratio::from_integer(0))
    }

    /// Build from a fraction; `None` when the denominator is zero.
    pub fn new(numer: i64, denom: i64) -> Option<RationalTime> {
        if denom == 0 {
            return None;
        }
        Some(RationalTime(Ratio::new(numer, denom)))
    }

    pub fn from_seconds(seconds: i64) -> RationalTime {
        RationalTime(Ratio::from_integer(seconds))
    }

    /// Parse the `"Ns"` / `"N/Ds"` attribute convention.
    pub fn parse(value: &str) -> Option<RationalTime> {
        let body = value.strip_suffix('s')?;
        match body.split_once('/') {
            Some((numer, denom)) => {
                let numer = parse_int(numer)?;
                let denom = parse_int(denom)?;
                RationalTime::new(numer, denom)
            }
            None => Some(RationalTime::from_seconds(parse_int(body)?)),
        }
    }

    pub fn numer(&self) -> i64 {
        *self.0.numer()
    }

    pub fn denom(&self) -> i64 {
        *self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.numer() == 0
    }

    pub fn as_seconds_f64(&self) -> f64 {
        self.numer() as f64 / self.denom() as f64
    }
}

impl Default for RationalTime {
    fn default() -> Self {
        RationalTime::zero()
    }
}

/// Integer parse that admits an optional leading minus and nothing else.
fn parse_int(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for RationalTime {
    /// Renders `"0s"`, whole seconds as `"Ns"`, and everything else as the
    /// reduced fraction `"N/Ds"` — the exact forms the format expects.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            f.write_str("0s")
        } else if self.denom() == 1 {
            write!(f, "{}s", self.numer())
        } else {
            write!(f, "{}/{}s", self.numer(), self.denom())
        }
    }
}

impl Add for RationalTime {
    type Output = RationalTime;

    fn add(self, rhs: RationalTime) -> RationalTime {
        RationalTime(self.0 + rhs.0)
    }
}

impl Sub for RationalTime {
    type Output = RationalTime;

    fn sub(self, rhs: RationalTime) -> RationalTime {
        RationalTime(self.0 - rhs.0)
    }
}

impl Neg for RationalTime {
    type Output = RationalTime;

    fn neg(self) -> RationalTime {
        RationalTime(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_three_textual_forms() {
        assert_eq!(RationalTime::parse("0s"), Some(RationalTime::zero()));
        assert_eq!(RationalTime::parse("7s"), Some(RationalTime::from_seconds(7)));
        assert_eq!(
            RationalTime::parse("1001/30000s"),
            RationalTime::new(1001, 30000)
        );
        assert_eq!(
            RationalTime::parse("-3600/2500s"),
            RationalTime::new(-3600, 2500)
        );
    }

    #[test]
    fn malformed_input_is_none() {
        for input in ["", "5", "s", "1/0s", "1//2s", "1/2", "five s", "+5s", "1.5s"] {
            assert_eq!(RationalTime::parse(input), None, "accepted {input:?}");
        }
    }

    #[test]
    fn renders_canonical_forms() {
        assert_eq!(RationalTime::zero().to_string(), "0s");
        assert_eq!(RationalTime::from_seconds(12).to_string(), "12s");
        assert_eq!(RationalTime::new(1001, 30000).unwrap().to_string(), "1001/30000s");
        // reduction happens on construction
        assert_eq!(RationalTime::new(3600, 2400).unwrap().to_string(), "3/2s");
        assert_eq!(RationalTime::new(10, 5).unwrap().to_string(), "2s");
    }

    #[test]
    fn arithmetic_goes_through_the_fraction() {
        let a = RationalTime::new(1, 3).unwrap();
        let b = RationalTime::new(1, 6).unwrap();
        assert_eq!((a + b).to_string(), "1/2s");
        assert_eq!((a - b).to_string(), "1/6s");
        assert_eq!((-a).to_string(), "-1/3s");
        assert!(b < a);
    }
}
