//! Conversion between TeX dimensions and ems
//!
//! - `valid_unit` validates a unit string or measurement
//! - `calculate_size` converts a [`Measurement`] into ems
//! - `make_em` formats a number as an em string rounded to 4 decimals
//!
//! Without font metrics the conversion uses the fixed text-style values of
//! the Computer Modern fonts: 10pt per em, an x-height of 0.431em and
//! 18mu per em.

use crate::types::{ParseError, ParseErrorKind};

const PT_PER_EM: f64 = 10.0;
const X_HEIGHT: f64 = 0.431;
const MU_PER_EM: f64 = 18.0;

/// A number with a TeX unit, e.g. `3mu`.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement<T> {
    pub number: f64,
    pub unit: T,
}

pub type MeasurementOwned = Measurement<String>;

fn pt_per_unit<T>(unit: &T) -> Option<f64>
where
    T: AsRef<str>,
{
    match unit.as_ref() {
        // https://en.wikibooks.org/wiki/LaTeX/Lengths
        "pt" => Some(1.0),
        "mm" => Some(7227.0 / 2540.0),
        "cm" => Some(7227.0 / 254.0),
        "in" => Some(72.27),
        "bp" | "px" => Some(803.0 / 800.0),
        "pc" => Some(12.0),
        "dd" => Some(1238.0 / 1157.0),
        "cc" => Some(14856.0 / 1157.0),
        "nd" => Some(685.0 / 642.0),
        "nc" => Some(1370.0 / 107.0),
        "sp" => Some(1.0 / 65536.0),
        _ => None,
    }
}

pub fn valid_unit_str<T>(unit: T) -> bool
where
    T: AsRef<str>,
{
    pt_per_unit(&unit).is_some() || matches!(unit.as_ref(), "ex" | "em" | "mu")
}

pub fn valid_unit<T>(measurement: &Measurement<T>) -> bool
where
    T: AsRef<str>,
{
    valid_unit_str(&measurement.unit)
}

/// Converts a measurement into ems.
pub fn calculate_size<T>(size: &Measurement<T>) -> Result<f64, ParseError>
where
    T: AsRef<str>,
{
    let scale = if let Some(pt) = pt_per_unit(&size.unit) {
        pt / PT_PER_EM
    } else {
        match size.unit.as_ref() {
            "mu" => 1.0 / MU_PER_EM,
            "ex" => X_HEIGHT,
            "em" => 1.0,
            other => {
                return Err(ParseError::new(ParseErrorKind::InvalidUnit {
                    unit: other.to_owned(),
                }));
            }
        }
    };
    Ok(size.number * scale)
}

#[must_use]
pub fn make_em(n: f64) -> String {
    // Format with 4 decimals like JavaScript's `Number#toFixed(4)`
    let mut s = format!("{n:.4}");

    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }

    if s == "-0" {
        "0".clone_into(&mut s);
    }

    s.push_str("em");
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_unit() {
        assert!(valid_unit_str("pt"));
        assert!(valid_unit_str("mu"));
        assert!(valid_unit_str("ex"));
        assert!(!valid_unit_str("Hz"));
        assert!(valid_unit(&Measurement {
            number: 1.0,
            unit: "cm",
        }));
    }

    #[test]
    fn test_make_em_rounding() {
        assert_eq!(make_em(1.0), "1em");
        assert_eq!(make_em(3.0 / 18.0), "0.1667em");
        assert_eq!(make_em(-0.00001), "0em");
    }

    #[test]
    fn test_calculate_size() {
        let thin = MeasurementOwned {
            number: 3.0,
            unit: "mu".to_owned(),
        };
        assert!((calculate_size(&thin).unwrap() - 1.0 / 6.0).abs() < 1e-12);

        let points = Measurement {
            number: 10.0,
            unit: "pt",
        };
        assert!((calculate_size(&points).unwrap() - 1.0).abs() < 1e-12);

        let ex = Measurement {
            number: 2.0,
            unit: "ex",
        };
        assert!((calculate_size(&ex).unwrap() - 0.862).abs() < 1e-12);

        let bogus = Measurement {
            number: 1.0,
            unit: "kHz",
        };
        assert!(matches!(
            calculate_size(&bogus).unwrap_err().kind.as_ref(),
            ParseErrorKind::InvalidUnit { unit } if unit == "kHz"
        ));
    }
}
