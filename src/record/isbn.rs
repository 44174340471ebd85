//! ISBN validation and normalization
//!
//! Accepts ISBN-10 and ISBN-13 input with arbitrary hyphens or spaces.
//! Every valid input is converted to ISBN-13 and stored as
//! `PPP-DDDDDDDDD-C` (Bookland prefix, body, check digit), so two inputs
//! naming the same book always produce identical values.

use std::fmt;
use std::str::FromStr;

use super::errors::{RecordError, RecordResult};

/// A validated, normalized ISBN.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Isbn(String);

impl Isbn {
    /// Validates `input` and normalizes it.
    pub fn parse(input: &str) -> RecordResult<Self> {
        let digits = Self::strip(input)?;
        let compact = match digits.len() {
            10 => {
                if !isbn10_valid(&digits) {
                    return Err(RecordError::ChecksumMismatch { input: input.to_string() });
                }
                isbn10_to_13(&digits)
            }
            13 => {
                if digits.contains('X') {
                    return Err(RecordError::InvalidCharacter {
                        input: input.to_string(),
                        found: 'X',
                    });
                }
                if !(digits.starts_with("978") || digits.starts_with("979")) {
                    return Err(RecordError::InvalidPrefix { input: input.to_string() });
                }
                if !isbn13_valid(&digits) {
                    return Err(RecordError::ChecksumMismatch { input: input.to_string() });
                }
                digits
            }
            n => {
                return Err(RecordError::InvalidLength {
                    input: input.to_string(),
                    digits: n,
                })
            }
        };

        Ok(Isbn(format!(
            "{}-{}-{}",
            &compact[0..3],
            &compact[3..12],
            &compact[12..13]
        )))
    }

    /// Removes separators, rejecting anything that is not a digit or a
    /// final check character `X`.
    fn strip(input: &str) -> RecordResult<String> {
        let mut digits = String::with_capacity(13);
        let significant: Vec<char> = input
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .collect();

        for (i, c) in significant.iter().enumerate() {
            match c {
                '0'..='9' => digits.push(*c),
                'X' | 'x' if i + 1 == significant.len() => digits.push('X'),
                other => {
                    return Err(RecordError::InvalidCharacter {
                        input: input.to_string(),
                        found: *other,
                    })
                }
            }
        }
        Ok(digits)
    }

    /// The canonical hyphenated form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 13 bare digits, as used in lookup queries
    pub fn compact(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

fn digit(c: char) -> u32 {
    match c {
        'X' => 10,
        c => c.to_digit(10).unwrap_or(0),
    }
}

fn isbn10_valid(digits: &str) -> bool {
    let sum: u32 = digits
        .chars()
        .enumerate()
        .map(|(i, c)| (10 - i as u32) * digit(c))
        .sum();
    sum % 11 == 0
}

fn isbn13_sum(digits: &str) -> u32 {
    digits
        .chars()
        .enumerate()
        .map(|(i, c)| if i % 2 == 0 { digit(c) } else { 3 * digit(c) })
        .sum()
}

fn isbn13_valid(digits: &str) -> bool {
    isbn13_sum(digits) % 10 == 0
}

fn isbn10_to_13(digits: &str) -> String {
    let mut converted = format!("978{}", &digits[..9]);
    let check = (10 - isbn13_sum(&converted) % 10) % 10;
    converted.push_str(&check.to_string());
    converted
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Isbn {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Isbn::parse(s)
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
