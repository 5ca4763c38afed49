use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::str::FromStr;
use thiserror::Error;

use crate::model::validation::FieldError;

pub const HOLES: usize = 18;
pub const MIN_PAR: i32 = 3;
pub const MAX_PAR: i32 = 6;
pub const DEFAULT_PARS: &str = "4,4,3,5,4,4,3,5,4,4,3,5,4,4,3,5,4,4";
pub const DEFAULT_RATING: f64 = 72.0;
pub const DEFAULT_SLOPE: i32 = 113;
pub const MAX_COURSE_NAME_LEN: usize = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsError {
    #[error("'{0}' is not a whole number")]
    NotANumber(String),
    #[error("expected par values for all {HOLES} holes, got {0}")]
    WrongCount(usize),
    #[error("hole {hole} has par {par}; par values must be between {MIN_PAR} and {MAX_PAR}")]
    OutOfRange { hole: usize, par: i32 },
}

/// Par for each of the 18 holes, front nine first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pars([i32; HOLES]);

impl Pars {
    /// # Errors
    ///
    /// Will return `Err` if any par is outside `MIN_PAR..=MAX_PAR`
    pub fn new(pars: [i32; HOLES]) -> Result<Self, ParsError> {
        if let Some((idx, par)) = pars
            .iter()
            .enumerate()
            .find(|(_, p)| !(MIN_PAR..=MAX_PAR).contains(*p))
        {
            return Err(ParsError::OutOfRange {
                hole: idx + 1,
                par: *par,
            });
        }
        Ok(Pars(pars))
    }

    /// Par of the hole at zero-based `idx`.
    #[must_use]
    pub fn at(&self, idx: usize) -> i32 {
        self.0[idx]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    #[must_use]
    pub fn total(&self) -> i32 {
        self.0.iter().sum()
    }

    /// Comma-separated form stored in the `course.pars` column.
    #[must_use]
    pub fn to_db_string(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromStr for Pars {
    type Err = ParsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                p.parse::<i32>()
                    .map_err(|_| ParsError::NotANumber(p.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let count = values.len();
        let pars: [i32; HOLES] = values
            .try_into()
            .map_err(|_| ParsError::WrongCount(count))?;
        Pars::new(pars)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_id: i64,
    pub name: String,
    pub pars: Pars,
    pub rating: f64,
    pub slope: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub name: String,
    pub pars: Pars,
    pub rating: f64,
    pub slope: i32,
}

/// Validate the course entry form: `name`, `pars`, and optional `rating`
/// and `slope`.
///
/// # Errors
///
/// Will return `Err` with one entry per rejected field
pub fn parse_new_course<S: BuildHasher>(
    form: &HashMap<String, String, S>,
) -> Result<NewCourse, Vec<FieldError>> {
    let mut errors = vec![];

    let name = form.get("name").map(|s| s.trim()).unwrap_or_default();
    if name.is_empty() {
        errors.push(FieldError::new("name", "Please enter a course name."));
    } else if name.chars().count() > MAX_COURSE_NAME_LEN {
        errors.push(FieldError::new(
            "name",
            format!("Course names are limited to {MAX_COURSE_NAME_LEN} characters."),
        ));
    }

    let pars = match form.get("pars").map(|s| s.trim()).unwrap_or_default() {
        "" => {
            errors.push(FieldError::new(
                "pars",
                format!("Please enter par values for all {HOLES} holes."),
            ));
            None
        }
        raw => match raw.parse::<Pars>() {
            Ok(p) => Some(p),
            Err(e @ ParsError::NotANumber(_)) => {
                errors.push(FieldError::new(
                    "pars",
                    format!("Invalid par format ({e}). Use comma-separated numbers, e.g. \"4,4,3,5,...\"."),
                ));
                None
            }
            Err(e) => {
                errors.push(FieldError::new("pars", e.to_string()));
                None
            }
        },
    };

    let rating = match form.get("rating").map(|s| s.trim()).unwrap_or_default() {
        "" => DEFAULT_RATING,
        raw => match raw.parse::<f64>() {
            Ok(r) if (50.0..=90.0).contains(&r) => r,
            _ => {
                errors.push(FieldError::new(
                    "rating",
                    "Course rating should be a number between 50.0 and 90.0.",
                ));
                DEFAULT_RATING
            }
        },
    };

    let slope = match form.get("slope").map(|s| s.trim()).unwrap_or_default() {
        "" => DEFAULT_SLOPE,
        raw => match raw.parse::<i32>() {
            Ok(s) if (55..=155).contains(&s) => s,
            _ => {
                errors.push(FieldError::new(
                    "slope",
                    "Slope should be a whole number between 55 and 155.",
                ));
                DEFAULT_SLOPE
            }
        },
    };

    match pars {
        Some(pars) if errors.is_empty() => Ok(NewCourse {
            name: name.to_string(),
            pars,
            rating,
            slope,
        }),
        _ => Err(errors),
    }
}
