use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::model::validation::{FieldError, parse_digits};

pub const MIN_YARDAGE: u32 = 1;
pub const MAX_YARDAGE: u32 = 499;

/// The fixed bag. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Club {
    Driver,
    ThreeWood,
    FiveWood,
    Hybrid,
    TwoIron,
    ThreeIron,
    FourIron,
    FiveIron,
    SixIron,
    SevenIron,
    EightIron,
    NineIron,
    PitchingWedge,
    GapWedge,
    SandWedge,
    LobWedge,
    Putter,
}

impl Club {
    pub const ALL: [Club; 17] = [
        Club::Driver,
        Club::ThreeWood,
        Club::FiveWood,
        Club::Hybrid,
        Club::TwoIron,
        Club::ThreeIron,
        Club::FourIron,
        Club::FiveIron,
        Club::SixIron,
        Club::SevenIron,
        Club::EightIron,
        Club::NineIron,
        Club::PitchingWedge,
        Club::GapWedge,
        Club::SandWedge,
        Club::LobWedge,
        Club::Putter,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Club::Driver => "Driver",
            Club::ThreeWood => "3 Wood",
            Club::FiveWood => "5 Wood",
            Club::Hybrid => "Hybrid",
            Club::TwoIron => "2 Iron",
            Club::ThreeIron => "3 Iron",
            Club::FourIron => "4 Iron",
            Club::FiveIron => "5 Iron",
            Club::SixIron => "6 Iron",
            Club::SevenIron => "7 Iron",
            Club::EightIron => "8 Iron",
            Club::NineIron => "9 Iron",
            Club::PitchingWedge => "Pitching Wedge",
            Club::GapWedge => "Gap Wedge",
            Club::SandWedge => "Sand Wedge",
            Club::LobWedge => "Lob Wedge",
            Club::Putter => "Putter",
        }
    }

    /// Form input name, e.g. `sand_wedge`.
    #[must_use]
    pub fn field_name(self) -> String {
        self.name().replace(' ', "_").to_lowercase()
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Club::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for Club {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Saved yardages for one owner, keyed by club so a club appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubYardages(BTreeMap<Club, u32>);

impl ClubYardages {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, club: Club, yards: u32) {
        self.0.insert(club, yards);
    }

    #[must_use]
    pub fn get(&self, club: Club) -> Option<u32> {
        self.0.get(&club).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Saved entries in bag order.
    pub fn iter(&self) -> impl Iterator<Item = (Club, u32)> + '_ {
        self.0.iter().map(|(c, y)| (*c, *y))
    }
}

/// What one yardage-form submission does to a club's row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YardageChange {
    pub club: Club,
    /// `None` deletes any saved value.
    pub yards: Option<u32>,
}

/// Turn the yardage form into one change per club. Any bad entry rejects the
/// whole submission.
///
/// # Errors
///
/// Will return `Err` naming every club whose value is not a yardage in range
pub fn parse_yardage_form<S: BuildHasher>(
    form: &HashMap<String, String, S>,
) -> Result<Vec<YardageChange>, Vec<FieldError>> {
    let mut changes = Vec::with_capacity(Club::ALL.len());
    let mut errors = vec![];

    for club in Club::ALL {
        let field = club.field_name();
        let raw = form.get(&field).map(|s| s.trim()).unwrap_or_default();
        if raw.is_empty() {
            changes.push(YardageChange { club, yards: None });
            continue;
        }
        match parse_digits(raw) {
            Some(yards) if (MIN_YARDAGE..=MAX_YARDAGE).contains(&yards) => {
                changes.push(YardageChange {
                    club,
                    yards: Some(yards),
                });
            }
            Some(_) => errors.push(FieldError::new(
                field,
                format!(
                    "Invalid yardage for {club}: '{raw}'. Must be a number between {MIN_YARDAGE} and {MAX_YARDAGE}."
                ),
            )),
            None => errors.push(FieldError::new(
                field,
                format!("Invalid input for {club}: '{raw}'. Please enter a number."),
            )),
        }
    }

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(errors)
    }
}
