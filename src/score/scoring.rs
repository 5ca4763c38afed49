use serde::{Deserialize, Serialize};

use crate::model::course::{HOLES, Pars};
use crate::model::round::HoleScores;

const FRONT_NINE: std::ops::Range<usize> = 0..9;
const BACK_NINE: std::ops::Range<usize> = 9..HOLES;

/// How a single hole played against its par.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum ScoreDisplay {
    Condor,
    Albatross,
    Eagle,
    Birdie,
    Par,
    Bogey,
    DoubleBogey,
    TripleBogey,
    QuadrupleBogeyOrWorse,
}

impl ScoreDisplay {
    /// Classify `strokes - par`.
    #[must_use]
    pub fn from_relative(relative: i32) -> Self {
        match relative {
            i32::MIN..=-4 => ScoreDisplay::Condor,
            -3 => ScoreDisplay::Albatross,
            -2 => ScoreDisplay::Eagle,
            -1 => ScoreDisplay::Birdie,
            0 => ScoreDisplay::Par,
            1 => ScoreDisplay::Bogey,
            2 => ScoreDisplay::DoubleBogey,
            3 => ScoreDisplay::TripleBogey,
            _ => ScoreDisplay::QuadrupleBogeyOrWorse,
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            ScoreDisplay::Condor => "condor",
            ScoreDisplay::Albatross => "albatross",
            ScoreDisplay::Eagle => "eagle",
            ScoreDisplay::Birdie => "birdie",
            ScoreDisplay::Par => "par",
            ScoreDisplay::Bogey => "bogey",
            ScoreDisplay::DoubleBogey => "double-bogey",
            ScoreDisplay::TripleBogey => "triple-bogey",
            ScoreDisplay::QuadrupleBogeyOrWorse => "quadruple-bogey",
        }
    }
}

impl From<i32> for ScoreDisplay {
    fn from(value: i32) -> Self {
        Self::from_relative(value)
    }
}

/// `score <= par - 1`
#[must_use]
pub fn is_birdie_or_better(score: i32, par: i32) -> bool {
    score <= par - 1
}

/// `score <= par - 2`
#[must_use]
pub fn is_eagle_or_better(score: i32, par: i32) -> bool {
    score <= par - 2
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NineSummary {
    pub strokes: i32,
    pub par: i32,
    pub holes_played: usize,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundSummary {
    pub total_score: i32,
    pub holes_played: usize,
    pub score_to_par: i32,
    pub is_complete: bool,
    pub front_nine: NineSummary,
    pub back_nine: NineSummary,
    pub has_birdie: bool,
    pub has_eagle: bool,
}

impl RoundSummary {
    /// "E", "+3", "-2".
    #[must_use]
    pub fn score_to_par_label(&self) -> String {
        relative_label(self.score_to_par)
    }
}

#[must_use]
pub fn relative_label(relative: i32) -> String {
    match relative {
        0 => "E".to_string(),
        r if r > 0 => format!("+{r}"),
        r => r.to_string(),
    }
}

/// Derive totals and completion from the raw slots. Only filled holes count
/// toward strokes, par and score-to-par.
#[must_use]
pub fn summarize(scores: &HoleScores, pars: &Pars) -> RoundSummary {
    let mut summary = RoundSummary {
        total_score: 0,
        holes_played: 0,
        score_to_par: 0,
        is_complete: false,
        front_nine: NineSummary::default(),
        back_nine: NineSummary::default(),
        has_birdie: false,
        has_eagle: false,
    };

    for (idx, strokes) in scores.filled() {
        let par = pars.at(idx);
        summary.total_score += strokes;
        summary.holes_played += 1;
        summary.score_to_par += strokes - par;
        summary.has_birdie |= is_birdie_or_better(strokes, par);
        summary.has_eagle |= is_eagle_or_better(strokes, par);

        let nine = if FRONT_NINE.contains(&idx) {
            &mut summary.front_nine
        } else {
            debug_assert!(BACK_NINE.contains(&idx));
            &mut summary.back_nine
        };
        nine.strokes += strokes;
        nine.par += par;
        nine.holes_played += 1;
    }

    summary.is_complete = summary.holes_played == HOLES;
    summary
}
