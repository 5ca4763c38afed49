use crate::caddie::evidence::{Evidence, ImageData};
use crate::model::club::ClubYardages;

pub const SHOT_ADVICE_MAX_TOKENS: u32 = 300;
pub const SWING_ANALYSIS_MAX_TOKENS: u32 = 400;

pub const CADDIE_PERSONA: &str = "Act as a professional golf caddie. \
The golfer needs advice based on their current situation, any provided image, and their club yardages. \
Assess the situation, offer strategic advice (club choice, shot type, aim). \
When suggesting a club, *always* consider the provided 'Your Club Yardages' data and the 'Distance to target' if available. \
If a specific distance is mentioned, recommend a club from their list that best matches or is close to that distance. \
Be concise, like a good caddie. \
Explain your advice based on the image and the context.";

pub const SWING_INSTRUCTOR_PERSONA: &str = "You are a professional golf instructor and caddie. \
You are reviewing a golfer's swing captured in an image. \
Analyze the posture, club position (if visible), and overall swing mechanics. \
Provide constructive feedback, focusing on 1-2 key areas for improvement. \
Offer a specific, actionable tip. \
Remember, you're observing a *still image*, so focus on what can be inferred visually.";

pub const NO_YARDAGES_NOTICE: &str = "No club yardages saved yet. \
The golfer has not recorded how far they hit each club, so give general club guidance.";

pub const NO_IMAGE_NOTICE: &str =
    "No image was provided, please provide general advice based on the text context.";

pub const NO_CONTEXT: &str = "(no description given)";

/// Everything the completion function is given for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub user_text: String,
    /// Sent as image data when present. When absent `user_text` already says so.
    pub image: Option<ImageData>,
    pub max_tokens: u32,
}

/// `Your Club Yardages:` followed by one line per saved club, or the
/// no-yardages notice.
#[must_use]
pub fn yardage_summary(yardages: &ClubYardages) -> String {
    if yardages.is_empty() {
        return NO_YARDAGES_NOTICE.to_string();
    }
    let lines = yardages
        .iter()
        .map(|(club, yards)| format!("- {club}: {yards} yards"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Your Club Yardages:\n{lines}")
}

/// Shot advice: yardage summary, then the situation, then the target distance.
#[must_use]
pub fn compose_shot_advice(
    evidence: &Evidence,
    yardages: &ClubYardages,
    target_distance: Option<u32>,
) -> CompletionRequest {
    let mut sections = vec![
        yardage_summary(yardages),
        format!(
            "Golfer's context: {}",
            evidence.text().unwrap_or(NO_CONTEXT)
        ),
    ];
    if let Some(yards) = target_distance {
        sections.push(format!("Distance to target: {yards} yards."));
    }
    finish(CADDIE_PERSONA, sections, evidence, SHOT_ADVICE_MAX_TOKENS)
}

#[must_use]
pub fn compose_swing_analysis(evidence: &Evidence) -> CompletionRequest {
    let sections = vec![format!(
        "Golfer's notes on swing: {}",
        evidence.text().unwrap_or(NO_CONTEXT)
    )];
    finish(
        SWING_INSTRUCTOR_PERSONA,
        sections,
        evidence,
        SWING_ANALYSIS_MAX_TOKENS,
    )
}

fn finish(
    persona: &str,
    mut sections: Vec<String>,
    evidence: &Evidence,
    max_tokens: u32,
) -> CompletionRequest {
    let image = evidence.image().cloned();
    if image.is_none() {
        sections.push(NO_IMAGE_NOTICE.to_string());
    }
    CompletionRequest {
        system: persona.to_string(),
        user_text: sections.join("\n\n"),
        image,
        max_tokens,
    }
}
