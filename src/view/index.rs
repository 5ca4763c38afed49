use maud::{Markup, html};

use crate::model::RoundWithCourse;
use crate::view::layout::{Notice, render_page};

#[must_use]
pub fn render_index(notices: &[Notice], open_round: Option<&RoundWithCourse>) -> Markup {
    let content = html! {
        p class="lead" {
            "Ask the caddie about your next shot, get a second opinion on your swing, "
            "and keep score as you play."
        }
        @if let Some(entry) = open_round {
            @let summary = entry.summary();
            div class="card open-round" {
                h2 { "Round in progress" }
                p {
                    (entry.course.name) ": " (summary.holes_played) " of 18 holes, "
                    (summary.total_score) " strokes (" (summary.score_to_par_label()) ")"
                }
                a class="button" href=(format!("/rounds/{}", entry.round.round_id)) { "Continue round" }
            }
        }
        div class="card-grid" {
            a class="card" href="/shot_advice" {
                h2 { "Shot Advice" }
                p { "Describe the lie, snap a photo, get a club and a target." }
            }
            a class="card" href="/swing_analysis" {
                h2 { "Swing Analysis" }
                p { "One still frame of your swing, one thing to fix." }
            }
            a class="card" href="/rounds" {
                h2 { "Rounds" }
                p { "Score hole by hole and track your handicap index." }
            }
            a class="card" href="/input_yardages" {
                h2 { "Club Yardages" }
                p { "Tell the caddie how far you hit each club." }
            }
        }
    };
    render_page("Golf Caddie", notices, &content)
}
