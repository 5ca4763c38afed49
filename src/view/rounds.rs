use maud::{Markup, html};

use crate::model::{Course, HoleNumber, RoundWithCourse};
use crate::score::{HandicapIndex, NineSummary, RoundSummary, ScoreDisplay, relative_label};
use crate::view::layout::{Notice, render_notices, render_page};

fn render_handicap(handicap: Option<&HandicapIndex>) -> Markup {
    html! {
        div class="handicap" {
            @if let Some(h) = handicap {
                span class="handicap-label" { "Handicap index" }
                span class="handicap-value" { (format!("{:.1}", h.index)) }
                span class="handicap-detail" {
                    "best " (h.differentials_used) " of " (h.eligible_rounds) " eligible rounds"
                }
            } @else {
                span class="handicap-label" { "Handicap index" }
                span class="handicap-value" { "N/A" }
                span class="handicap-detail" { "complete a round to get one" }
            }
        }
    }
}

fn render_start_form(courses: &[Course]) -> Markup {
    html! {
        @if courses.is_empty() {
            p { "Add a " a href="/courses/new" { "course" } " before starting a round." }
        } @else {
            form method="post" action="/rounds/start" class="start-round" {
                label for="course_id" { "Course" }
                select id="course_id" name="course_id" {
                    @for course in courses {
                        option value=(course.course_id) { (course.name) }
                    }
                }
                button type="submit" { "Start round" }
            }
        }
    }
}

#[must_use]
pub fn render_round_list(
    notices: &[Notice],
    rounds: &[RoundWithCourse],
    handicap: Option<&HandicapIndex>,
    courses: &[Course],
) -> Markup {
    let open = rounds.iter().find(|r| !r.round.is_complete);
    let content = html! {
        (render_handicap(handicap))
        @if let Some(entry) = open {
            p class="open-round" {
                "You have a round in progress at " (entry.course.name) ". "
                a href=(format!("/rounds/{}", entry.round.round_id)) { "Continue" }
            }
        } @else {
            (render_start_form(courses))
        }
        @if rounds.is_empty() {
            p class="empty" { "No rounds yet." }
        } @else {
            table class="rounds" {
                thead {
                    tr {
                        th { "Date" }
                        th { "Course" }
                        th { "Holes" }
                        th { "Score" }
                        th { "To par" }
                        th {}
                    }
                }
                tbody {
                    @for entry in rounds {
                        @let summary = entry.summary();
                        tr class=(if entry.round.is_complete { "complete" } else { "in-progress" }) {
                            td { (entry.round.date_played.format("%Y-%m-%d").to_string()) }
                            td {
                                a href=(format!("/rounds/{}", entry.round.round_id)) { (entry.course.name) }
                            }
                            td { (summary.holes_played) }
                            td { (summary.total_score) }
                            td { (summary.score_to_par_label()) }
                            td class="actions" {
                                form method="post" action=(format!("/rounds/{}/delete", entry.round.round_id)) class="inline"
                                    onsubmit="return confirm('Delete this round?');" {
                                    button type="submit" class="danger" { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    render_page("Rounds", notices, &content)
}

fn render_nine_row(label: &str, nine: &NineSummary) -> Markup {
    html! {
        tr class="subtotal" {
            th { (label) }
            td { (nine.par) }
            td { @if nine.holes_played > 0 { (nine.strokes) } }
        }
    }
}

fn render_hole_row(entry: &RoundWithCourse, hole: HoleNumber, focus: Option<HoleNumber>) -> Markup {
    let par = entry.course.pars.at(hole.index());
    let score = entry.round.hole_scores.get(hole);
    let class = score.map_or("hole", |s| ScoreDisplay::from_relative(s - par).css_class());
    let action = format!("/rounds/{}/holes/{}", entry.round.round_id, hole);
    html! {
        tr class=(class) data-hole=(hole.get()) {
            th { (hole.get()) }
            td { (par) }
            td class="score" {
                @if entry.round.is_complete {
                    (score.map(|s| s.to_string()).unwrap_or_default())
                } @else {
                    form method="post" action=(action) hx-post=(action)
                        hx-target="#round-card" hx-swap="outerHTML" class="hole-form" {
                        input type="number" name="strokes" min="1" max="20" inputmode="numeric"
                            value=(score.map(|s| s.to_string()).unwrap_or_default())
                            autofocus[focus == Some(hole)];
                        button type="submit" { "Save" }
                    }
                }
            }
        }
    }
}

fn render_summary(summary: &RoundSummary) -> Markup {
    html! {
        dl class="round-summary" {
            dt { "Holes" } dd { (summary.holes_played) " / 18" }
            dt { "Strokes" } dd { (summary.total_score) }
            dt { "To par" } dd class="to-par" { (relative_label(summary.score_to_par)) }
        }
    }
}

/// The part of the round page that htmx swaps after each hole.
#[must_use]
pub fn render_round_card(entry: &RoundWithCourse, notices: &[Notice]) -> Markup {
    let summary = entry.summary();
    let focus = entry.next_hole();
    let round_id = entry.round.round_id;
    html! {
        div id="round-card" {
            (render_notices(notices))
            (render_summary(&summary))
            table class="round-holes" {
                thead {
                    tr {
                        th { "Hole" }
                        th { "Par" }
                        th { "Score" }
                    }
                }
                tbody {
                    @for hole in HoleNumber::all() {
                        (render_hole_row(entry, hole, focus))
                        @if hole.get() == 9 {
                            (render_nine_row("OUT", &summary.front_nine))
                        }
                    }
                    (render_nine_row("IN", &summary.back_nine))
                    tr class="total" {
                        th { "TOTAL" }
                        td { (entry.course.pars.total()) }
                        td { (summary.total_score) }
                    }
                }
            }
            @if entry.round.is_complete {
                div class="scorecard" {
                    a href=(format!("/rounds/{round_id}/scorecard.png")) download=(format!("scorecard-{round_id}.png")) {
                        "Download scorecard"
                    }
                    img src=(format!("/rounds/{round_id}/scorecard.png")) alt="Scorecard";
                }
            }
        }
    }
}

#[must_use]
pub fn render_round_page(notices: &[Notice], entry: &RoundWithCourse) -> Markup {
    let title = format!(
        "{} - {}",
        entry.course.name,
        entry.round.date_played.format("%Y-%m-%d")
    );
    let content = html! {
        (render_round_card(entry, &[]))
        p class="back" { a href="/rounds" { "All rounds" } }
    };
    render_page(&title, notices, &content)
}
