use std::collections::HashMap;

use maud::{Markup, html};

use crate::model::{Club, ClubYardages, FieldError, MAX_YARDAGE, MIN_YARDAGE};
use crate::view::layout::{Notice, field_error, render_page};

/// Form values keyed by club field name, from the saved book or from a
/// rejected submission.
#[must_use]
pub fn yardage_form_values(yardages: &ClubYardages) -> HashMap<String, String> {
    yardages
        .iter()
        .map(|(club, yards)| (club.field_name(), yards.to_string()))
        .collect()
}

#[must_use]
pub fn render_input_yardages(
    notices: &[Notice],
    values: &HashMap<String, String>,
    errors: &[FieldError],
) -> Markup {
    let content = html! {
        p class="hint" { "Average carry in yards. Leave a club blank to remove it." }
        form method="post" action="/input_yardages" class="yardage-form" {
            @for club in Club::ALL {
                @let field = club.field_name();
                @let value = values.get(&field).map(String::as_str).unwrap_or_default();
                div class="yardage-row" {
                    label for=(field) { (club.name()) }
                    input type="number" id=(field) name=(field) min=(MIN_YARDAGE) max=(MAX_YARDAGE)
                        inputmode="numeric" value=(value);
                    @if let Some(msg) = field_error(errors, &field) {
                        span class="field-error" { (msg) }
                    }
                }
            }
            button type="submit" { "Save yardages" }
        }
    };
    render_page("Club Yardages", notices, &content)
}

#[must_use]
pub fn render_view_yardages(notices: &[Notice], yardages: &ClubYardages) -> Markup {
    let content = html! {
        @if yardages.is_empty() {
            p class="empty" {
                "No yardages saved yet. "
                a href="/input_yardages" { "Add them now." }
            }
        } @else {
            table class="yardages" {
                thead {
                    tr {
                        th { "Club" }
                        th { "Yards" }
                    }
                }
                tbody {
                    @for (club, yards) in yardages.iter() {
                        tr {
                            td { (club.name()) }
                            td { (yards) }
                        }
                    }
                }
            }
            p { a class="button" href="/input_yardages" { "Edit yardages" } }
        }
    };
    render_page("Your Yardages", notices, &content)
}
