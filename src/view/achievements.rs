use ahash::AHashMap;
use maud::{Markup, html};

use crate::model::{Achievement, EarnedAchievement};
use crate::view::layout::{Notice, render_page};

#[must_use]
pub fn render_achievements(
    notices: &[Notice],
    catalog: &[Achievement],
    earned: &[EarnedAchievement],
) -> Markup {
    let awarded: AHashMap<i64, &EarnedAchievement> = earned
        .iter()
        .map(|e| (e.achievement.achievement_id, e))
        .collect();

    let content = html! {
        p class="progress" { (earned.len()) " of " (catalog.len()) " earned" }
        ul class="badges" {
            @for badge in catalog {
                @let won = awarded.get(&badge.achievement_id);
                li class=(if won.is_some() { "badge earned" } else { "badge locked" }) {
                    span class="badge-icon" { (badge.icon) }
                    div {
                        h2 { (badge.name) }
                        p { (badge.description) }
                        @if let Some(e) = won {
                            p class="awarded" { "Earned " (e.awarded_at.format("%Y-%m-%d").to_string()) }
                        }
                    }
                }
            }
        }
    };
    render_page("Achievements", notices, &content)
}
