use maud::{Markup, PreEscaped, html};

use crate::caddie::Advice;
use crate::model::FieldError;
use crate::view::layout::{Notice, field_error, render_page};

/// What the golfer typed, echoed back when the page is re-rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdviceForm {
    pub context: String,
    pub distance_to_hole: String,
}

fn render_advice(advice: Option<&Advice>, heading: &str) -> Markup {
    html! {
        @if let Some(advice) = advice {
            @let class = if advice.is_error { "advice advice-error" } else { "advice" };
            section class=(class) {
                h2 { (heading) }
                // already escaped by the markdown renderer
                (PreEscaped(&advice.html))
            }
        }
    }
}

fn render_image_inputs() -> Markup {
    html! {
        fieldset class="image-input" {
            legend { "Photo (optional)" }
            label for="uploaded_image" { "Upload or take a picture" }
            input type="file" id="uploaded_image" name="uploaded_image" accept="image/*" capture="environment";
            div class="camera" {
                video id="camera_preview" autoplay playsinline muted {}
                button type="button" id="camera_snap" { "Capture from camera" }
                canvas id="camera_canvas" hidden {}
            }
            input type="hidden" id="camera_image_data" name="camera_image_data";
        }
    }
}

#[must_use]
pub fn render_shot_advice(
    notices: &[Notice],
    form: &AdviceForm,
    errors: &[FieldError],
    advice: Option<&Advice>,
    has_yardages: bool,
) -> Markup {
    let content = html! {
        @if !has_yardages {
            p class="hint" {
                "The caddie doesn't know your distances yet. "
                a href="/input_yardages" { "Add your club yardages" }
                " for better club selection."
            }
        }
        form method="post" action="/ask_caddie" enctype="multipart/form-data" {
            label for="context" { "Describe the shot" }
            textarea id="context" name="context" rows="4"
                placeholder="Ball is in the rough, slight uphill lie, wind into me..." {
                (form.context)
            }
            @if let Some(msg) = field_error(errors, "context") {
                p class="field-error" { (msg) }
            }
            label for="distance_to_hole" { "Distance to target (yards)" }
            input type="text" id="distance_to_hole" name="distance_to_hole" inputmode="numeric"
                value=(form.distance_to_hole);
            @if let Some(msg) = field_error(errors, "distance_to_hole") {
                p class="field-error" { (msg) }
            }
            @if let Some(msg) = field_error(errors, "uploaded_image") {
                p class="field-error" { (msg) }
            }
            (render_image_inputs())
            button type="submit" { "Ask the caddie" }
        }
        (render_advice(advice, "Caddie says"))
        script src="/static/camera.js" {}
    };
    render_page("Shot Advice", notices, &content)
}

#[must_use]
pub fn render_swing_analysis(
    notices: &[Notice],
    context: &str,
    errors: &[FieldError],
    advice: Option<&Advice>,
) -> Markup {
    let content = html! {
        form method="post" action="/process_swing_analysis" enctype="multipart/form-data" {
            label for="context" { "Notes on the swing" }
            textarea id="context" name="context" rows="4"
                placeholder="Top of the backswing, 7 iron, ball keeps going right..." {
                (context)
            }
            @if let Some(msg) = field_error(errors, "context") {
                p class="field-error" { (msg) }
            }
            @if let Some(msg) = field_error(errors, "uploaded_image") {
                p class="field-error" { (msg) }
            }
            (render_image_inputs())
            button type="submit" { "Analyze swing" }
        }
        (render_advice(advice, "Swing feedback"))
        script src="/static/camera.js" {}
    };
    render_page("Swing Analysis", notices, &content)
}
