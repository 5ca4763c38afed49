use std::collections::HashMap;

use actix_web::web::{self, Data};
use actix_web::{HttpRequest, HttpResponse};
use tracing::{error, info, warn};

use crate::controller::identity::{owner_from_request, remember, visitor};
use crate::controller::{AppState, html, notices_from_query, see_other};
use crate::error::{CaddieError, StorageError};
use crate::model::{HoleNumber, OwnerId, RoundWithCourse, parse_hole_score};
use crate::score::{MAX_HANDICAP_ROUNDS, handicap_for_rounds};
use crate::storage::ScoreUpdate;
use crate::view::Notice;
use crate::view::rounds::{render_round_card, render_round_list, render_round_page};
use crate::view::scorecard::render_scorecard_png;

fn is_htmx(req: &HttpRequest) -> bool {
    req.headers().contains_key("HX-Request")
}

fn round_missing() -> HttpResponse {
    see_other("/rounds", Some("round-missing"))
}

/// # Errors
///
/// Will return `Err` if the rounds or courses cannot be loaded
pub async fn list_rounds(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    state: Data<AppState>,
) -> Result<HttpResponse, CaddieError> {
    let visitor = visitor(&req);
    let rounds = state.storage.list_rounds(&visitor.owner).await?;
    let recent = state
        .storage
        .recent_completed_rounds(&visitor.owner, MAX_HANDICAP_ROUNDS)
        .await?;
    let handicap = handicap_for_rounds(&recent);
    let courses = state.storage.list_courses().await?;

    let markup = render_round_list(
        &notices_from_query(&query),
        &rounds,
        handicap.as_ref(),
        &courses,
    );
    Ok(remember(html(markup), &visitor))
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn start_round(
    req: HttpRequest,
    form: web::Form<HashMap<String, String>>,
    state: Data<AppState>,
) -> Result<HttpResponse, CaddieError> {
    let Some(owner) = owner_from_request(&req) else {
        return Ok(see_other("/", Some("session")));
    };
    let Some(course_id) = form
        .get("course_id")
        .and_then(|s| s.trim().parse::<i64>().ok())
    else {
        return Ok(see_other("/rounds", Some("course-missing")));
    };

    match state.storage.start_round(&owner, course_id).await {
        Ok(started) => {
            let location = format!("/rounds/{}", started.entry.round.round_id);
            let code = if started.created {
                "round-started"
            } else {
                "round-resumed"
            };
            Ok(see_other(&location, Some(code)))
        }
        Err(StorageError::NotFound(_)) => Ok(see_other("/rounds", Some("course-missing"))),
        Err(e) => Err(e.into()),
    }
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn view_round(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<HashMap<String, String>>,
    state: Data<AppState>,
) -> Result<HttpResponse, CaddieError> {
    let Some(owner) = owner_from_request(&req) else {
        return Ok(round_missing());
    };
    let round_id = path.into_inner();
    match state.storage.get_round(&owner, round_id).await {
        Ok(entry) => Ok(html(render_round_page(
            &notices_from_query(&query),
            &entry,
        ))),
        Err(StorageError::NotFound(_) | StorageError::Denied(_)) => Ok(round_missing()),
        Err(e) => Err(e.into()),
    }
}

fn award_notices(update: &ScoreUpdate) -> Vec<Notice> {
    let mut notices = vec![];
    if update.newly_completed {
        notices.push(Notice::success(format!(
            "Round complete! {} strokes ({}).",
            update.summary.total_score,
            update.summary.score_to_par_label()
        )));
    }
    for award in &update.new_awards {
        notices.push(Notice::success(format!(
            "{} Achievement unlocked: {}",
            award.icon, award.name
        )));
    }
    notices
}

fn respond(req: &HttpRequest, entry: &RoundWithCourse, notices: &[Notice]) -> HttpResponse {
    if is_htmx(req) {
        html(render_round_card(entry, notices))
    } else {
        html(render_round_page(notices, entry))
    }
}

/// Re-show the round with a warning, without changing anything.
async fn reject(
    req: &HttpRequest,
    state: &AppState,
    owner: &OwnerId,
    round_id: i64,
    notice: Notice,
) -> Result<HttpResponse, CaddieError> {
    match state.storage.get_round(owner, round_id).await {
        Ok(entry) => Ok(respond(req, &entry, &[notice])),
        Err(StorageError::NotFound(_) | StorageError::Denied(_)) => Ok(round_missing()),
        Err(e) => Err(e.into()),
    }
}

/// Record one hole. htmx requests get the round card back; plain form posts
/// get the whole page.
///
/// # Errors
///
/// Will return `Err` if the store fails
pub async fn record_hole(
    req: HttpRequest,
    path: web::Path<(i64, u8)>,
    form: web::Form<HashMap<String, String>>,
    state: Data<AppState>,
) -> Result<HttpResponse, CaddieError> {
    let Some(owner) = owner_from_request(&req) else {
        return Ok(see_other("/", Some("session")));
    };
    let (round_id, hole) = path.into_inner();
    let Some(hole) = HoleNumber::new(hole) else {
        return Ok(round_missing());
    };

    let raw = form.get("strokes").map(String::as_str).unwrap_or_default();
    let score = match parse_hole_score(raw) {
        Ok(s) => s,
        Err(e) => {
            return reject(&req, &state, &owner, round_id, Notice::warning(e.message)).await;
        }
    };

    match state
        .storage
        .record_hole_score(&owner, round_id, hole, score)
        .await
    {
        Ok(update) => Ok(respond(&req, &update.entry, &award_notices(&update))),
        Err(StorageError::Invalid(msg)) => {
            warn!(round_id, %msg, "hole edit rejected");
            reject(
                &req,
                &state,
                &owner,
                round_id,
                Notice::warning("This round is complete and can no longer be edited."),
            )
            .await
        }
        Err(StorageError::NotFound(_) | StorageError::Denied(_)) => Ok(round_missing()),
        Err(e) => {
            error!(error = %e, round_id, "Failed to record hole score");
            reject(
                &req,
                &state,
                &owner,
                round_id,
                Notice::error("That score could not be saved. Please try again."),
            )
            .await
        }
    }
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn delete_round(
    req: HttpRequest,
    path: web::Path<i64>,
    state: Data<AppState>,
) -> Result<HttpResponse, CaddieError> {
    let Some(owner) = owner_from_request(&req) else {
        return Ok(see_other("/", Some("session")));
    };
    let round_id = path.into_inner();
    match state.storage.delete_round(&owner, round_id).await {
        Ok(()) => {
            info!(round_id, "round deleted by owner");
            Ok(see_other("/rounds", Some("round-deleted")))
        }
        Err(StorageError::NotFound(_) | StorageError::Denied(_)) => Ok(round_missing()),
        Err(e) => Err(e.into()),
    }
}

/// # Errors
///
/// Will return `Err` if the round is not the caller's, is not complete, or
/// cannot be drawn
pub async fn scorecard_png(
    req: HttpRequest,
    path: web::Path<i64>,
    state: Data<AppState>,
) -> Result<HttpResponse, CaddieError> {
    let Some(owner) = owner_from_request(&req) else {
        return Ok(round_missing());
    };
    let round_id = path.into_inner();
    let entry = state.storage.get_round(&owner, round_id).await?;
    let png = render_scorecard_png(&entry.round, &entry.course)?;
    Ok(HttpResponse::Ok()
        .content_type("image/png")
        .insert_header(("Cache-Control", "private, max-age=3600"))
        .body(png))
}
