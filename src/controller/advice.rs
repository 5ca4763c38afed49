use actix_multipart::Multipart;
use actix_web::web::Data;
use actix_web::{HttpRequest, HttpResponse};
use tracing::error;

use crate::caddie::{
    AdviceKind, Evidence, compose_shot_advice, compose_swing_analysis, consult,
    parse_target_distance,
};
use crate::controller::forms::read_evidence_form;
use crate::controller::identity::{owner_from_request, remember, visitor};
use crate::controller::{AppState, html, see_other};
use crate::model::{ClubYardages, OwnerId};
use crate::view::Notice;
use crate::view::advice::{AdviceForm, render_shot_advice, render_swing_analysis};

async fn saved_yardages(state: &AppState, owner: &OwnerId) -> (ClubYardages, Vec<Notice>) {
    match state.storage.club_yardages(owner).await {
        Ok(y) => (y, vec![]),
        Err(e) => {
            error!(error = %e, "Failed to load club yardages");
            (
                ClubYardages::new(),
                vec![Notice::warning(
                    "Your club yardages could not be loaded, so the caddie will guess.",
                )],
            )
        }
    }
}

pub async fn shot_advice(req: HttpRequest, state: Data<AppState>) -> HttpResponse {
    let visitor = visitor(&req);
    let (yardages, notices) = saved_yardages(&state, &visitor.owner).await;
    let markup = render_shot_advice(
        &notices,
        &AdviceForm::default(),
        &[],
        None,
        !yardages.is_empty(),
    );
    remember(html(markup), &visitor)
}

/// # Errors
///
/// Will return `Err` if the multipart body cannot be read
pub async fn ask_caddie(
    req: HttpRequest,
    payload: Multipart,
    state: Data<AppState>,
) -> Result<HttpResponse, actix_web::Error> {
    let Some(owner) = owner_from_request(&req) else {
        return Ok(see_other("/", Some("session")));
    };

    let mut form = read_evidence_form(payload, state.max_upload_bytes).await?;
    let echo = AdviceForm {
        context: form.field("context").to_string(),
        distance_to_hole: form.field("distance_to_hole").to_string(),
    };
    let (yardages, notices) = saved_yardages(&state, &owner).await;

    let distance = match parse_target_distance(&echo.distance_to_hole) {
        Ok(d) => d,
        Err(e) => {
            form.errors.push(e);
            None
        }
    };
    if !form.errors.is_empty() {
        let markup = render_shot_advice(
            &notices,
            &echo,
            &form.errors,
            None,
            !yardages.is_empty(),
        );
        return Ok(html(markup));
    }

    let evidence = Evidence::from_parts(Some(echo.context.clone()), form.image.take());
    let request = compose_shot_advice(&evidence, &yardages, distance);
    let advice = consult(state.caddie.as_ref(), AdviceKind::ShotAdvice, &request).await;

    let markup = render_shot_advice(&notices, &echo, &[], Some(&advice), !yardages.is_empty());
    Ok(html(markup))
}

pub async fn swing_analysis(req: HttpRequest) -> HttpResponse {
    let visitor = visitor(&req);
    remember(html(render_swing_analysis(&[], "", &[], None)), &visitor)
}

/// # Errors
///
/// Will return `Err` if the multipart body cannot be read
pub async fn process_swing_analysis(
    req: HttpRequest,
    payload: Multipart,
    state: Data<AppState>,
) -> Result<HttpResponse, actix_web::Error> {
    if owner_from_request(&req).is_none() {
        return Ok(see_other("/", Some("session")));
    }

    let mut form = read_evidence_form(payload, state.max_upload_bytes).await?;
    let context = form.field("context").to_string();
    if !form.errors.is_empty() {
        return Ok(html(render_swing_analysis(&[], &context, &form.errors, None)));
    }

    let evidence = Evidence::from_parts(Some(context.clone()), form.image.take());
    let request = compose_swing_analysis(&evidence);
    let advice = consult(state.caddie.as_ref(), AdviceKind::SwingAnalysis, &request).await;

    Ok(html(render_swing_analysis(
        &[],
        &context,
        &[],
        Some(&advice),
    )))
}
