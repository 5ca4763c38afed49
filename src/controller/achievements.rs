use actix_web::web::Data;
use actix_web::{HttpRequest, HttpResponse};

use crate::controller::identity::{remember, visitor};
use crate::controller::{AppState, html};
use crate::error::CaddieError;
use crate::view::achievements::render_achievements;

/// # Errors
///
/// Will return `Err` if the catalog or awards cannot be loaded
pub async fn achievements(
    req: HttpRequest,
    state: Data<AppState>,
) -> Result<HttpResponse, CaddieError> {
    let visitor = visitor(&req);
    let catalog = state.storage.achievement_catalog().await?;
    let earned = state.storage.earned_achievements(&visitor.owner).await?;
    Ok(remember(
        html(render_achievements(&[], &catalog, &earned)),
        &visitor,
    ))
}
