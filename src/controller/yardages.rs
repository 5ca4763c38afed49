use std::collections::HashMap;

use actix_web::web::{self, Data};
use actix_web::{HttpRequest, HttpResponse};
use tracing::{error, info};

use crate::controller::identity::{owner_from_request, remember, visitor};
use crate::controller::{AppState, html, notices_from_query, see_other};
use crate::error::CaddieError;
use crate::model::parse_yardage_form;
use crate::view::Notice;
use crate::view::yardages::{render_input_yardages, render_view_yardages, yardage_form_values};

/// # Errors
///
/// Will return `Err` if the saved yardages cannot be loaded
pub async fn input_yardages(
    req: HttpRequest,
    state: Data<AppState>,
) -> Result<HttpResponse, CaddieError> {
    let visitor = visitor(&req);
    let saved = state.storage.club_yardages(&visitor.owner).await?;
    let markup = render_input_yardages(&[], &yardage_form_values(&saved), &[]);
    Ok(remember(html(markup), &visitor))
}

pub async fn save_yardages(
    req: HttpRequest,
    form: web::Form<HashMap<String, String>>,
    state: Data<AppState>,
) -> HttpResponse {
    let Some(owner) = owner_from_request(&req) else {
        return see_other("/", Some("session"));
    };
    let form = form.into_inner();

    let changes = match parse_yardage_form(&form) {
        Ok(c) => c,
        Err(errors) => {
            let notices: Vec<Notice> = errors.iter().map(Notice::from).collect();
            return html(render_input_yardages(&notices, &form, &errors));
        }
    };

    match state.storage.save_club_yardages(&owner, &changes).await {
        Ok(()) => {
            info!(
                owner = %owner,
                saved = changes.iter().filter(|c| c.yards.is_some()).count(),
                "club yardages saved"
            );
            see_other("/view_yardages", Some("yardages-saved"))
        }
        Err(e) => {
            error!(error = %e, "Failed to save club yardages");
            let notices = [Notice::error(
                "Your yardages could not be saved. Please try again.",
            )];
            html(render_input_yardages(&notices, &form, &[]))
        }
    }
}

/// # Errors
///
/// Will return `Err` if the saved yardages cannot be loaded
pub async fn view_yardages(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    state: Data<AppState>,
) -> Result<HttpResponse, CaddieError> {
    let visitor = visitor(&req);
    let saved = state.storage.club_yardages(&visitor.owner).await?;
    let markup = render_view_yardages(&notices_from_query(&query), &saved);
    Ok(remember(html(markup), &visitor))
}
