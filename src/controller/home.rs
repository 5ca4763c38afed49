use std::collections::HashMap;

use actix_web::web::{self, Data};
use actix_web::{HttpRequest, HttpResponse};
use tracing::error;

use crate::controller::identity::{remember, visitor};
use crate::controller::{AppState, html, notices_from_query};
use crate::view::Notice;
use crate::view::index::render_index;

pub async fn index(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    state: Data<AppState>,
) -> HttpResponse {
    let visitor = visitor(&req);
    let mut notices = notices_from_query(&query);
    if visitor.fresh && notices.is_empty() {
        notices.push(Notice::info(
            "Welcome! Your rounds and yardages are kept on this device.",
        ));
    }

    let open_round = if visitor.fresh {
        None
    } else {
        match state.storage.open_round(&visitor.owner).await {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, "Failed to load open round");
                None
            }
        }
    };

    remember(html(render_index(&notices, open_round.as_ref())), &visitor)
}
