use std::collections::HashMap;
use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError, web};
use maud::Markup;
use tracing::error;

use crate::caddie::CompletionClient;
use crate::error::{CaddieError, StorageError};
use crate::storage::Storage;
use crate::view::Notice;
use crate::view::layout::render_page;

pub mod achievements;
pub mod advice;
pub mod courses;
pub mod forms;
pub mod home;
pub mod identity;
pub mod rounds;
pub mod yardages;

/// Shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub caddie: Arc<dyn CompletionClient>,
    pub max_upload_bytes: usize,
}

/// Every route except `/static`, which needs the configured directory.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home::index))
        .route("/health", web::get().to(HttpResponse::Ok))
        .route("/shot_advice", web::get().to(advice::shot_advice))
        .route("/ask_caddie", web::post().to(advice::ask_caddie))
        .route("/swing_analysis", web::get().to(advice::swing_analysis))
        .route(
            "/process_swing_analysis",
            web::post().to(advice::process_swing_analysis),
        )
        .route("/courses", web::get().to(courses::list_courses))
        .route("/courses/new", web::get().to(courses::new_course_form))
        .route("/courses/new", web::post().to(courses::create_course))
        .route("/courses/{id}/delete", web::post().to(courses::delete_course))
        .route("/rounds", web::get().to(rounds::list_rounds))
        .route("/rounds/start", web::post().to(rounds::start_round))
        .route("/rounds/{id}", web::get().to(rounds::view_round))
        .route(
            "/rounds/{id}/holes/{hole}",
            web::post().to(rounds::record_hole),
        )
        .route("/rounds/{id}/delete", web::post().to(rounds::delete_round))
        .route(
            "/rounds/{id}/scorecard.png",
            web::get().to(rounds::scorecard_png),
        )
        .route("/input_yardages", web::get().to(yardages::input_yardages))
        .route("/input_yardages", web::post().to(yardages::save_yardages))
        .route("/view_yardages", web::get().to(yardages::view_yardages))
        .route("/achievements", web::get().to(achievements::achievements));
}

pub(crate) fn html(markup: Markup) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body(markup.into_string())
}

/// Post/redirect/get. `notice` is one of the codes `notices_from_query` knows.
pub(crate) fn see_other(location: &str, notice: Option<&str>) -> HttpResponse {
    let location = match notice {
        Some(code) => format!("{location}?notice={code}"),
        None => location.to_string(),
    };
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Turn the `notice` code left by a redirect into a message.
pub(crate) fn notices_from_query(query: &HashMap<String, String>) -> Vec<Notice> {
    let notice = match query.get("notice").map(String::as_str) {
        Some("course-added") => Notice::success("Course added."),
        Some("course-deleted") => Notice::success("Course deleted."),
        Some("round-started") => Notice::success("Round started. Good luck out there!"),
        Some("round-resumed") => {
            Notice::info("You already have a round in progress. Finish or delete it first.")
        }
        Some("round-deleted") => Notice::success("Round deleted."),
        Some("round-missing") => Notice::warning("That round could not be found."),
        Some("course-missing") => Notice::warning("That course could not be found."),
        Some("yardages-saved") => Notice::success("Club yardages saved."),
        Some("session") => Notice::warning("Your session was not recognised. Please try again."),
        _ => return vec![],
    };
    vec![notice]
}

impl ResponseError for CaddieError {
    fn status_code(&self) -> StatusCode {
        match self {
            CaddieError::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            CaddieError::Storage(StorageError::Denied(_)) => StatusCode::FORBIDDEN,
            CaddieError::Storage(StorageError::Conflict(_)) => StatusCode::CONFLICT,
            CaddieError::Storage(StorageError::Invalid(_)) => StatusCode::BAD_REQUEST,
            CaddieError::Render(crate::error::RenderError::Incomplete(_)) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "Something went wrong on our side. Please try again.".to_string()
        } else {
            self.to_string()
        };
        let markup = render_page(
            status.canonical_reason().unwrap_or("Error"),
            &[Notice::error(message)],
            &maud::html! { p { a href="/" { "Back to the clubhouse" } } },
        );
        HttpResponse::build(status)
            .content_type("text/html")
            .body(markup.into_string())
    }
}
