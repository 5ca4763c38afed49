use std::collections::HashMap;

use actix_web::web::{self, Data};
use actix_web::{HttpRequest, HttpResponse};
use tracing::{error, info};

use crate::controller::identity::{remember, visitor};
use crate::controller::{AppState, html, notices_from_query, see_other};
use crate::error::{CaddieError, StorageError};
use crate::model::{FieldError, parse_new_course};
use crate::view::Notice;
use crate::view::courses::{CourseForm, render_course_form, render_course_list};

/// # Errors
///
/// Will return `Err` if the courses cannot be loaded
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    state: Data<AppState>,
) -> Result<HttpResponse, CaddieError> {
    let visitor = visitor(&req);
    let courses = state.storage.list_courses().await?;
    let markup = render_course_list(&notices_from_query(&query), &courses);
    Ok(remember(html(markup), &visitor))
}

pub async fn new_course_form(req: HttpRequest) -> HttpResponse {
    let visitor = visitor(&req);
    remember(
        html(render_course_form(&[], &CourseForm::default(), &[])),
        &visitor,
    )
}

fn echo(form: &HashMap<String, String>) -> CourseForm {
    let get = |k: &str| form.get(k).cloned().unwrap_or_default();
    CourseForm {
        name: get("name"),
        pars: get("pars"),
        rating: get("rating"),
        slope: get("slope"),
    }
}

pub async fn create_course(
    form: web::Form<HashMap<String, String>>,
    state: Data<AppState>,
) -> HttpResponse {
    let form = form.into_inner();
    let new_course = match parse_new_course(&form) {
        Ok(c) => c,
        Err(errors) => {
            return html(render_course_form(&[], &echo(&form), &errors));
        }
    };

    match state.storage.create_course(&new_course).await {
        Ok(course) => {
            info!(course_id = course.course_id, name = %course.name, "course added");
            see_other("/courses", Some("course-added"))
        }
        Err(StorageError::Conflict(msg)) => {
            let errors = [FieldError::new("name", msg)];
            html(render_course_form(&[], &echo(&form), &errors))
        }
        Err(e) => {
            error!(error = %e, "Failed to add course");
            let notices = [Notice::error("The course could not be saved. Please try again.")];
            html(render_course_form(&notices, &echo(&form), &[]))
        }
    }
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn delete_course(
    path: web::Path<i64>,
    state: Data<AppState>,
) -> Result<HttpResponse, CaddieError> {
    let course_id = path.into_inner();
    match state.storage.delete_course(course_id).await {
        Ok(()) => {
            info!(course_id, "course deleted");
            Ok(see_other("/courses", Some("course-deleted")))
        }
        Err(StorageError::NotFound(_)) => Ok(see_other("/courses", Some("course-missing"))),
        Err(e) => Err(e.into()),
    }
}
