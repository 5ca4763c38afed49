use maud::{Markup, html};

use crate::model::{Course, FieldError};
use crate::view::layout::{Notice, field_error, render_page};

/// Course entry values, echoed back after a rejected submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseForm {
    pub name: String,
    pub pars: String,
    pub rating: String,
    pub slope: String,
}

impl Default for CourseForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            pars: crate::model::DEFAULT_PARS.to_string(),
            rating: String::new(),
            slope: String::new(),
        }
    }
}

#[must_use]
pub fn render_course_list(notices: &[Notice], courses: &[Course]) -> Markup {
    let content = html! {
        p { a class="button" href="/courses/new" { "Add a course" } }
        @if courses.is_empty() {
            p class="empty" { "No courses yet." }
        } @else {
            table class="courses" {
                thead {
                    tr {
                        th { "Course" }
                        th { "Par" }
                        th { "Rating" }
                        th { "Slope" }
                        th {}
                    }
                }
                tbody {
                    @for course in courses {
                        tr {
                            td class="course-name" { (course.name) }
                            td { (course.pars.total()) }
                            td { (format!("{:.1}", course.rating)) }
                            td { (course.slope) }
                            td class="actions" {
                                form method="post" action="/rounds/start" class="inline" {
                                    input type="hidden" name="course_id" value=(course.course_id);
                                    button type="submit" { "Play" }
                                }
                                form method="post" action=(format!("/courses/{}/delete", course.course_id)) class="inline"
                                    onsubmit="return confirm('Delete this course and every round played on it?');" {
                                    button type="submit" class="danger" { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    render_page("Courses", notices, &content)
}

#[must_use]
pub fn render_course_form(notices: &[Notice], form: &CourseForm, errors: &[FieldError]) -> Markup {
    let content = html! {
        form method="post" action="/courses/new" class="course-form" {
            label for="name" { "Course name" }
            input type="text" id="name" name="name" maxlength="100" required value=(form.name);
            @if let Some(msg) = field_error(errors, "name") {
                p class="field-error" { (msg) }
            }

            label for="pars" { "Pars for holes 1-18, comma separated" }
            input type="text" id="pars" name="pars" value=(form.pars);
            @if let Some(msg) = field_error(errors, "pars") {
                p class="field-error" { (msg) }
            }

            label for="rating" { "Course rating (blank for 72.0)" }
            input type="text" id="rating" name="rating" inputmode="decimal" value=(form.rating);
            @if let Some(msg) = field_error(errors, "rating") {
                p class="field-error" { (msg) }
            }

            label for="slope" { "Slope (blank for 113)" }
            input type="text" id="slope" name="slope" inputmode="numeric" value=(form.slope);
            @if let Some(msg) = field_error(errors, "slope") {
                p class="field-error" { (msg) }
            }

            button type="submit" { "Save course" }
        }
    };
    render_page("Add Course", notices, &content)
}
