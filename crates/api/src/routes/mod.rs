pub mod health;
pub mod records;
pub mod report;

use axum::Router;
use records_db::models::achievement::Achievement;
use records_db::models::event_attended::EventAttended;
use records_db::models::event_organized::EventOrganized;
use records_db::models::internship::Internship;
use records_db::models::leave::Leave;
use records_db::models::online_course::OnlineCourse;
use records_db::models::record::RecordPayload;
use records_db::models::scholarship::Scholarship;
use records_db::models::student_details::StudentDetails;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Every record kind gets the same workflow routes under its own path:
///
/// ```text
/// /student-details/...    StudentDetails (one per owner)
/// /internships/...        Internship
/// /scholarships/...       Scholarship
/// /leaves/...             Leave
/// /achievements/...       Achievement
/// /events-attended/...    EventAttended
/// /events-organized/...   EventOrganized
/// /online-courses/...     OnlineCourse
///
/// /report/{user_id}       PDF of the user's approved records
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(kind::<StudentDetails>())
        .merge(kind::<Internship>())
        .merge(kind::<Scholarship>())
        .merge(kind::<Leave>())
        .merge(kind::<Achievement>())
        .merge(kind::<EventAttended>())
        .merge(kind::<EventOrganized>())
        .merge(kind::<OnlineCourse>())
        .nest("/report", report::router())
}

fn kind<P: RecordPayload>() -> Router<AppState> {
    Router::new().nest(&format!("/{}", P::KIND.path()), records::router::<P>())
}
