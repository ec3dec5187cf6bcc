//! Route configuration for session endpoints.

use axum::routing::{delete, get, post};
use axum::Router;

use super::handlers::{
    add_estimate, add_work_package, clear_work_package_estimate, create_session,
    get_average_estimate, get_divergent_users, get_estimates, get_users, get_work_packages,
    join_session, leave_session, remove_estimate, remove_session, remove_work_package,
    set_work_package_estimate, SessionAppState,
};

/// Creates the session router with all endpoints.
///
/// Routes:
/// - `POST /api/sessions` - Create a session
/// - `DELETE /api/sessions/:token` - Remove a session
/// - `POST|GET /api/sessions/:token/users` - Join / list users
/// - `DELETE /api/sessions/:token/users/:name` - Leave
/// - `POST|GET /api/sessions/:token/workpackages` - Add / list work packages
/// - `PUT|DELETE /api/sessions/:token/workpackages/:id` - Set estimate / remove
/// - `DELETE /api/sessions/:token/workpackages/:id/estimate` - Clear estimate
/// - `POST|GET /api/sessions/:token/estimates` - Add / list per-user estimates
/// - `GET /api/sessions/:token/estimates/:id` - Average estimate
/// - `GET /api/sessions/:token/estimates/:id/users/distance` - Most divergent users
/// - `DELETE /api/sessions/:token/estimates/:id/users/:user` - Remove a user's estimate
///
/// The static `distance` segment takes precedence over `:user`, so an
/// estimate by a user literally named "distance" cannot be removed over
/// HTTP: that DELETE answers 405 Method Not Allowed.
pub fn session_router() -> Router<SessionAppState> {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:token", delete(remove_session))
        .route("/api/sessions/:token/users", post(join_session).get(get_users))
        .route("/api/sessions/:token/users/:name", delete(leave_session))
        .route(
            "/api/sessions/:token/workpackages",
            post(add_work_package).get(get_work_packages),
        )
        .route(
            "/api/sessions/:token/workpackages/:id",
            delete(remove_work_package).put(set_work_package_estimate),
        )
        .route(
            "/api/sessions/:token/workpackages/:id/estimate",
            delete(clear_work_package_estimate),
        )
        .route(
            "/api/sessions/:token/estimates",
            post(add_estimate).get(get_estimates),
        )
        .route("/api/sessions/:token/estimates/:id", get(get_average_estimate))
        .route(
            "/api/sessions/:token/estimates/:id/users/distance",
            get(get_divergent_users),
        )
        .route(
            "/api/sessions/:token/estimates/:id/users/:user",
            delete(remove_estimate),
        )
}
