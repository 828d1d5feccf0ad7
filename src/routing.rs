//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    AppState,
    date_range::get_date_range,
    endpoints,
    report::{get_department_report, get_expense_trends, get_monthly_report},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::DATE_RANGE_API, get(get_date_range))
        .route(endpoints::MONTHLY_REPORT_API, get(get_monthly_report))
        .route(endpoints::DEPARTMENT_REPORT_API, get(get_department_report))
        .route(endpoints::EXPENSE_TRENDS_API, get(get_expense_trends))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, "I'm a teapot").into_response()
}

async fn get_404_not_found() -> Response {
    crate::Error::NotFound.into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;

    use super::build_router;
    use crate::{AppState, endpoints};

    fn get_test_server() -> TestServer {
        let state = AppState::new(Connection::open_in_memory().unwrap(), "Etc/UTC")
            .expect("Could not create app state.");

        TestServer::new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn coffee_is_a_teapot() {
        let server = get_test_server();

        server
            .get(endpoints::COFFEE)
            .await
            .assert_status(StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        server
            .get("/api/claims")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn every_report_route_is_registered() {
        let server = get_test_server();

        for route in [
            endpoints::DATE_RANGE_API,
            endpoints::MONTHLY_REPORT_API,
            endpoints::DEPARTMENT_REPORT_API,
            endpoints::EXPENSE_TRENDS_API,
        ] {
            server
                .get(route)
                .add_query_param("range", "last-month")
                .add_query_param("reference", "2025-01-15")
                .await
                .assert_status_ok();
        }
    }
}
