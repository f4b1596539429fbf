//! Tests del router completo sin base de datos: autenticación, roles y
//! validaciones que se resuelven antes de tocar PostgreSQL.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{body_json, build_test_app, send, token_for};
use fleet_booking::models::user::UserRole;

#[tokio::test]
async fn health_check_returns_ok() {
    let response = send(build_test_app(), "GET", "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = send(build_test_app(), "GET", "/does-not-exist", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn protected_routes_require_token() {
    for uri in ["/account", "/user", "/car", "/requests", "/history", "/car-usage"] {
        let response = send(build_test_app(), "GET", uri, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn malformed_authorization_header_is_rejected() {
    let app = build_test_app();
    let request = axum::http::Request::builder()
        .uri("/account")
        .header("authorization", "Token abc")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn token_signed_with_other_secret_is_rejected() {
    let response = send(build_test_app(), "GET", "/history", Some("a.b.c"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "JWT_ERROR");
}

#[tokio::test]
async fn user_management_requires_admin_role() {
    let token = token_for(UserRole::User);
    let response = send(build_test_app(), "GET", "/user", Some(&token), None).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn creating_users_requires_super_admin() {
    let token = token_for(UserRole::Admin);
    let body = json!({
        "firstName": "New",
        "lastName": "Driver",
        "gender": "male",
        "email": "driver@mail.com",
        "phoneNumber": "0812345678",
        "position": "Driver",
        "department": "Fleet",
        "password": "123456",
        "role": "driver",
        "driverLicenseExpiry": "2030-01-01"
    });
    let response = send(build_test_app(), "POST", "/user", Some(&token), Some(body)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn car_mutations_require_admin_role() {
    let token = token_for(UserRole::Driver);
    let body = json!({
        "brand": "Toyota",
        "model": "Commuter",
        "licensePlate": "1AB-2345",
        "capacity": 12,
        "type": "van"
    });
    let response = send(build_test_app(), "POST", "/car", Some(&token), Some(body)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let uri = format!("/car/{}", uuid::Uuid::new_v4());
    let response = send(build_test_app(), "DELETE", &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn reports_are_limited_to_admins_and_approvers() {
    for role in [UserRole::User, UserRole::Driver] {
        let token = token_for(role);
        let response = send(build_test_app(), "GET", "/car-usage", Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", role);

        let response = send(
            build_test_app(),
            "GET",
            "/car-usage/download?type=car",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", role);
    }
}

#[tokio::test]
async fn report_download_rejects_unknown_type() {
    let token = token_for(UserRole::Approver);
    let response = send(
        build_test_app(),
        "GET",
        "/car-usage/download?type=bus",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lifecycle_transitions_check_role() {
    let id = uuid::Uuid::new_v4();

    // un admin no aprueba
    let token = token_for(UserRole::Admin);
    let uri = format!("/requests/{}/approve", id);
    let body = json!({ "approver_id": uuid::Uuid::new_v4() });
    let response = send(build_test_app(), "PUT", &uri, Some(&token), Some(body)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // un aprobador no asigna
    let token = token_for(UserRole::Approver);
    let uri = format!("/requests/{}/assign", id);
    let body = json!({ "car_id": uuid::Uuid::new_v4(), "driver_id": uuid::Uuid::new_v4() });
    let response = send(build_test_app(), "PUT", &uri, Some(&token), Some(body)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn approval_requires_approver_id() {
    let token = token_for(UserRole::Approver);
    let uri = format!("/requests/{}/reject", uuid::Uuid::new_v4());
    let response = send(build_test_app(), "PUT", &uri, Some(&token), Some(json!({}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_request_rejects_inverted_window() {
    let token = token_for(UserRole::User);
    let body = json!({
        "start_datetime": "2024-01-10T12:00:00Z",
        "end_datetime": "2024-01-10T08:00:00Z",
        "purpose": "Meeting",
        "destination": "Head office",
        "passenger_count": 2,
        "travel_type": "round_trip",
        "usage_type": "official"
    });
    let response = send(build_test_app(), "POST", "/form", Some(&token), Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn availability_rejects_invalid_datetime() {
    let token = token_for(UserRole::User);
    let response = send(
        build_test_app(),
        "GET",
        "/available-cars?start_datetime=tomorrow&end_datetime=2024-01-10T08:00:00Z",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn form_with_missing_fields_returns_api_error() {
    let token = token_for(UserRole::User);
    let body = json!({
        "start_datetime": "2024-01-10T08:00",
        "end_datetime": "2024-01-10T12:00"
    });
    let response = send(build_test_app(), "POST", "/form", Some(&token), Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["message"].as_str().unwrap().contains("purpose"));
}

#[tokio::test]
async fn assign_with_mistyped_ids_returns_api_error() {
    let token = token_for(UserRole::Admin);
    let uri = format!("/requests/{}/assign", uuid::Uuid::new_v4());
    let body = json!({ "car_id": 42, "driver_id": "not-a-uuid" });
    let response = send(build_test_app(), "PUT", &uri, Some(&token), Some(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn user_list_with_unknown_role_returns_api_error() {
    let token = token_for(UserRole::Admin);
    let response = send(build_test_app(), "GET", "/user?role=root", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn availability_rejects_reversed_window() {
    let token = token_for(UserRole::User);
    for path in ["/available-cars", "/available-drivers"] {
        let uri = format!(
            "{}?start_datetime=2024-01-10T10:00:00Z&end_datetime=2024-01-10T08:00:00Z",
            path
        );
        let response = send(build_test_app(), "GET", &uri, Some(&token), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", path);
    }
}
