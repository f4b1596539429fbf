//! Tests contra PostgreSQL real: cada test recibe una base de datos nueva
//! con las migraciones de `./migrations` aplicadas (`DATABASE_URL` apunta
//! al servidor).

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use common::{body_json, build_app_with_pool, send, token_for_user};
use fleet_booking::models::car::{Car, CarStatus, CarType, NewCar};
use fleet_booking::models::car_request::{CarRequest, NewCarRequest, RequestStatus};
use fleet_booking::models::user::{Gender, NewUser, User, UserRole};
use fleet_booking::repositories::car_repository::CarRepository;
use fleet_booking::repositories::car_request_repository::CarRequestRepository;
use fleet_booking::repositories::user_repository::UserRepository;
use fleet_booking::services::availability_service::TimeWindow;
use fleet_booking::services::request_lifecycle::RequestScope;
use fleet_booking::utils::errors::AppError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, hour, minute, 0).unwrap()
}

fn new_user(email: &str, role: UserRole) -> NewUser {
    NewUser {
        first_name: "Somchai".to_string(),
        last_name: "Dee".to_string(),
        gender: Gender::Male,
        birth_date: None,
        email: email.to_string(),
        phone_number: "0812345678".to_string(),
        position: "Officer".to_string(),
        department: "Operations".to_string(),
        password_hash: String::new(),
        role,
    }
}

fn new_car(plate: &str) -> NewCar {
    NewCar {
        brand: "Toyota".to_string(),
        model: "Hiace".to_string(),
        license_plate: plate.to_string(),
        capacity: 12,
        status: CarStatus::Available,
        car_type: CarType::Van,
        notes: String::new(),
    }
}

fn new_request(user_id: Uuid, start: DateTime<Utc>, end: DateTime<Utc>) -> NewCarRequest {
    NewCarRequest {
        user_id,
        start_datetime: start,
        end_datetime: end,
        purpose: "Site visit".to_string(),
        destination: "Chiang Mai".to_string(),
        passenger_count: 3,
        travel_type: "one_way".to_string(),
        usage_type: "official".to_string(),
    }
}

async fn create_user(pool: &PgPool, email: &str, role: UserRole) -> User {
    UserRepository::new(pool.clone())
        .create(new_user(email, role))
        .await
        .unwrap()
}

async fn create_car(pool: &PgPool, plate: &str) -> Car {
    CarRepository::new(pool.clone()).create(new_car(plate)).await.unwrap()
}

async fn create_request(pool: &PgPool, user: &User, start: DateTime<Utc>, end: DateTime<Utc>) -> CarRequest {
    CarRequestRepository::new(pool.clone())
        .create(new_request(user.id, start, end))
        .await
        .unwrap()
}

async fn assign(pool: &PgPool, request: &CarRequest, car: &Car, driver: &User, admin: &User) -> CarRequest {
    CarRequestRepository::new(pool.clone())
        .assign(
            request.id,
            car.id,
            driver.id,
            admin.id,
            &[RequestStatus::Pending, RequestStatus::Assigned],
        )
        .await
        .unwrap()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Lifecycle transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_second_approve_conflicts_and_keeps_row(pool: PgPool) {
    let requester = create_user(&pool, "requester@mail.com", UserRole::User).await;
    let first = create_user(&pool, "first.approver@mail.com", UserRole::Approver).await;
    let second = create_user(&pool, "second.approver@mail.com", UserRole::Approver).await;
    let request = create_request(&pool, &requester, at(8, 0), at(12, 0)).await;

    let uri = format!("/requests/{}/approve", request.id);
    let app = build_app_with_pool(pool.clone());
    let response = send(
        app,
        "PUT",
        &uri,
        Some(&token_for_user(&first)),
        Some(json!({ "approver_id": first.id })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "APPROVED");

    let app = build_app_with_pool(pool.clone());
    let response = send(
        app,
        "PUT",
        &uri,
        Some(&token_for_user(&second)),
        Some(json!({ "approver_id": second.id })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let stored = CarRequestRepository::new(pool.clone())
        .find_by_id(request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, RequestStatus::Approved);
    assert_eq!(stored.approver_id, Some(first.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_conditional_decide_skips_terminal_rows(pool: PgPool) {
    let requester = create_user(&pool, "requester@mail.com", UserRole::User).await;
    let approver = create_user(&pool, "approver@mail.com", UserRole::Approver).await;
    let request = create_request(&pool, &requester, at(8, 0), at(12, 0)).await;
    let repository = CarRequestRepository::new(pool.clone());
    let open = [RequestStatus::Pending, RequestStatus::Assigned];

    let rejected = repository
        .decide(request.id, RequestStatus::Rejected, approver.id, &open)
        .await
        .unwrap();
    assert_eq!(rejected.unwrap().status, RequestStatus::Rejected);

    let again = repository
        .decide(request.id, RequestStatus::Approved, approver.id, &open)
        .await
        .unwrap();
    assert!(again.is_none());

    let stored = repository.find_by_id(request.id).await.unwrap().unwrap();
    assert_eq!(stored.status, RequestStatus::Rejected);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_approve_unknown_request_is_not_found(pool: PgPool) {
    let approver = create_user(&pool, "approver@mail.com", UserRole::Approver).await;

    let uri = format!("/requests/{}/approve", Uuid::new_v4());
    let response = send(
        build_app_with_pool(pool),
        "PUT",
        &uri,
        Some(&token_for_user(&approver)),
        Some(json!({ "approver_id": approver.id })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// History visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_list_details_scopes(pool: PgPool) {
    let alice = create_user(&pool, "alice@mail.com", UserRole::User).await;
    let bob = create_user(&pool, "bob@mail.com", UserRole::User).await;
    let driver = create_user(&pool, "driver@mail.com", UserRole::Driver).await;
    let admin = create_user(&pool, "admin@mail.com", UserRole::Admin).await;
    let car = create_car(&pool, "1กข 1234").await;

    let pending = create_request(&pool, &alice, at(8, 0), at(10, 0)).await;
    let assigned = create_request(&pool, &bob, at(13, 0), at(15, 0)).await;
    assign(&pool, &assigned, &car, &driver, &admin).await;

    let repository = CarRequestRepository::new(pool.clone());
    let ids = |rows: Vec<fleet_booking::models::car_request::CarRequestDetails>| {
        rows.into_iter().map(|row| row.request.id).collect::<Vec<_>>()
    };

    let all = repository.list_details(&RequestScope::All).await.unwrap();
    assert_eq!(all.len(), 2);

    let for_driver = repository
        .list_details(&RequestScope::for_actor(UserRole::Driver, driver.id))
        .await
        .unwrap();
    assert_eq!(ids(for_driver), vec![assigned.id]);

    let for_alice = repository
        .list_details(&RequestScope::for_actor(UserRole::User, alice.id))
        .await
        .unwrap();
    assert_eq!(ids(for_alice), vec![pending.id]);

    let for_approver = repository
        .list_details(&RequestScope::for_actor(UserRole::Approver, Uuid::new_v4()))
        .await
        .unwrap();
    assert_eq!(ids(for_approver), vec![pending.id]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_history_endpoint_for_driver(pool: PgPool) {
    let requester = create_user(&pool, "requester@mail.com", UserRole::User).await;
    let driver = create_user(&pool, "driver@mail.com", UserRole::Driver).await;
    let admin = create_user(&pool, "admin@mail.com", UserRole::Admin).await;
    let car = create_car(&pool, "2กข 5678").await;

    create_request(&pool, &requester, at(8, 0), at(10, 0)).await;
    let assigned = create_request(&pool, &requester, at(13, 0), at(15, 0)).await;
    assign(&pool, &assigned, &car, &driver, &admin).await;

    let response = send(
        build_app_with_pool(pool),
        "GET",
        "/history",
        Some(&token_for_user(&driver)),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], json!(assigned.id));
    assert_eq!(rows[0]["status"], "ASSIGNED");
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_find_commitments_uses_closed_intervals(pool: PgPool) {
    let requester = create_user(&pool, "requester@mail.com", UserRole::User).await;
    let driver = create_user(&pool, "driver@mail.com", UserRole::Driver).await;
    let admin = create_user(&pool, "admin@mail.com", UserRole::Admin).await;
    let car = create_car(&pool, "3กข 9012").await;

    let committed = create_request(&pool, &requester, at(9, 0), at(9, 30)).await;
    assign(&pool, &committed, &car, &driver, &admin).await;
    // PENDING no compromete nada
    create_request(&pool, &requester, at(9, 0), at(9, 30)).await;

    let repository = CarRequestRepository::new(pool.clone());

    let covering = repository
        .find_commitments(&TimeWindow::new(at(8, 0), at(10, 0)))
        .await
        .unwrap();
    assert_eq!(covering.len(), 1);
    assert_eq!(covering[0].car_id, Some(car.id));
    assert_eq!(covering[0].driver_id, Some(driver.id));

    let touching = repository
        .find_commitments(&TimeWindow::new(at(9, 30), at(11, 0)))
        .await
        .unwrap();
    assert_eq!(touching.len(), 1);

    let later = repository
        .find_commitments(&TimeWindow::new(at(10, 0), at(11, 0)))
        .await
        .unwrap();
    assert!(later.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_available_cars_excludes_committed_and_maintenance(pool: PgPool) {
    let requester = create_user(&pool, "requester@mail.com", UserRole::User).await;
    let driver = create_user(&pool, "driver@mail.com", UserRole::Driver).await;
    let admin = create_user(&pool, "admin@mail.com", UserRole::Admin).await;
    let busy = create_car(&pool, "4กข 0001").await;
    let free = create_car(&pool, "4กข 0002").await;
    CarRepository::new(pool.clone())
        .create(NewCar {
            status: CarStatus::Maintenance,
            ..new_car("4กข 0003")
        })
        .await
        .unwrap();

    let request = create_request(&pool, &requester, at(9, 0), at(9, 30)).await;
    assign(&pool, &request, &busy, &driver, &admin).await;

    let response = send(
        build_app_with_pool(pool),
        "GET",
        "/available-cars?start_datetime=2024-01-10T08:00:00Z&end_datetime=2024-01-10T10:00:00Z",
        Some(&token_for_user(&requester)),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let ids: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|car| car["id"].clone())
        .collect();
    assert_eq!(ids, vec![json!(free.id)]);
}

// ---------------------------------------------------------------------------
// User administration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_cannot_delete_super_admin(pool: PgPool) {
    let admin = create_user(&pool, "admin@mail.com", UserRole::Admin).await;
    let root = create_user(&pool, "root@mail.com", UserRole::SuperAdmin).await;

    let uri = format!("/user?id={}", root.id);
    let response = send(
        build_app_with_pool(pool.clone()),
        "DELETE",
        &uri,
        Some(&token_for_user(&admin)),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let stored = UserRepository::new(pool).find_by_id(root.id).await.unwrap();
    assert_eq!(stored.map(|user| user.role), Some(UserRole::SuperAdmin));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_email_insert_is_bad_request(pool: PgPool) {
    let repository = UserRepository::new(pool);
    repository
        .create(new_user("same@mail.com", UserRole::User))
        .await
        .unwrap();

    let err = repository
        .create(new_user("same@mail.com", UserRole::Driver))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Email is already in use"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_plate_insert_is_bad_request(pool: PgPool) {
    let repository = CarRepository::new(pool);
    repository.create(new_car("5กข 1111")).await.unwrap();

    let err = repository.create(new_car("5กข 1111")).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}
