pub mod car_repository;
pub mod car_request_repository;
pub mod driver_license_repository;
pub mod report_repository;
pub mod user_repository;
