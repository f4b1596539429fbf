pub mod account_controller;
pub mod auth_controller;
pub mod availability_controller;
pub mod car_controller;
pub mod history_controller;
pub mod report_controller;
pub mod request_controller;
pub mod user_controller;
