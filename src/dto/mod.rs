//! DTOs de entrada y salida de la API
//! 
//! Los nombres de los campos siguen lo que consume el frontend:
//! camelCase para usuarios y vehículos, snake_case para solicitudes.

pub mod auth_dto;
pub mod car_dto;
pub mod report_dto;
pub mod request_dto;
pub mod user_dto;
