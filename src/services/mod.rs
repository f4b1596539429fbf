//! Lógica de negocio pura
//! 
//! Los servicios no tocan la base de datos: reciben filas ya cargadas
//! por los repositorios y devuelven resultados o errores de dominio.

pub mod availability_service;
pub mod report_service;
pub mod request_lifecycle;
