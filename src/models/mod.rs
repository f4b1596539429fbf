//! Modelos del sistema
//! 
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL definido en `migrations/`.

pub mod auth;
pub mod car;
pub mod car_request;
pub mod driver_license;
pub mod user;
