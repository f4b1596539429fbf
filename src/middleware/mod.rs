//! Middleware del sistema
//! 
//! Este módulo contiene la autenticación por token, las comprobaciones
//! de rol, los extractores de cuerpo y query, y la configuración de CORS.

pub mod auth;
pub mod cors;
pub mod extract;

pub use auth::*;
pub use cors::*;
pub use extract::*;
