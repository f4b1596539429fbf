//! Backend de reservas de vehículos de la flota
//! 
//! Los empleados piden vehículos, los administradores asignan vehículo y
//! conductor, y los aprobadores aceptan o rechazan cada solicitud.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
