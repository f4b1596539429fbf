//! Extractores de cuerpo y query
//!
//! Envuelven `axum::Json` y `axum::extract::Query` para que un cuerpo o una
//! query mal formados respondan 400 con el formato de error de la API en
//! lugar del 422 en texto plano de axum.

use axum::extract::{FromRequest, FromRequestParts};

use crate::utils::errors::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
