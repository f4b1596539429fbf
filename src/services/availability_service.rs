//! Motor de disponibilidad
//! 
//! Dada una ventana `[start, end]`, calcula qué vehículos y conductores no
//! están comprometidos por una solicitud ASSIGNED/APPROVED que se solape.
//! Es una función pura: la carga de datos vive en los repositorios.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::FromRow;
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::car::Car;
use crate::models::car_request::RequestStatus;
use crate::models::user::User;

/// Ventana de tiempo cerrada `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Solo hay filtro si llegan ambos extremos
    pub fn from_bounds(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Some(Self::new(start, end)),
            _ => None,
        }
    }

    fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// `self` es la ventana consultada, `existing` la del compromiso.
    ///
    /// Equivale a `existing.start <= self.end && existing.end >= self.start`:
    /// tocar un borde cuenta como solape.
    pub fn overlaps(&self, existing: &TimeWindow) -> bool {
        self.contains(existing.start)
            || self.contains(existing.end)
            || (existing.start <= self.start && existing.end >= self.end)
    }
}

/// Query params de `/available-cars` y `/available-drivers`
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityQuery {
    pub start_datetime: Option<String>,
    pub end_datetime: Option<String>,
}

/// Una solicitud existente reducida a lo que importa para la disponibilidad
#[derive(Debug, Clone, FromRow)]
pub struct Commitment {
    pub car_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub status: RequestStatus,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
}

impl Commitment {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_datetime, self.end_datetime)
    }

    fn blocks(&self, window: &TimeWindow) -> bool {
        self.status.is_committing() && window.overlaps(&self.window())
    }
}

/// Qué referencia de la solicitud bloquea a la entidad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Car,
    Driver,
}

impl Resource {
    fn referenced_by(&self, commitment: &Commitment) -> Option<Uuid> {
        match self {
            Resource::Car => commitment.car_id,
            Resource::Driver => commitment.driver_id,
        }
    }
}

/// Entidades que se pueden reservar
pub trait Bookable {
    const RESOURCE: Resource;

    fn booking_id(&self) -> Uuid;
}

impl Bookable for Car {
    const RESOURCE: Resource = Resource::Car;

    fn booking_id(&self) -> Uuid {
        self.id
    }
}

impl Bookable for User {
    const RESOURCE: Resource = Resource::Driver;

    fn booking_id(&self) -> Uuid {
        self.id
    }
}

/// Ids ocupados en la ventana
pub fn busy_ids(resource: Resource, commitments: &[Commitment], window: &TimeWindow) -> HashSet<Uuid> {
    commitments
        .iter()
        .filter(|c| c.blocks(window))
        .filter_map(|c| resource.referenced_by(c))
        .collect()
}

/// Entidades libres. Sin ventana se devuelve la lista completa sin filtrar.
pub fn filter_available<T: Bookable>(
    entities: Vec<T>,
    commitments: &[Commitment],
    window: Option<&TimeWindow>,
) -> Vec<T> {
    let Some(window) = window else {
        return entities;
    };

    let busy = busy_ids(T::RESOURCE, commitments, window);
    entities
        .into_iter()
        .filter(|entity| !busy.contains(&entity.booking_id()))
        .collect()
}
