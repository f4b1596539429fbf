//! Reportes de uso de vehículos y conductores
//! 
//! Agrega las filas cargadas por `ReportRepository` en estadísticas
//! globales y en cubetas mensuales para la exportación CSV.

use chrono::{DateTime, Datelike, Utc};
use sqlx::FromRow;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::dto::report_dto::{CarUsage, DriverUsage, TripSummary};
use crate::models::car::CarStatus;
use crate::models::car_request::RequestStatus;
use crate::utils::csv::CsvWriter;
use crate::utils::errors::AppError;

const RECENT_TRIPS: usize = 5;

/// Una solicitud con los datos del vehículo y del conductor ya resueltos
#[derive(Debug, Clone, FromRow)]
pub struct UsageRow {
    pub car_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub status: RequestStatus,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub destination: String,
    pub purpose: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub license_plate: Option<String>,
    pub car_status: Option<CarStatus>,
    pub driver_first_name: Option<String>,
    pub driver_last_name: Option<String>,
}

impl UsageRow {
    fn hours(&self) -> f64 {
        (self.end_datetime - self.start_datetime).num_seconds() as f64 / 3600.0
    }

    fn car(&self) -> Option<CarRef<'_>> {
        Some(CarRef {
            id: self.car_id?,
            brand: self.brand.as_deref()?,
            model: self.model.as_deref()?,
            license_plate: self.license_plate.as_deref()?,
            status: self.car_status?,
        })
    }

    /// Solo cuentan los viajes aprobados con conductor existente
    fn approved_driver(&self) -> Option<(Uuid, &str, &str)> {
        if self.status != RequestStatus::Approved {
            return None;
        }
        Some((
            self.driver_id?,
            self.driver_first_name.as_deref()?,
            self.driver_last_name.as_deref()?,
        ))
    }

    fn trip(&self) -> TripSummary {
        TripSummary {
            destination: self.destination.clone(),
            purpose: self.purpose.clone(),
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
            status: self.status,
        }
    }
}

struct CarRef<'a> {
    id: Uuid,
    brand: &'a str,
    model: &'a str,
    license_plate: &'a str,
    status: CarStatus,
}

/// Tipo de exportación pedido en `?type=`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Car,
    Driver,
}

impl ReportKind {
    pub fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value {
            Some("car") => Ok(ReportKind::Car),
            Some("driver") => Ok(ReportKind::Driver),
            _ => Err(AppError::BadRequest("Invalid type".to_string())),
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ReportKind::Car => "car-usage-report.csv",
            ReportKind::Driver => "driver-report.csv",
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn sort_by_start(rows: &[UsageRow]) -> Vec<&UsageRow> {
    let mut sorted: Vec<&UsageRow> = rows.iter().collect();
    sorted.sort_by_key(|r| r.start_datetime);
    sorted
}

/// Estadísticas globales por vehículo
pub fn car_stats(rows: &[UsageRow]) -> Vec<CarUsage> {
    let mut by_car: BTreeMap<Uuid, CarUsage> = BTreeMap::new();
    let mut hours: BTreeMap<Uuid, f64> = BTreeMap::new();

    for row in sort_by_start(rows) {
        let Some(car) = row.car() else { continue };
        let entry = by_car.entry(car.id).or_insert_with(|| CarUsage {
            car_id: car.id,
            brand: car.brand.to_string(),
            model: car.model.to_string(),
            license_plate: car.license_plate.to_string(),
            total_trips: 0,
            total_hours: 0.0,
            status: car.status,
            recent_trips: Vec::new(),
        });
        entry.total_trips += 1;
        entry.recent_trips.push(row.trip());
        *hours.entry(car.id).or_default() += row.hours();
    }

    let mut stats: Vec<CarUsage> = by_car
        .into_values()
        .map(|mut usage| {
            usage.total_hours = round1(hours.get(&usage.car_id).copied().unwrap_or_default());
            let skip = usage.recent_trips.len().saturating_sub(RECENT_TRIPS);
            usage.recent_trips.drain(..skip);
            usage
        })
        .collect();
    stats.sort_by(|a, b| a.license_plate.cmp(&b.license_plate));
    stats
}

/// Estadísticas globales por conductor
pub fn driver_stats(rows: &[UsageRow]) -> Vec<DriverUsage> {
    let mut by_driver: BTreeMap<Uuid, DriverUsage> = BTreeMap::new();

    for row in rows {
        let Some((driver_id, first_name, last_name)) = row.approved_driver() else { continue };
        let entry = by_driver.entry(driver_id).or_insert_with(|| DriverUsage {
            driver_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            total_trips: 0,
            total_hours: 0.0,
        });
        entry.total_trips += 1;
        entry.total_hours += row.hours();
    }

    let mut stats: Vec<DriverUsage> = by_driver
        .into_values()
        .map(|mut usage| {
            usage.total_hours = round1(usage.total_hours);
            usage
        })
        .collect();
    stats.sort_by(|a, b| (&a.first_name, &a.last_name).cmp(&(&b.first_name, &b.last_name)));
    stats
}

/// Uso mensual de un vehículo
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyCarUsage {
    pub year: i32,
    pub month: u32,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub total_trips: u32,
    pub total_hours: f64,
    pub status: CarStatus,
    pub last_trip: Option<(DateTime<Utc>, String, String)>,
}

/// Uso mensual de un conductor
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyDriverUsage {
    pub year: i32,
    pub month: u32,
    pub driver_name: String,
    pub total_trips: u32,
    pub total_hours: f64,
}

impl MonthlyDriverUsage {
    pub fn avg_hours_per_trip(&self) -> f64 {
        if self.total_trips == 0 {
            0.0
        } else {
            self.total_hours / self.total_trips as f64
        }
    }
}

fn bucket(instant: DateTime<Utc>) -> (i32, u32) {
    (instant.year(), instant.month())
}

pub fn monthly_car_usage(rows: &[UsageRow]) -> Vec<MonthlyCarUsage> {
    let mut buckets: BTreeMap<(i32, u32, String, Uuid), MonthlyCarUsage> = BTreeMap::new();

    for row in sort_by_start(rows) {
        let Some(car) = row.car() else { continue };
        let (year, month) = bucket(row.start_datetime);
        let key = (year, month, car.license_plate.to_string(), car.id);
        let entry = buckets.entry(key).or_insert_with(|| MonthlyCarUsage {
            year,
            month,
            license_plate: car.license_plate.to_string(),
            brand: car.brand.to_string(),
            model: car.model.to_string(),
            total_trips: 0,
            total_hours: 0.0,
            status: car.status,
            last_trip: None,
        });
        entry.total_trips += 1;
        entry.total_hours += row.hours();
        entry.last_trip = Some((row.start_datetime, row.destination.clone(), row.purpose.clone()));
    }

    buckets.into_values().collect()
}

pub fn monthly_driver_usage(rows: &[UsageRow]) -> Vec<MonthlyDriverUsage> {
    let mut buckets: BTreeMap<(i32, u32, String, Uuid), MonthlyDriverUsage> = BTreeMap::new();

    for row in rows {
        let Some((driver_id, first_name, last_name)) = row.approved_driver() else { continue };
        let (year, month) = bucket(row.start_datetime);
        let driver_name = format!("{} {}", first_name, last_name);
        let entry = buckets
            .entry((year, month, driver_name.clone(), driver_id))
            .or_insert_with(|| MonthlyDriverUsage {
                year,
                month,
                driver_name,
                total_trips: 0,
                total_hours: 0.0,
            });
        entry.total_trips += 1;
        entry.total_hours += row.hours();
    }

    buckets.into_values().collect()
}

fn month_label(year: i32, month: u32) -> String {
    chrono::NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}/{}", month, year))
}

pub fn car_csv(usage: &[MonthlyCarUsage]) -> String {
    let mut writer = CsvWriter::new().header(&[
        "Month/Year",
        "License plate",
        "Brand/Model",
        "Trips",
        "Hours",
        "Status",
        "Last usage",
    ]);

    for car in usage {
        let last_usage = match &car.last_trip {
            Some((start, destination, purpose)) => format!(
                "{}\nDestination: {}\nPurpose: {}",
                start.format("%Y-%m-%d"),
                if destination.is_empty() { "-" } else { destination },
                if purpose.is_empty() { "-" } else { purpose },
            ),
            None => "-".to_string(),
        };
        writer.push_row([
            month_label(car.year, car.month),
            car.license_plate.clone(),
            format!("{} {}", car.brand, car.model),
            car.total_trips.to_string(),
            format!("{:.1}", car.total_hours),
            car.status.label().to_string(),
            last_usage,
        ]);
    }

    writer.finish()
}

pub fn driver_csv(usage: &[MonthlyDriverUsage]) -> String {
    let mut writer = CsvWriter::new().header(&[
        "Month/Year",
        "Driver",
        "Trips",
        "Hours",
        "Avg hours/trip",
    ]);

    for driver in usage {
        writer.push_row([
            month_label(driver.year, driver.month),
            driver.driver_name.clone(),
            driver.total_trips.to_string(),
            format!("{:.1}", driver.total_hours),
            format!("{:.1}", driver.avg_hours_per_trip()),
        ]);
    }

    let total_trips: u32 = usage.iter().map(|d| d.total_trips).sum();
    let total_hours: f64 = usage.iter().map(|d| d.total_hours).sum();
    let avg = if total_trips > 0 {
        total_hours / total_trips as f64
    } else {
        0.0
    };

    writer.push_blank();
    writer.push_row([
        "Total".to_string(),
        String::new(),
        total_trips.to_string(),
        format!("{:.1}", total_hours),
        format!("{:.1}", avg),
    ]);

    writer.finish()
}
