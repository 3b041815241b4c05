//! Fleet domain model: brands, models, and vehicles.

use serde::{Deserialize, Serialize};

/// Vehicle availability, stored as the legacy Spanish labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    Available,
    Rented,
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "disponible",
            VehicleStatus::Rented => "alquilado",
            VehicleStatus::Maintenance => "mantenimiento",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "disponible" => Some(VehicleStatus::Available),
            "alquilado" => Some(VehicleStatus::Rented),
            "mantenimiento" => Some(VehicleStatus::Maintenance),
            _ => None,
        }
    }
}

/// Input for adding a vehicle to the fleet. New vehicles start as
/// available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVehicle {
    pub model_id: i64,
    pub plate: String,
    pub year: i32,
    pub color: String,
    pub mileage: i64,
    pub daily_price: f64,
}

/// A fleet-listing row (vehicle joined with model and brand names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetVehicle {
    pub plate: String,
    pub year: i32,
    pub color: String,
    pub mileage: i64,
    pub daily_price: f64,
    pub status: VehicleStatus,
    pub model: String,
    pub brand: String,
}

/// Dropdown entry for picking a vehicle when opening a rental.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableVehicle {
    pub id: i64,
    pub daily_price: f64,
    pub display_name: String,
}

/// Dropdown entry for picking a model when adding a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelOption {
    pub id: i64,
    pub display_name: String,
}
