use crate::tasks::{TaskList, TaskType};
use std::sync::Arc;
use thiserror::Error;

/// Weight of a litre of aviation fuel, in kilograms.
pub const LITRE_OF_FUEL_WEIGHT: f64 = 0.8;

/// Average passenger weight including luggage, in kilograms.
pub const AVG_PASSENGER_WEIGHT: f64 = 90.0;

pub type Callsign = Arc<str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AircraftType {
    Airplane,
    Helicopter,
}

impl AircraftType {
    pub fn name(&self) -> &'static str {
        match self {
            AircraftType::Airplane => "AIRPLANE",
            AircraftType::Helicopter => "HELICOPTER",
        }
    }
}

impl std::fmt::Display for AircraftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Static characteristics shared by every aircraft of a given model.
#[derive(Debug, PartialEq)]
pub struct ModelSpec {
    pub aircraft_type: AircraftType,
    /// Weight with no fuel or cargo, in kilograms.
    pub empty_weight: u32,
    /// Maximum fuel, in litres.
    pub fuel_capacity: f64,
    pub passenger_capacity: u32,
    /// Maximum freight, in kilograms.
    pub freight_capacity: u32,
}

/// The fixed catalogue of supported aircraft models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AircraftModel {
    AirbusA320,
    Boeing747_8F,
    RobinsonR44,
    Boeing787,
    Fokker100,
    SikorskySkycrane,
}

impl AircraftModel {
    pub const ALL: [AircraftModel; 6] = [
        AircraftModel::AirbusA320,
        AircraftModel::Boeing747_8F,
        AircraftModel::RobinsonR44,
        AircraftModel::Boeing787,
        AircraftModel::Fokker100,
        AircraftModel::SikorskySkycrane,
    ];

    pub fn spec(&self) -> &'static ModelSpec {
        match self {
            AircraftModel::AirbusA320 => &ModelSpec {
                aircraft_type: AircraftType::Airplane,
                empty_weight: 42600,
                fuel_capacity: 27200.0,
                passenger_capacity: 150,
                freight_capacity: 0,
            },
            AircraftModel::Boeing747_8F => &ModelSpec {
                aircraft_type: AircraftType::Airplane,
                empty_weight: 197131,
                fuel_capacity: 226117.0,
                passenger_capacity: 0,
                freight_capacity: 137756,
            },
            AircraftModel::RobinsonR44 => &ModelSpec {
                aircraft_type: AircraftType::Helicopter,
                empty_weight: 658,
                fuel_capacity: 190.0,
                passenger_capacity: 4,
                freight_capacity: 0,
            },
            AircraftModel::Boeing787 => &ModelSpec {
                aircraft_type: AircraftType::Airplane,
                empty_weight: 119950,
                fuel_capacity: 126206.0,
                passenger_capacity: 242,
                freight_capacity: 0,
            },
            AircraftModel::Fokker100 => &ModelSpec {
                aircraft_type: AircraftType::Airplane,
                empty_weight: 24375,
                fuel_capacity: 13365.0,
                passenger_capacity: 97,
                freight_capacity: 0,
            },
            AircraftModel::SikorskySkycrane => &ModelSpec {
                aircraft_type: AircraftType::Helicopter,
                empty_weight: 8724,
                fuel_capacity: 3328.0,
                passenger_capacity: 0,
                freight_capacity: 9100,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AircraftModel::AirbusA320 => "AIRBUS_A320",
            AircraftModel::Boeing747_8F => "BOEING_747_8F",
            AircraftModel::RobinsonR44 => "ROBINSON_R44",
            AircraftModel::Boeing787 => "BOEING_787",
            AircraftModel::Fokker100 => "FOKKER_100",
            AircraftModel::SikorskySkycrane => "SIKORSKY_SKYCRANE",
        }
    }

    pub fn from_name(name: &str) -> Option<AircraftModel> {
        AircraftModel::ALL.iter().copied().find(|m| m.name() == name)
    }

    /// Models with nonzero freight capacity carry freight; all others
    /// carry passengers.
    pub fn is_freight_carrier(&self) -> bool {
        self.spec().freight_capacity > 0
    }
}

impl std::fmt::Display for AircraftModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AircraftError {
    #[error("fuel amount {fuel} outside range 0..={capacity}")]
    InvalidFuel { fuel: f64, capacity: f64 },
    #[error("cargo amount {cargo} exceeds capacity {capacity}")]
    InvalidCargo { cargo: u32, capacity: u32 },
}

/// Current cargo onboard; the variant is fixed by the aircraft's model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cargo {
    Passengers(u32),
    Freight(u32),
}

impl Cargo {
    pub fn amount(&self) -> u32 {
        match self {
            Cargo::Passengers(n) | Cargo::Freight(n) => *n,
        }
    }
}

/// An aircraft whose movement is managed by the control tower.
#[derive(Debug, Clone, PartialEq)]
pub struct Aircraft {
    callsign: Callsign,
    model: AircraftModel,
    tasks: TaskList,
    fuel_amount: f64,
    emergency: bool,
    cargo: Cargo,
}

impl Aircraft {
    /// Creates a new aircraft, not in a state of emergency. The cargo kind
    /// (passengers or freight) follows the model.
    pub fn new(
        callsign: Callsign,
        model: AircraftModel,
        tasks: TaskList,
        fuel_amount: f64,
        cargo_amount: u32,
    ) -> Result<Aircraft, AircraftError> {
        let spec = model.spec();
        if fuel_amount < 0.0 || fuel_amount > spec.fuel_capacity {
            return Err(AircraftError::InvalidFuel {
                fuel: fuel_amount,
                capacity: spec.fuel_capacity,
            });
        }
        let (cargo, capacity) = if model.is_freight_carrier() {
            (Cargo::Freight(cargo_amount), spec.freight_capacity)
        } else {
            (Cargo::Passengers(cargo_amount), spec.passenger_capacity)
        };
        if cargo_amount > capacity {
            return Err(AircraftError::InvalidCargo {
                cargo: cargo_amount,
                capacity,
            });
        }
        Ok(Aircraft {
            callsign,
            model,
            tasks,
            fuel_amount,
            emergency: false,
            cargo,
        })
    }

    pub fn callsign(&self) -> &Callsign {
        &self.callsign
    }

    pub fn model(&self) -> AircraftModel {
        self.model
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskList {
        &mut self.tasks
    }

    pub fn fuel_amount(&self) -> f64 {
        self.fuel_amount
    }

    pub fn cargo(&self) -> Cargo {
        self.cargo
    }

    pub fn declare_emergency(&mut self) {
        self.emergency = true;
    }

    pub fn clear_emergency(&mut self) {
        self.emergency = false;
    }

    pub fn has_emergency(&self) -> bool {
        self.emergency
    }

    /// Percentage of fuel remaining, rounded to the nearest whole percent.
    pub fn fuel_percent_remaining(&self) -> u32 {
        (100.0 * self.fuel_amount / self.model.spec().fuel_capacity).round() as u32
    }

    /// Total weight in kilograms: empty weight, plus fuel, plus cargo.
    pub fn total_weight(&self) -> f64 {
        let base =
            self.model.spec().empty_weight as f64 + self.fuel_amount * LITRE_OF_FUEL_WEIGHT;
        match self.cargo {
            Cargo::Passengers(n) => base + n as f64 * AVG_PASSENGER_WEIGHT,
            Cargo::Freight(kg) => base + kg as f64,
        }
    }

    fn cargo_capacity(&self) -> u32 {
        match self.cargo {
            Cargo::Passengers(_) => self.model.spec().passenger_capacity,
            Cargo::Freight(_) => self.model.spec().freight_capacity,
        }
    }

    /// The cargo amount the current LOAD task is aiming for.
    fn cargo_to_load(&self) -> u32 {
        let ratio = self.tasks.current().load_percent() as f64 / 100.0;
        (self.cargo_capacity() as f64 * ratio).round() as u32
    }

    /// Number of ticks needed to load at the gate, driven by the current
    /// LOAD task's target rather than the cargo currently onboard.
    pub fn loading_time(&self) -> u32 {
        match self.cargo {
            Cargo::Freight(_) => {
                let target = self.cargo_to_load();
                if target < 1000 {
                    1
                } else if target <= 50000 {
                    2
                } else {
                    3
                }
            }
            Cargo::Passengers(_) => {
                let target = self.cargo_to_load();
                if target == 0 {
                    return 1;
                }
                let ticks = (target as f64).log10().round();
                if ticks < 1.0 { 1 } else { ticks as u32 }
            }
        }
    }

    /// Percentage of cargo capacity in use, rounded; 0 for models with no
    /// capacity of the carried kind.
    pub fn occupancy_level(&self) -> u32 {
        let capacity = self.cargo_capacity();
        if capacity == 0 {
            return 0;
        }
        (self.cargo.amount() as f64 * 100.0 / capacity as f64).round() as u32
    }

    /// Per-tick fuel and cargo update.
    ///
    /// AWAY burns 10% of fuel capacity (never below zero). LOAD refuels
    /// capacity/loading_time litres (never above capacity) and loads an
    /// equal share of the task's cargo target each tick.
    pub fn tick(&mut self) {
        let spec = self.model.spec();
        match self.tasks.current().task_type() {
            TaskType::Away => {
                self.fuel_amount = (self.fuel_amount - spec.fuel_capacity / 10.0).max(0.0);
            }
            TaskType::Load => {
                let loading_time = self.loading_time();
                self.fuel_amount = (self.fuel_amount + spec.fuel_capacity / loading_time as f64)
                    .min(spec.fuel_capacity);
                let per_tick = (self.cargo_to_load() as f64 / loading_time as f64).round() as u32;
                let capacity = self.cargo_capacity();
                self.cargo = match self.cargo {
                    Cargo::Passengers(n) => Cargo::Passengers((n + per_tick).min(capacity)),
                    Cargo::Freight(kg) => Cargo::Freight((kg + per_tick).min(capacity)),
                };
            }
            _ => {}
        }
    }

    /// Empties all cargo. Fuel is untouched.
    pub fn unload(&mut self) {
        self.cargo = match self.cargo {
            Cargo::Passengers(_) => Cargo::Passengers(0),
            Cargo::Freight(_) => Cargo::Freight(0),
        };
    }
}

impl std::fmt::Display for Aircraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}{}",
            self.model.spec().aircraft_type,
            self.callsign,
            self.model,
            self.tasks.current().task_type(),
            if self.emergency { " (EMERGENCY)" } else { "" }
        )
    }
}
