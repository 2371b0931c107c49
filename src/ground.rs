use crate::aircraft::{AircraftType, Callsign};
use thiserror::Error;

/// Maximum number of gates per terminal.
pub const MAX_NUM_GATES: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroundError {
    #[error("gate {gate_number} is occupied by {occupant}")]
    GateOccupied { gate_number: u32, occupant: Callsign },
    #[error("terminal {terminal_number} already has {MAX_NUM_GATES} gates")]
    TerminalFull { terminal_number: u32 },
    #[error("no suitable gate available")]
    NoSuitableGate,
}

/// A parking position for exactly one aircraft, identified by callsign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    gate_number: u32,
    occupant: Option<Callsign>,
}

impl Gate {
    pub fn new(gate_number: u32) -> Gate {
        Gate {
            gate_number,
            occupant: None,
        }
    }

    pub fn gate_number(&self) -> u32 {
        self.gate_number
    }

    pub fn occupant(&self) -> Option<&Callsign> {
        self.occupant.as_ref()
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn park(&mut self, callsign: Callsign) -> Result<(), GroundError> {
        match &self.occupant {
            Some(occupant) => Err(GroundError::GateOccupied {
                gate_number: self.gate_number,
                occupant: occupant.clone(),
            }),
            None => {
                self.occupant = Some(callsign);
                Ok(())
            }
        }
    }

    /// Empties the gate; a no-op if it is already empty.
    pub fn clear(&mut self) {
        self.occupant = None;
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Gate {} [{}]",
            self.gate_number,
            self.occupant.as_deref().unwrap_or("empty")
        )
    }
}

/// Which aircraft type a terminal serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalKind {
    Airplane,
    Helicopter,
}

impl TerminalKind {
    pub fn name(&self) -> &'static str {
        match self {
            TerminalKind::Airplane => "AirplaneTerminal",
            TerminalKind::Helicopter => "HelicopterTerminal",
        }
    }

    pub fn from_name(name: &str) -> Option<TerminalKind> {
        match name {
            "AirplaneTerminal" => Some(TerminalKind::Airplane),
            "HelicopterTerminal" => Some(TerminalKind::Helicopter),
            _ => None,
        }
    }

    pub fn serves(&self) -> AircraftType {
        match self {
            TerminalKind::Airplane => AircraftType::Airplane,
            TerminalKind::Helicopter => AircraftType::Helicopter,
        }
    }
}

/// A group of up to [`MAX_NUM_GATES`] gates serving one aircraft type.
///
/// Gate insertion order is preserved and is the search order used by
/// [`Terminal::find_unoccupied_gate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal {
    kind: TerminalKind,
    terminal_number: u32,
    gates: Vec<Gate>,
    emergency: bool,
}

impl Terminal {
    pub fn new(kind: TerminalKind, terminal_number: u32) -> Terminal {
        Terminal {
            kind,
            terminal_number,
            gates: Vec::new(),
            emergency: false,
        }
    }

    pub fn kind(&self) -> TerminalKind {
        self.kind
    }

    pub fn terminal_number(&self) -> u32 {
        self.terminal_number
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn gates_mut(&mut self) -> &mut [Gate] {
        &mut self.gates
    }

    pub fn add_gate(&mut self, gate: Gate) -> Result<(), GroundError> {
        if self.gates.len() == MAX_NUM_GATES {
            return Err(GroundError::TerminalFull {
                terminal_number: self.terminal_number,
            });
        }
        self.gates.push(gate);
        Ok(())
    }

    /// First unoccupied gate in insertion order.
    pub fn find_unoccupied_gate(&self) -> Result<&Gate, GroundError> {
        self.gates
            .iter()
            .find(|g| !g.is_occupied())
            .ok_or(GroundError::NoSuitableGate)
    }

    pub(crate) fn find_unoccupied_gate_index(&self) -> Option<usize> {
        self.gates.iter().position(|g| !g.is_occupied())
    }

    /// Percentage of occupied gates, rounded; 0 for a terminal with no gates.
    pub fn occupancy_level(&self) -> u32 {
        if self.gates.is_empty() {
            return 0;
        }
        let occupied = self.gates.iter().filter(|g| g.is_occupied()).count();
        (100.0 * occupied as f64 / self.gates.len() as f64).round() as u32
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
}

impl std::fmt::Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}, {} gates{}",
            self.kind.name(),
            self.terminal_number,
            self.gates.len(),
            if self.emergency { " (EMERGENCY)" } else { "" }
        )
    }
}
