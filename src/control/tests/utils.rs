use crate::aircraft::{Aircraft, AircraftModel, Callsign};
use crate::ground::{Gate, Terminal, TerminalKind};
use crate::tasks::{Task, TaskList, TaskType};
use std::sync::Arc;

pub fn id(s: &str) -> Callsign {
    Arc::from(s)
}

/// The full AWAY->LAND->WAIT->LOAD->TAKEOFF ring, rotated so that `start`
/// is the current task.
pub fn task_ring(start: TaskType, load_percent: u32) -> TaskList {
    let base = [
        TaskType::Away,
        TaskType::Land,
        TaskType::Wait,
        TaskType::Load,
        TaskType::Takeoff,
    ];
    let pos = base.iter().position(|t| *t == start).unwrap();
    let tasks = (0..base.len())
        .map(|i| match base[(pos + i) % base.len()] {
            TaskType::Load => Task::load(load_percent),
            other => Task::new(other),
        })
        .collect();
    TaskList::new(tasks).unwrap()
}

/// An aircraft with the given percentage of fuel, no cargo, loading to 60%.
pub fn aircraft(
    callsign: &str,
    model: AircraftModel,
    start: TaskType,
    fuel_percent: f64,
) -> Aircraft {
    let fuel = model.spec().fuel_capacity * fuel_percent / 100.0;
    Aircraft::new(id(callsign), model, task_ring(start, 60), fuel, 0).unwrap()
}

pub fn terminal_with_gates(kind: TerminalKind, number: u32, gates: u32) -> Terminal {
    let mut terminal = Terminal::new(kind, number);
    for n in 1..=gates {
        terminal.add_gate(Gate::new(n)).unwrap();
    }
    terminal
}
