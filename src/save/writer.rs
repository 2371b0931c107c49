use crate::aircraft::Aircraft;
use crate::control::tower::ControlTower;
use crate::tasks::{Task, TaskList, TaskType};

/// The four encoded streams making up one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub ticks: String,
    pub aircraft: String,
    pub queues: String,
    pub terminals: String,
}

/// Encodes the full tower state.
pub fn encode_tower(tower: &ControlTower) -> Snapshot {
    Snapshot {
        ticks: encode_ticks(tower),
        aircraft: encode_aircraft(tower),
        queues: encode_queues(tower),
        terminals: encode_terminals(tower),
    }
}

pub fn encode_ticks(tower: &ControlTower) -> String {
    format!("{}\n", tower.ticks_elapsed())
}

fn encode_task(task: Task) -> String {
    match task.task_type() {
        TaskType::Load => format!("LOAD@{}", task.load_percent()),
        other => other.name().to_string(),
    }
}

/// Current task first, then the rest of the ring in order.
fn encode_task_list(tasks: &TaskList) -> String {
    tasks
        .iter_from_current()
        .map(encode_task)
        .collect::<Vec<String>>()
        .join(",")
}

fn encode_aircraft_line(aircraft: &Aircraft) -> String {
    format!(
        "{}:{}:{}:{:.2}:{}:{}",
        aircraft.callsign(),
        aircraft.model().name(),
        encode_task_list(aircraft.tasks()),
        aircraft.fuel_amount(),
        aircraft.has_emergency(),
        aircraft.cargo().amount(),
    )
}

pub fn encode_aircraft(tower: &ControlTower) -> String {
    let mut out = format!("{}\n", tower.aircraft().len());
    for aircraft in tower.aircraft() {
        out.push_str(&encode_aircraft_line(aircraft));
        out.push('\n');
    }
    out
}

fn encode_queue(name: &str, callsigns: &[impl AsRef<str>]) -> String {
    let mut out = format!("{}:{}\n", name, callsigns.len());
    if !callsigns.is_empty() {
        let joined: Vec<&str> = callsigns.iter().map(|c| c.as_ref()).collect();
        out.push_str(&joined.join(","));
        out.push('\n');
    }
    out
}

/// Takeoff queue in FIFO order, landing queue in priority order, then the
/// loading map ordered by callsign.
pub fn encode_queues(tower: &ControlTower) -> String {
    let mut out = encode_queue("TakeoffQueue", &tower.takeoff_queue().in_order());
    out.push_str(&encode_queue(
        "LandingQueue",
        &tower.landing_queue().in_order(tower.aircraft()),
    ));
    out.push_str(&format!("LoadingAircraft:{}\n", tower.loading_aircraft().len()));
    if !tower.loading_aircraft().is_empty() {
        let pairs: Vec<String> = tower
            .loading_aircraft()
            .iter()
            .map(|(callsign, ticks)| format!("{}:{}", callsign, ticks))
            .collect();
        out.push_str(&pairs.join(","));
        out.push('\n');
    }
    out
}

pub fn encode_terminals(tower: &ControlTower) -> String {
    let mut out = format!("{}\n", tower.terminals().len());
    for terminal in tower.terminals() {
        out.push_str(&format!(
            "{}:{}:{}:{}\n",
            terminal.kind().name(),
            terminal.terminal_number(),
            terminal.has_emergency(),
            terminal.gates().len(),
        ));
        for gate in terminal.gates() {
            out.push_str(&format!(
                "{}:{}\n",
                gate.gate_number(),
                gate.occupant().map(|c| c.as_ref()).unwrap_or("empty"),
            ));
        }
    }
    out
}
