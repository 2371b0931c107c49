use crate::aircraft::{Aircraft, AircraftModel, Callsign};
use crate::control::queues::{LandingQueue, TakeoffQueue};
use crate::control::tower::ControlTower;
use crate::ground::{Gate, MAX_NUM_GATES, Terminal, TerminalKind};
use crate::tasks::{Task, TaskList, TaskType};
use std::collections::BTreeMap;
use thiserror::Error;

/// A violation of the snapshot grammar. Decoding is strict: the first
/// malformed field aborts the whole stream.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed record at line {line}: {message}")]
pub struct MalformedRecord {
    pub line: usize,
    pub message: String,
}

/// Cursor over one stream's lines, tracking the 1-based line number for
/// error reporting.
struct Lines<'a> {
    iter: std::str::Lines<'a>,
    line: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Lines<'a> {
        Lines {
            iter: text.lines(),
            line: 0,
        }
    }

    fn err(&self, message: impl Into<String>) -> MalformedRecord {
        MalformedRecord {
            line: self.line,
            message: message.into(),
        }
    }

    fn next_line(&mut self, expected: &str) -> Result<&'a str, MalformedRecord> {
        self.line += 1;
        self.iter
            .next()
            .ok_or_else(|| self.err(format!("expected {expected}, got end of stream")))
    }

    /// Fails if any lines remain beyond what the declared counts accounted
    /// for.
    fn expect_end(&mut self) -> Result<(), MalformedRecord> {
        match self.iter.next() {
            None => Ok(()),
            Some(extra) => {
                self.line += 1;
                Err(self.err(format!("unexpected trailing line {extra:?}")))
            }
        }
    }

    /// Splits a colon-delimited line into exactly `count` fields.
    fn fields(&self, line: &'a str, count: usize) -> Result<Vec<&'a str>, MalformedRecord> {
        if line.ends_with(':') {
            return Err(self.err(format!("trailing delimiter in {line:?}")));
        }
        let fields: Vec<&str> = line.split(':').collect();
        if fields.len() != count {
            return Err(self.err(format!(
                "expected {count} fields in {line:?}, found {}",
                fields.len()
            )));
        }
        Ok(fields)
    }

    fn parse<T: std::str::FromStr>(&self, field: &str, what: &str) -> Result<T, MalformedRecord> {
        field
            .parse()
            .map_err(|_| self.err(format!("{what} {field:?} is not valid")))
    }
}

fn resolve(
    fleet: &[Aircraft],
    callsign: &str,
    lines: &Lines<'_>,
) -> Result<Callsign, MalformedRecord> {
    fleet
        .iter()
        .find(|a| a.callsign().as_ref() == callsign)
        .map(|a| a.callsign().clone())
        .ok_or_else(|| lines.err(format!("unknown callsign {callsign:?}")))
}

/// Decodes the ticks stream: a single non-negative integer.
pub fn load_ticks(text: &str) -> Result<u64, MalformedRecord> {
    let mut lines = Lines::new(text);
    let line = lines.next_line("ticks elapsed")?;
    lines.parse(line, "ticks elapsed")
}

/// Decodes the aircraft stream: a count line followed by exactly that many
/// aircraft records.
pub fn load_aircraft(text: &str) -> Result<Vec<Aircraft>, MalformedRecord> {
    let mut lines = Lines::new(text);
    let count: usize = {
        let line = lines.next_line("aircraft count")?;
        lines.parse(line, "aircraft count")?
    };
    let mut fleet = Vec::with_capacity(count);
    for _ in 0..count {
        let line = lines.next_line("an aircraft record")?;
        fleet.push(read_aircraft(line, &lines)?);
    }
    lines.expect_end()?;
    Ok(fleet)
}

fn read_aircraft<'a>(line: &'a str, lines: &Lines<'a>) -> Result<Aircraft, MalformedRecord> {
    let fields = lines.fields(line, 6)?;
    let callsign: Callsign = Callsign::from(fields[0]);
    let model = AircraftModel::from_name(fields[1])
        .ok_or_else(|| lines.err(format!("unknown aircraft model {:?}", fields[1])))?;
    let tasks = read_task_list(fields[2], lines)?;
    let fuel: f64 = lines.parse(fields[3], "fuel amount")?;
    let emergency: bool = lines.parse(fields[4], "emergency flag")?;
    let cargo: u32 = lines.parse(fields[5], "cargo amount")?;
    let mut aircraft = Aircraft::new(callsign, model, tasks, fuel, cargo)
        .map_err(|e| lines.err(e.to_string()))?;
    if emergency {
        aircraft.declare_emergency();
    }
    Ok(aircraft)
}

fn read_task_list(encoded: &str, lines: &Lines<'_>) -> Result<TaskList, MalformedRecord> {
    let mut tasks = Vec::new();
    for token in encoded.split(',') {
        if token.contains('@') {
            let parts: Vec<&str> = token.split('@').collect();
            if parts.len() != 2 || parts[1].is_empty() {
                return Err(lines.err(format!("malformed load task {token:?}")));
            }
            if parts[0] != TaskType::Load.name() {
                return Err(lines.err(format!(
                    "task {:?} cannot carry a load percentage",
                    parts[0]
                )));
            }
            let percent: u32 = lines.parse(parts[1], "load percentage")?;
            tasks.push(Task::load(percent));
        } else {
            let task_type = TaskType::from_name(token)
                .ok_or_else(|| lines.err(format!("unknown task type {token:?}")))?;
            tasks.push(Task::new(task_type));
        }
    }
    TaskList::new(tasks).map_err(|e| lines.err(e.to_string()))
}

/// Decodes the queues stream: the takeoff queue, the landing queue, then
/// the loading map, each validated against the already-loaded fleet.
pub fn load_queues(
    text: &str,
    fleet: &[Aircraft],
) -> Result<(TakeoffQueue, LandingQueue, BTreeMap<Callsign, u32>), MalformedRecord> {
    let mut lines = Lines::new(text);
    let mut takeoff = TakeoffQueue::new();
    for callsign in read_queue(&mut lines, fleet, "TakeoffQueue")? {
        takeoff.add(callsign);
    }
    let mut landing = LandingQueue::new();
    for callsign in read_queue(&mut lines, fleet, "LandingQueue")? {
        landing.add(callsign);
    }
    let loading = read_loading(&mut lines, fleet)?;
    lines.expect_end()?;
    Ok((takeoff, landing, loading))
}

fn read_queue(
    lines: &mut Lines<'_>,
    fleet: &[Aircraft],
    expected: &str,
) -> Result<Vec<Callsign>, MalformedRecord> {
    let header = lines.next_line("a queue header")?;
    let fields = lines.fields(header, 2)?;
    if fields[0] != expected {
        return Err(lines.err(format!("expected {expected} header, got {:?}", fields[0])));
    }
    let count: usize = lines.parse(fields[1], "queued aircraft count")?;
    if count == 0 {
        return Ok(Vec::new());
    }
    let line = lines.next_line("queued callsigns")?;
    let callsigns: Vec<&str> = line.split(',').collect();
    if callsigns.len() != count {
        return Err(lines.err(format!(
            "{expected} declares {count} aircraft but lists {}",
            callsigns.len()
        )));
    }
    callsigns
        .into_iter()
        .map(|c| resolve(fleet, c, lines))
        .collect()
}

fn read_loading(
    lines: &mut Lines<'_>,
    fleet: &[Aircraft],
) -> Result<BTreeMap<Callsign, u32>, MalformedRecord> {
    let header = lines.next_line("the loading aircraft header")?;
    let fields = lines.fields(header, 2)?;
    if fields[0] != "LoadingAircraft" {
        return Err(lines.err(format!(
            "expected LoadingAircraft header, got {:?}",
            fields[0]
        )));
    }
    let count: usize = lines.parse(fields[1], "loading aircraft count")?;
    let mut loading = BTreeMap::new();
    if count == 0 {
        return Ok(loading);
    }
    let line = lines.next_line("loading callsign/ticks pairs")?;
    let pairs: Vec<&str> = line.split(',').collect();
    if pairs.len() != count {
        return Err(lines.err(format!(
            "LoadingAircraft declares {count} aircraft but lists {}",
            pairs.len()
        )));
    }
    for pair in pairs {
        let fields = lines.fields(pair, 2)?;
        let callsign = resolve(fleet, fields[0], lines)?;
        let ticks: u32 = lines.parse(fields[1], "ticks remaining")?;
        if ticks < 1 {
            return Err(lines.err(format!("ticks remaining must be at least 1, got {ticks}")));
        }
        loading.insert(callsign, ticks);
    }
    Ok(loading)
}

/// Decodes the terminals stream: a count line followed by that many
/// terminal blocks, each a header plus one line per gate.
pub fn load_terminals(text: &str, fleet: &[Aircraft]) -> Result<Vec<Terminal>, MalformedRecord> {
    let mut lines = Lines::new(text);
    let count: usize = {
        let line = lines.next_line("terminal count")?;
        lines.parse(line, "terminal count")?
    };
    let mut terminals = Vec::with_capacity(count);
    for _ in 0..count {
        terminals.push(read_terminal(&mut lines, fleet)?);
    }
    lines.expect_end()?;
    Ok(terminals)
}

fn read_terminal(lines: &mut Lines<'_>, fleet: &[Aircraft]) -> Result<Terminal, MalformedRecord> {
    let header = lines.next_line("a terminal header")?;
    let fields = lines.fields(header, 4)?;
    let kind = TerminalKind::from_name(fields[0])
        .ok_or_else(|| lines.err(format!("unknown terminal type {:?}", fields[0])))?;
    let number: u32 = lines.parse(fields[1], "terminal number")?;
    if number < 1 {
        return Err(lines.err(format!("terminal number must be at least 1, got {number}")));
    }
    let emergency: bool = lines.parse(fields[2], "emergency flag")?;
    let gate_count: usize = lines.parse(fields[3], "gate count")?;
    if gate_count > MAX_NUM_GATES {
        return Err(lines.err(format!(
            "terminal {number} declares {gate_count} gates, maximum is {MAX_NUM_GATES}"
        )));
    }
    let mut terminal = Terminal::new(kind, number);
    for _ in 0..gate_count {
        let line = lines.next_line("a gate record")?;
        let gate = read_gate(line, lines, fleet)?;
        terminal
            .add_gate(gate)
            .map_err(|e| lines.err(e.to_string()))?;
    }
    if emergency {
        terminal.declare_emergency();
    }
    Ok(terminal)
}

fn read_gate<'a>(line: &'a str, lines: &Lines<'a>, fleet: &[Aircraft]) -> Result<Gate, MalformedRecord> {
    let fields = lines.fields(line, 2)?;
    let number: u32 = lines.parse(fields[0], "gate number")?;
    if number < 1 {
        return Err(lines.err(format!("gate number must be at least 1, got {number}")));
    }
    let mut gate = Gate::new(number);
    if fields[1] != "empty" {
        let callsign = resolve(fleet, fields[1], lines)?;
        gate.park(callsign).map_err(|e| lines.err(e.to_string()))?;
    }
    Ok(gate)
}

/// Decodes all four streams and assembles a tower. Any cross-reference to a
/// callsign missing from the aircraft stream fails the whole load.
pub fn load_tower(
    ticks: &str,
    aircraft: &str,
    queues: &str,
    terminals: &str,
) -> Result<ControlTower, MalformedRecord> {
    let ticks_elapsed = load_ticks(ticks)?;
    let fleet = load_aircraft(aircraft)?;
    let terminals = load_terminals(terminals, &fleet)?;
    let (takeoff, landing, loading) = load_queues(queues, &fleet)?;
    let mut tower = ControlTower::with_state(ticks_elapsed, fleet, landing, takeoff, loading);
    for terminal in terminals {
        tower.add_terminal(terminal);
    }
    Ok(tower)
}
