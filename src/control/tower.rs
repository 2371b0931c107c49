use crate::aircraft::{Aircraft, Callsign};
use crate::control::queues::{LandingQueue, TakeoffQueue};
use crate::ground::{Gate, GroundError, Terminal};
use crate::tasks::TaskType;
use std::collections::BTreeMap;
use tracing::debug;

/// Single owner of the whole simulation: the aircraft arena, all terminals
/// (hence all gates), both queues and the loading map. Queues, gates and the
/// loading map refer back into the arena by callsign.
pub struct ControlTower {
    aircraft: Vec<Aircraft>,
    terminals: Vec<Terminal>,
    landing_queue: LandingQueue,
    takeoff_queue: TakeoffQueue,
    loading: BTreeMap<Callsign, u32>,
    ticks_elapsed: u64,
    /// Alternates landing/takeoff resolution. Not persisted; restarts at
    /// zero when a tower is restored from a save.
    tick_cycle: u64,
}

impl ControlTower {
    pub fn new() -> ControlTower {
        ControlTower::with_state(
            0,
            Vec::new(),
            LandingQueue::new(),
            TakeoffQueue::new(),
            BTreeMap::new(),
        )
    }

    /// Builds a tower from previously saved state. Terminals are registered
    /// afterwards via [`ControlTower::add_terminal`].
    pub fn with_state(
        ticks_elapsed: u64,
        aircraft: Vec<Aircraft>,
        landing_queue: LandingQueue,
        takeoff_queue: TakeoffQueue,
        loading: BTreeMap<Callsign, u32>,
    ) -> ControlTower {
        ControlTower {
            aircraft,
            terminals: Vec::new(),
            landing_queue,
            takeoff_queue,
            loading,
            ticks_elapsed,
            tick_cycle: 0,
        }
    }

    pub fn add_terminal(&mut self, terminal: Terminal) {
        self.terminals.push(terminal);
    }

    /// Registers a new aircraft. Aircraft whose current task is WAIT or LOAD
    /// must be parked immediately; if no suitable gate exists the add is
    /// aborted and the tower is unchanged.
    pub fn add_aircraft(&mut self, aircraft: Aircraft) -> Result<(), GroundError> {
        let current = aircraft.tasks().current().task_type();
        if matches!(current, TaskType::Wait | TaskType::Load) {
            let (t, g) = self.find_unoccupied_gate_index(&aircraft)?;
            self.terminals[t].gates_mut()[g].park(aircraft.callsign().clone())?;
        }
        self.aircraft.push(aircraft);
        self.place_in_queues(self.aircraft.len() - 1);
        Ok(())
    }

    pub fn aircraft(&self) -> &[Aircraft] {
        &self.aircraft
    }

    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    pub fn landing_queue(&self) -> &LandingQueue {
        &self.landing_queue
    }

    pub fn takeoff_queue(&self) -> &TakeoffQueue {
        &self.takeoff_queue
    }

    /// Aircraft currently loading, mapped to ticks remaining, ordered by
    /// callsign.
    pub fn loading_aircraft(&self) -> &BTreeMap<Callsign, u32> {
        &self.loading
    }

    pub fn ticks_elapsed(&self) -> u64 {
        self.ticks_elapsed
    }

    pub fn find_aircraft(&self, callsign: &str) -> Option<&Aircraft> {
        self.aircraft.iter().find(|a| a.callsign().as_ref() == callsign)
    }

    pub fn find_aircraft_mut(&mut self, callsign: &str) -> Option<&mut Aircraft> {
        self.aircraft
            .iter_mut()
            .find(|a| a.callsign().as_ref() == callsign)
    }

    pub fn find_terminal(&self, terminal_number: u32) -> Option<&Terminal> {
        self.terminals
            .iter()
            .find(|t| t.terminal_number() == terminal_number)
    }

    pub fn find_terminal_mut(&mut self, terminal_number: u32) -> Option<&mut Terminal> {
        self.terminals
            .iter_mut()
            .find(|t| t.terminal_number() == terminal_number)
    }

    /// First unoccupied gate for this aircraft: terminals are searched in
    /// registration order, skipping terminals of the wrong aircraft type and
    /// terminals under emergency.
    pub fn find_unoccupied_gate(&self, aircraft: &Aircraft) -> Result<&Gate, GroundError> {
        let (t, g) = self.find_unoccupied_gate_index(aircraft)?;
        Ok(&self.terminals[t].gates()[g])
    }

    fn find_unoccupied_gate_index(&self, aircraft: &Aircraft) -> Result<(usize, usize), GroundError> {
        let wanted = aircraft.model().spec().aircraft_type;
        for (t, terminal) in self.terminals.iter().enumerate() {
            if terminal.kind().serves() != wanted || terminal.has_emergency() {
                continue;
            }
            if let Some(g) = terminal.find_unoccupied_gate_index() {
                return Ok((t, g));
            }
        }
        Err(GroundError::NoSuitableGate)
    }

    /// The gate an aircraft is currently parked at, if any.
    pub fn find_gate_of(&self, callsign: &str) -> Option<&Gate> {
        self.terminals
            .iter()
            .flat_map(|t| t.gates())
            .find(|g| g.occupant().is_some_and(|c| c.as_ref() == callsign))
    }

    fn find_gate_of_mut(&mut self, callsign: &str) -> Option<&mut Gate> {
        self.terminals
            .iter_mut()
            .flat_map(|t| t.gates_mut())
            .find(|g| g.occupant().is_some_and(|c| c.as_ref() == callsign))
    }

    /// Advances the whole simulation by one tick.
    ///
    /// Order matters: fuel/cargo updates happen before task advancement, at
    /// most one landing and one takeoff are resolved per tick (alternating
    /// which gets priority), and queue placement runs last so aircraft that
    /// changed task this tick become visible next tick.
    pub fn tick(&mut self) {
        self.tick_cycle += 1;
        for aircraft in &mut self.aircraft {
            aircraft.tick();
        }
        for aircraft in &mut self.aircraft {
            if matches!(
                aircraft.tasks().current().task_type(),
                TaskType::Away | TaskType::Wait
            ) {
                aircraft.tasks_mut().advance();
            }
        }
        self.update_loading();
        if self.tick_cycle % 2 == 0 {
            if !self.try_land() {
                self.try_take_off();
            }
        } else {
            self.try_take_off();
        }
        self.place_all_in_queues();
        self.ticks_elapsed += 1;
    }

    /// Counts down every loading aircraft; finished ones leave their gate
    /// and move on to TAKEOFF.
    fn update_loading(&mut self) {
        for ticks in self.loading.values_mut() {
            *ticks = ticks.saturating_sub(1);
        }
        let finished: Vec<Callsign> = self
            .loading
            .iter()
            .filter(|(_, ticks)| **ticks == 0)
            .map(|(callsign, _)| callsign.clone())
            .collect();
        for callsign in finished {
            self.loading.remove(&callsign);
            if let Some(gate) = self.find_gate_of_mut(&callsign) {
                gate.clear();
            }
            if let Some(aircraft) = self.find_aircraft_mut(&callsign) {
                aircraft.tasks_mut().advance();
            }
            debug!(%callsign, "loading complete");
        }
    }

    /// Lands the landing queue's priority winner if a gate is free for it.
    /// Returns false (leaving the queue untouched) when no gate is
    /// available; that aircraft simply tries again next tick.
    fn try_land(&mut self) -> bool {
        let Some(callsign) = self.landing_queue.peek(&self.aircraft).cloned() else {
            return false;
        };
        let Some(idx) = self
            .aircraft
            .iter()
            .position(|a| a.callsign() == &callsign)
        else {
            return false;
        };
        let Ok((t, g)) = self.find_unoccupied_gate_index(&self.aircraft[idx]) else {
            debug!(%callsign, "no gate available, landing deferred");
            return false;
        };
        if self.terminals[t].gates_mut()[g].park(callsign.clone()).is_err() {
            return false;
        }
        let aircraft = &mut self.aircraft[idx];
        aircraft.unload();
        aircraft.tasks_mut().advance();
        self.landing_queue.remove(&self.aircraft);
        debug!(%callsign, "landed");
        true
    }

    fn try_take_off(&mut self) {
        let Some(callsign) = self.takeoff_queue.remove() else {
            return;
        };
        if let Some(aircraft) = self.find_aircraft_mut(&callsign) {
            aircraft.tasks_mut().advance();
        }
        debug!(%callsign, "took off");
    }

    fn place_in_queues(&mut self, idx: usize) {
        let callsign = self.aircraft[idx].callsign().clone();
        match self.aircraft[idx].tasks().current().task_type() {
            TaskType::Land => self.landing_queue.add(callsign),
            TaskType::Takeoff => self.takeoff_queue.add(callsign),
            TaskType::Load => {
                let loading_time = self.aircraft[idx].loading_time();
                self.loading.entry(callsign).or_insert(loading_time);
            }
            _ => {}
        }
    }

    fn place_all_in_queues(&mut self) {
        for idx in 0..self.aircraft.len() {
            self.place_in_queues(idx);
        }
    }
}

impl Default for ControlTower {
    fn default() -> ControlTower {
        ControlTower::new()
    }
}

impl std::fmt::Display for ControlTower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = |task| {
            self.aircraft
                .iter()
                .filter(|a| a.tasks().current().task_type() == task)
                .count()
        };
        write!(
            f,
            "ControlTower: {} terminals, {} total aircraft ({} LAND, {} TAKEOFF, {} LOAD)",
            self.terminals.len(),
            self.aircraft.len(),
            count(TaskType::Land),
            count(TaskType::Takeoff),
            count(TaskType::Load),
        )
    }
}
