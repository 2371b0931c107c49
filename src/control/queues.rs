use crate::aircraft::{Aircraft, Callsign};
use std::collections::VecDeque;

fn find_in<'a>(fleet: &'a [Aircraft], callsign: &str) -> Option<&'a Aircraft> {
    fleet.iter().find(|a| a.callsign().as_ref() == callsign)
}

/// Strict FIFO queue of aircraft waiting to take off.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TakeoffQueue {
    queue: VecDeque<Callsign>,
}

impl TakeoffQueue {
    pub fn new() -> TakeoffQueue {
        TakeoffQueue::default()
    }

    /// Enqueues an aircraft; adding one that is already queued is a no-op.
    pub fn add(&mut self, callsign: Callsign) {
        if !self.contains(&callsign) {
            self.queue.push_back(callsign);
        }
    }

    pub fn remove(&mut self) -> Option<Callsign> {
        self.queue.pop_front()
    }

    pub fn peek(&self) -> Option<&Callsign> {
        self.queue.front()
    }

    pub fn contains(&self, callsign: &str) -> bool {
        self.queue.iter().any(|c| c.as_ref() == callsign)
    }

    pub fn in_order(&self) -> Vec<Callsign> {
        self.queue.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl std::fmt::Display for TakeoffQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let callsigns: Vec<&str> = self.queue.iter().map(|c| c.as_ref()).collect();
        write!(f, "TakeoffQueue [{}]", callsigns.join(", "))
    }
}

/// Queue of aircraft waiting to land.
///
/// Unlike the takeoff queue, removal order is decided by a priority scan
/// re-evaluated on every peek/remove rather than maintained incrementally:
/// emergencies first, then critically low fuel (20% or less), then
/// passenger-carrying models, then the front of insertion order. Within a
/// tier the first match in insertion order wins.
///
/// The queue stores callsigns only, so peeking needs the tower's aircraft
/// arena to look up fuel and emergency state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LandingQueue {
    queue: VecDeque<Callsign>,
}

impl LandingQueue {
    pub fn new() -> LandingQueue {
        LandingQueue::default()
    }

    /// Enqueues an aircraft; adding one that is already queued is a no-op.
    pub fn add(&mut self, callsign: Callsign) {
        if !self.contains(&callsign) {
            self.queue.push_back(callsign);
        }
    }

    pub fn contains(&self, callsign: &str) -> bool {
        self.queue.iter().any(|c| c.as_ref() == callsign)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn select(queue: &VecDeque<Callsign>, fleet: &[Aircraft]) -> Option<usize> {
        if queue.is_empty() {
            return None;
        }
        let mut emergency = None;
        let mut low_fuel = None;
        let mut passenger = None;
        for (i, callsign) in queue.iter().enumerate() {
            let Some(aircraft) = find_in(fleet, callsign) else {
                continue;
            };
            if emergency.is_none() && aircraft.has_emergency() {
                emergency = Some(i);
            }
            if low_fuel.is_none() && aircraft.fuel_percent_remaining() <= 20 {
                low_fuel = Some(i);
            }
            if passenger.is_none() && aircraft.model().spec().passenger_capacity > 0 {
                passenger = Some(i);
            }
        }
        emergency.or(low_fuel).or(passenger).or(Some(0))
    }

    /// The aircraft that would land next. Does not modify the queue.
    pub fn peek(&self, fleet: &[Aircraft]) -> Option<&Callsign> {
        Self::select(&self.queue, fleet).map(|i| &self.queue[i])
    }

    /// Removes and returns the current priority winner.
    pub fn remove(&mut self, fleet: &[Aircraft]) -> Option<Callsign> {
        Self::select(&self.queue, fleet).and_then(|i| self.queue.remove(i))
    }

    /// The order aircraft would land in if no state changed. Observational
    /// only; the underlying queue is untouched.
    pub fn in_order(&self, fleet: &[Aircraft]) -> Vec<Callsign> {
        let mut rest = self.queue.clone();
        let mut ordered = Vec::with_capacity(rest.len());
        while let Some(callsign) = Self::select(&rest, fleet).and_then(|i| rest.remove(i)) {
            ordered.push(callsign);
        }
        ordered
    }

    /// Queue summary in priority order, e.g. `LandingQueue [ABC123, XYZ987]`.
    pub fn describe(&self, fleet: &[Aircraft]) -> String {
        let ordered = self.in_order(fleet);
        let callsigns: Vec<&str> = ordered.iter().map(|c| c.as_ref()).collect();
        format!("LandingQueue [{}]", callsigns.join(", "))
    }
}
