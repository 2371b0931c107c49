use crate::aircraft::{Aircraft, AircraftModel};
use crate::control::queues::{LandingQueue, TakeoffQueue};
use crate::control::tests::utils::{aircraft, id};
use crate::tasks::TaskType;

#[test]
fn test_takeoff_queue_is_fifo() {
    let mut queue = TakeoffQueue::new();
    queue.add(id("A"));
    queue.add(id("B"));
    queue.add(id("C"));
    assert_eq!(queue.peek(), Some(&id("A")));
    assert_eq!(queue.remove(), Some(id("A")));
    assert_eq!(queue.remove(), Some(id("B")));
    assert_eq!(queue.remove(), Some(id("C")));
    assert_eq!(queue.remove(), None);
}

#[test]
fn test_takeoff_queue_duplicate_add_is_noop() {
    let mut queue = TakeoffQueue::new();
    queue.add(id("A"));
    queue.add(id("A"));
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_landing_queue_empty() {
    let mut queue = LandingQueue::new();
    assert_eq!(queue.peek(&[]), None);
    assert_eq!(queue.remove(&[]), None);
    assert!(queue.in_order(&[]).is_empty());
}

#[test]
fn test_landing_queue_duplicate_add_is_noop() {
    let mut queue = LandingQueue::new();
    queue.add(id("A"));
    queue.add(id("A"));
    assert_eq!(queue.len(), 1);
}

/// Freighter at full fuel first, passenger jet second, low-fuel freighter
/// third: low fuel wins, then the passenger jet, then the front of the
/// queue.
#[test]
fn test_landing_priority_tiers() {
    let fleet = vec![
        aircraft("FREIGHT1", AircraftModel::Boeing747_8F, TaskType::Land, 100.0),
        aircraft("PAX1", AircraftModel::AirbusA320, TaskType::Land, 100.0),
        aircraft("FREIGHT2", AircraftModel::Boeing747_8F, TaskType::Land, 15.0),
    ];
    let mut queue = LandingQueue::new();
    for a in &fleet {
        queue.add(a.callsign().clone());
    }

    assert_eq!(queue.peek(&fleet), Some(&id("FREIGHT2")));
    assert_eq!(queue.remove(&fleet), Some(id("FREIGHT2")));
    assert_eq!(queue.peek(&fleet), Some(&id("PAX1")));
    assert_eq!(queue.remove(&fleet), Some(id("PAX1")));
    assert_eq!(queue.peek(&fleet), Some(&id("FREIGHT1")));
}

#[test]
fn test_emergency_outranks_low_fuel_and_passengers() {
    let mut fleet = vec![
        aircraft("LOWFUEL", AircraftModel::Boeing747_8F, TaskType::Land, 10.0),
        aircraft("PAX1", AircraftModel::AirbusA320, TaskType::Land, 100.0),
        aircraft("MAYDAY", AircraftModel::SikorskySkycrane, TaskType::Land, 100.0),
    ];
    fleet[2].declare_emergency();
    let mut queue = LandingQueue::new();
    for a in &fleet {
        queue.add(a.callsign().clone());
    }
    assert_eq!(queue.peek(&fleet), Some(&id("MAYDAY")));
    assert_eq!(queue.remove(&fleet), Some(id("MAYDAY")));
    assert_eq!(queue.peek(&fleet), Some(&id("LOWFUEL")));
}

#[test]
fn test_first_in_insertion_order_wins_within_a_tier() {
    let fleet = vec![
        aircraft("PAX1", AircraftModel::AirbusA320, TaskType::Land, 100.0),
        aircraft("PAX2", AircraftModel::Boeing787, TaskType::Land, 100.0),
    ];
    let mut queue = LandingQueue::new();
    queue.add(id("PAX2"));
    queue.add(id("PAX1"));
    assert_eq!(queue.peek(&fleet), Some(&id("PAX2")));
}

#[test]
fn test_in_order_is_observational() {
    let fleet: Vec<Aircraft> = vec![
        aircraft("FREIGHT1", AircraftModel::Boeing747_8F, TaskType::Land, 100.0),
        aircraft("PAX1", AircraftModel::AirbusA320, TaskType::Land, 100.0),
        aircraft("FREIGHT2", AircraftModel::Boeing747_8F, TaskType::Land, 15.0),
    ];
    let mut queue = LandingQueue::new();
    for a in &fleet {
        queue.add(a.callsign().clone());
    }

    let ordered = queue.in_order(&fleet);
    assert_eq!(ordered, vec![id("FREIGHT2"), id("PAX1"), id("FREIGHT1")]);
    // Observing the order must not change what peek returns or the queue
    // contents.
    assert_eq!(queue.in_order(&fleet), ordered);
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.peek(&fleet), Some(&id("FREIGHT2")));
    assert!(queue.contains("FREIGHT1"));
}
