use crate::aircraft::{Aircraft, AircraftModel, Cargo};
use crate::control::tests::utils::{aircraft, id, task_ring, terminal_with_gates};
use crate::control::tower::ControlTower;
use crate::ground::{Gate, GroundError, Terminal, TerminalKind};
use crate::tasks::TaskType;

#[test]
fn test_add_aircraft_enqueues_by_current_task() {
    let mut tower = ControlTower::new();
    tower.add_terminal(terminal_with_gates(TerminalKind::Airplane, 1, 2));
    tower
        .add_aircraft(aircraft("LANDER", AircraftModel::AirbusA320, TaskType::Land, 80.0))
        .unwrap();
    tower
        .add_aircraft(aircraft("LEAVER", AircraftModel::Boeing787, TaskType::Takeoff, 80.0))
        .unwrap();
    tower
        .add_aircraft(aircraft("LOADER", AircraftModel::Fokker100, TaskType::Load, 80.0))
        .unwrap();

    assert!(tower.landing_queue().contains("LANDER"));
    assert!(tower.takeoff_queue().contains("LEAVER"));
    assert!(tower.loading_aircraft().contains_key(&id("LOADER")));
}

#[test]
fn test_add_aircraft_parks_wait_and_load() {
    let mut tower = ControlTower::new();
    tower.add_terminal(terminal_with_gates(TerminalKind::Airplane, 1, 2));
    tower
        .add_aircraft(aircraft("WAITER", AircraftModel::AirbusA320, TaskType::Wait, 80.0))
        .unwrap();
    tower
        .add_aircraft(aircraft("LOADER", AircraftModel::Fokker100, TaskType::Load, 80.0))
        .unwrap();

    assert!(tower.find_gate_of("WAITER").is_some());
    assert!(tower.find_gate_of("LOADER").is_some());
}

#[test]
fn test_add_aircraft_without_gate_is_aborted() {
    let mut tower = ControlTower::new();
    // Only a helicopter terminal: no gate serves an airplane.
    tower.add_terminal(terminal_with_gates(TerminalKind::Helicopter, 1, 2));
    let result =
        tower.add_aircraft(aircraft("WAITER", AircraftModel::AirbusA320, TaskType::Wait, 80.0));

    assert!(matches!(result, Err(GroundError::NoSuitableGate)));
    assert!(tower.aircraft().is_empty());
    assert!(tower.terminals()[0].gates().iter().all(|g| !g.is_occupied()));
}

#[test]
fn test_gate_search_skips_wrong_type_and_emergency_terminals() {
    let mut tower = ControlTower::new();
    tower.add_terminal(terminal_with_gates(TerminalKind::Helicopter, 1, 2));
    let mut on_fire = terminal_with_gates(TerminalKind::Airplane, 2, 2);
    on_fire.declare_emergency();
    tower.add_terminal(on_fire);
    let mut open = Terminal::new(TerminalKind::Airplane, 3);
    open.add_gate(Gate::new(9)).unwrap();
    tower.add_terminal(open);

    let plane = aircraft("PLANE", AircraftModel::AirbusA320, TaskType::Away, 80.0);
    let gate = tower.find_unoccupied_gate(&plane).unwrap();
    assert_eq!(gate.gate_number(), 9);
}

#[test]
fn test_gate_search_reports_no_suitable_gate() {
    let mut tower = ControlTower::new();
    let mut full = terminal_with_gates(TerminalKind::Airplane, 1, 1);
    full.gates_mut()[0].park(id("OTHER")).unwrap();
    tower.add_terminal(full);

    let plane = aircraft("PLANE", AircraftModel::AirbusA320, TaskType::Away, 80.0);
    assert!(matches!(
        tower.find_unoccupied_gate(&plane),
        Err(GroundError::NoSuitableGate)
    ));
}

#[test]
fn test_first_tick_only_resolves_takeoffs() {
    let mut tower = ControlTower::new();
    tower.add_terminal(terminal_with_gates(TerminalKind::Airplane, 1, 2));
    tower
        .add_aircraft(aircraft("LANDER", AircraftModel::AirbusA320, TaskType::Land, 80.0))
        .unwrap();
    tower
        .add_aircraft(aircraft("LEAVER", AircraftModel::Boeing787, TaskType::Takeoff, 80.0))
        .unwrap();

    tower.tick();

    // Odd cycle: the takeoff goes through, the landing waits.
    assert!(tower.landing_queue().contains("LANDER"));
    assert_eq!(
        tower
            .find_aircraft("LEAVER")
            .unwrap()
            .tasks()
            .current()
            .task_type(),
        TaskType::Away
    );
    assert_eq!(tower.ticks_elapsed(), 1);
}

#[test]
fn test_second_tick_lands_parks_unloads_and_advances() {
    let mut tower = ControlTower::new();
    tower.add_terminal(terminal_with_gates(TerminalKind::Airplane, 1, 2));
    let spec = AircraftModel::AirbusA320.spec();
    let lander = Aircraft::new(
        id("LANDER"),
        AircraftModel::AirbusA320,
        task_ring(TaskType::Land, 60),
        spec.fuel_capacity,
        100,
    )
    .unwrap();
    tower.add_aircraft(lander).unwrap();

    tower.tick();
    assert!(tower.landing_queue().contains("LANDER"));
    tower.tick();

    let landed = tower.find_aircraft("LANDER").unwrap();
    assert_eq!(landed.tasks().current().task_type(), TaskType::Wait);
    assert_eq!(landed.cargo(), Cargo::Passengers(0));
    assert!(!tower.landing_queue().contains("LANDER"));
    assert!(tower.find_gate_of("LANDER").is_some());
}

#[test]
fn test_landing_deferred_when_no_gate_available() {
    let mut tower = ControlTower::new();
    let mut full = terminal_with_gates(TerminalKind::Airplane, 1, 1);
    full.gates_mut()[0].park(id("PARKED")).unwrap();
    tower.add_terminal(full);
    tower
        .add_aircraft(aircraft("LANDER", AircraftModel::AirbusA320, TaskType::Land, 80.0))
        .unwrap();

    tower.tick();
    tower.tick();

    assert!(tower.landing_queue().contains("LANDER"));
    assert_eq!(
        tower
            .find_aircraft("LANDER")
            .unwrap()
            .tasks()
            .current()
            .task_type(),
        TaskType::Land
    );
}

#[test]
fn test_loading_lifecycle_frees_gate_and_queues_takeoff() {
    let mut tower = ControlTower::new();
    tower.add_terminal(terminal_with_gates(TerminalKind::Airplane, 1, 2));
    // Fokker 100 loading passengers to 60%: about 58 passengers, so a
    // loading time of 2 ticks.
    tower
        .add_aircraft(aircraft("LOADER", AircraftModel::Fokker100, TaskType::Load, 50.0))
        .unwrap();
    assert_eq!(tower.loading_aircraft().get(&id("LOADER")), Some(&2));

    tower.tick();
    assert_eq!(tower.loading_aircraft().get(&id("LOADER")), Some(&1));
    assert!(tower.find_gate_of("LOADER").is_some());

    tower.tick();
    assert!(!tower.loading_aircraft().contains_key(&id("LOADER")));
    assert!(tower.find_gate_of("LOADER").is_none());
    assert_eq!(
        tower
            .find_aircraft("LOADER")
            .unwrap()
            .tasks()
            .current()
            .task_type(),
        TaskType::Takeoff
    );
    assert!(tower.takeoff_queue().contains("LOADER"));
}

#[test]
fn test_away_and_wait_advance_every_tick() {
    let mut tower = ControlTower::new();
    tower.add_terminal(terminal_with_gates(TerminalKind::Airplane, 1, 2));
    tower
        .add_aircraft(aircraft("CRUISER", AircraftModel::Boeing787, TaskType::Away, 80.0))
        .unwrap();

    tower.tick();

    // The AWAY ring here is AWAY -> LAND, so one tick moves it to LAND and
    // queue placement picks it up.
    assert_eq!(
        tower
            .find_aircraft("CRUISER")
            .unwrap()
            .tasks()
            .current()
            .task_type(),
        TaskType::Land
    );
    assert!(tower.landing_queue().contains("CRUISER"));
}

#[test]
fn test_find_terminal_by_number() {
    let mut tower = ControlTower::new();
    tower.add_terminal(terminal_with_gates(TerminalKind::Airplane, 3, 1));
    tower.add_terminal(terminal_with_gates(TerminalKind::Helicopter, 7, 1));

    assert_eq!(tower.find_terminal(7).map(Terminal::terminal_number), Some(7));
    assert!(tower.find_terminal(2).is_none());
}

#[test]
fn test_display_counts_tasks() {
    let mut tower = ControlTower::new();
    tower.add_terminal(terminal_with_gates(TerminalKind::Airplane, 1, 4));
    tower
        .add_aircraft(aircraft("A", AircraftModel::AirbusA320, TaskType::Land, 80.0))
        .unwrap();
    tower
        .add_aircraft(aircraft("B", AircraftModel::Boeing787, TaskType::Land, 80.0))
        .unwrap();
    tower
        .add_aircraft(aircraft("C", AircraftModel::Fokker100, TaskType::Takeoff, 80.0))
        .unwrap();

    assert_eq!(
        tower.to_string(),
        "ControlTower: 1 terminals, 3 total aircraft (2 LAND, 1 TAKEOFF, 0 LOAD)"
    );
}
