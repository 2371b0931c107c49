//! Discrete-tick simulation of an airport control tower.
//!
//! Aircraft cycle through a fixed lifecycle (flying away, queuing to land,
//! waiting at a gate, loading, queuing to take off) driven by
//! [`control::tower::ControlTower::tick`]. The whole simulation can be
//! snapshotted to and restored from four plain-text streams via [`save`].

pub mod aircraft;
pub mod control;
pub mod ground;
pub mod save;
pub mod tasks;
