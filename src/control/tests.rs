pub mod utils;

mod queues;
mod tower;
