pub mod queues;
pub mod tower;

#[cfg(test)]
mod tests;
