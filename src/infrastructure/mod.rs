//! Implementations of the ports that talk to the outside world: clocks and
//! payment channels.

pub mod clock;
pub mod settlement;
