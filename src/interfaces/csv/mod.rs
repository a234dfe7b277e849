//! CSV input and output for the command line driver.

pub mod availability_writer;
pub mod event_reader;
pub mod slot_reader;
