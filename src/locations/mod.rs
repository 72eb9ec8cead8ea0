pub mod locations;

pub use locations::{Location, Locations};
