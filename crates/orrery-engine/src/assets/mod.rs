pub mod roster;

pub use roster::solar_system;
