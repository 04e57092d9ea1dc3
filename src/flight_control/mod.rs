mod clock;
mod flight_computer;
mod session;

pub use clock::{AnomalyFlags, SimulationClock};
pub use flight_computer::{ConnectError, FlightComputer};
