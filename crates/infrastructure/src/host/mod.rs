mod simulated_tabs;

pub use simulated_tabs::{SimulatedTabHost, TabState};
