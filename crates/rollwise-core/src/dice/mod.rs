pub mod table;

pub use table::{FACES, OUTCOMES, ProbabilityTable, outcomes};
