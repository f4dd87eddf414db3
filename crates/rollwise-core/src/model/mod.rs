pub mod distance;
pub mod multiplier;
pub mod note;
