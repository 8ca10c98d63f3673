pub mod file;

pub use file::{load_timeline, parse_timeline};
