pub mod dependency;

pub use dependency::{dependency_chain, direct_dependencies, direct_dependents, has_cycle};
