mod ids;
pub mod panic;
mod signal;
#[cfg(test)]
pub mod testing;

pub use ids::*;
pub use signal::*;
