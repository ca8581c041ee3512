//! Crossover operators. Every operator resets its offspring's fitness to
//! the unevaluated sentinel.

pub mod cga;
pub mod crisp;
pub mod dmx;
pub mod indivisible;
pub mod merge;
pub mod one_point;
pub mod pnn;

pub use cga::cga_crossover;
pub use crisp::crisp_column_crossover;
pub use dmx::dmx_crossover;
pub use indivisible::one_point_indivisible;
pub use merge::merge_crossover;
pub use one_point::one_point;
pub use pnn::pnn_crossover;
