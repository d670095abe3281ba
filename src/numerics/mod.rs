//! Numerical building blocks: adaptive quadrature and a small Newton solver

mod quadrature;
mod roots;

pub use quadrature::{integrate, Integral, QuadratureTolerance};
pub use roots::{solve_2d, NewtonSettings, Root2};
