pub mod bilateral;
pub mod convolve;
pub mod engine;
pub mod kernel;
pub mod median;
pub mod options;
pub mod padding;
