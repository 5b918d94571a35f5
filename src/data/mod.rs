pub mod restart;
pub mod sample;
pub mod series;
