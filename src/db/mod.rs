pub mod initialize;
pub mod laborers;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod reference;
pub mod stats;
