pub mod collector;
pub mod counters;
pub mod network;
