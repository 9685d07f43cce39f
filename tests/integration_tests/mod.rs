// Aggregates per-area integration suites
mod benchmark;
mod sentiment;
mod utils;
