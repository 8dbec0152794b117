pub mod services;
pub mod strategies;
pub mod strategy;
pub mod types;
