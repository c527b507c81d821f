pub mod balance;
pub mod errors;
pub mod models;
pub mod money;
pub mod optimizer;
pub mod services;
pub mod splits;
