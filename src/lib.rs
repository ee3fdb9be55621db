pub mod config;
pub mod coords;
pub mod dueness;
pub mod errors;
pub mod manager_catalog;
pub mod manager_influx;
pub mod manager_openmeteo;
pub mod mapper;
pub mod models;
pub mod sources;
pub mod worker;
