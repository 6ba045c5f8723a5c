// Library for tests to access modules

pub mod chart;
pub mod config;
pub mod models;
pub mod routes;
pub mod sample_store;
pub mod sysinfo_repo;
pub mod version;
pub mod worker;
