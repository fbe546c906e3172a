pub mod anomaly;
pub mod cloud;
pub mod local_model;
pub mod paths;
pub mod persistence;
pub mod repositories;

pub use repositories::in_memory::InMemoryPredictionResultRepository;
