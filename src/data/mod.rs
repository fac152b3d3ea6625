pub mod client;
pub mod repository;
pub mod service;

pub use client::{sample_stations, BikeListClient, BikeListConfig};
pub use repository::StationRepository;
pub use service::StationService;
