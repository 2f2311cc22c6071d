pub mod ranking;
pub mod repository;
pub mod service;
