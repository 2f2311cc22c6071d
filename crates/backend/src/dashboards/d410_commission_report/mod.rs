pub mod calculator;
pub mod repository;
pub mod service;
