pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
