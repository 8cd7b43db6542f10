pub mod db;
pub mod entities;
pub mod error;
pub mod local;
pub mod repository;
pub mod services;
