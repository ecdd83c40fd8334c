pub mod command;
pub mod domain;
pub mod events;
pub mod factory;
pub mod repository;
pub mod value_objects;
