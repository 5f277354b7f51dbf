//! Infrastructure layer: DTOs and concrete implementations of the store
//! traits defined by the domain layer.

pub mod dto;
pub mod hasher;
pub mod repository;
