//! Domain layer for the identity directory.
//!
//! Holds the entity and request types shared by both entity kinds, the
//! validation and storage ports, and the generic [`service::EntityService`]
//! that drives the transactional create workflow. Nothing in this crate
//! touches a database directly.

pub mod entity;
pub mod error;
pub mod kind;
pub mod service;
pub mod storage;
pub mod types;
pub mod validation;
