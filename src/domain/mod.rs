pub mod datatype;
pub mod entity;
pub mod port;
pub mod repository;
pub mod service;
pub mod validation;
mod transform;
