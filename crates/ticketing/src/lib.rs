pub mod abstract_trait;
pub mod di;
pub mod domain;
pub mod model;
pub mod policy;
pub mod repository;
pub mod service;
