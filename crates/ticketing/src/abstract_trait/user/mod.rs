mod repository;
mod service;

pub use self::repository::{
    DynUserCommandRepository, DynUserQueryRepository, UserCommandRepositoryTrait,
    UserQueryRepositoryTrait,
};
pub use self::service::{DynIdentityService, IdentityServiceTrait};
