pub mod domain;
pub mod edit;
pub mod error;
pub mod idgen;
pub mod normalize;
pub mod repo;
pub mod search;
pub mod session;
pub mod store;
pub mod validate;
