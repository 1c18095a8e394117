//! Domain definitions.

pub mod application;
pub mod building;
pub mod lease;
pub mod person;
pub mod unit;

pub use self::{
    application::Application, building::Building, lease::Lease,
    person::Person, unit::Unit,
};
