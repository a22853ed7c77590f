//! Members module - domain models, services, and traits.

mod members_errors;
mod members_model;
mod members_service;
mod members_traits;

#[cfg(test)]
mod members_model_tests;

// Re-export the public interface
pub use members_errors::MembersError;
pub use members_model::{Member, MemberEquitySnapshot, MemberStatus, NewMember};
pub use members_service::MemberService;
pub use members_traits::{MemberRepositoryTrait, MemberServiceTrait};
