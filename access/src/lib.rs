//! Business-owner access policy: who may publish services, accept bookings
//! and list vehicles, given verification, subscription and trial state.

pub mod account;
pub mod config;
pub mod decision;
pub mod lifecycle;
pub mod policy;

pub use account::{AccountId, BusinessAccount, SubscriptionPlan, SubscriptionStatus, VerificationStatus};
pub use config::AccessConfig;
pub use decision::{AccessState, AccessSummary, Capability, Decision, DenyReason};
