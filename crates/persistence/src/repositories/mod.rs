//! Repository implementations.

pub mod customer;
pub mod dashboard;
pub mod follow_up;
pub mod message;
pub mod template;
pub mod user;

pub use customer::{CustomerRepository, NewCustomer};
pub use dashboard::DashboardRepository;
pub use follow_up::{CompletionOutcome, FollowUpRepository, ReviewOutcome, SkipOutcome};
pub use message::MessageRepository;
pub use template::TemplateRepository;
pub use user::UserRepository;
