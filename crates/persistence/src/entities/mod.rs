//! Entity definitions (database row mappings).

pub mod customer;
pub mod follow_up;
pub mod message;
pub mod template;
pub mod user;

pub use customer::CustomerEntity;
pub use follow_up::FollowUpEntity;
pub use message::{MessageEntity, MessageWithCustomerRow, MessageWithSenderRow};
pub use template::TemplateEntity;
pub use user::{UserEntity, UserWithStatsRow};
