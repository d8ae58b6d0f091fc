pub mod client;
pub mod credentials;

pub use client::{DashboardClient, PublishPost, SchedulePost, DEFAULT_BASE_URL};
pub use credentials::{CredentialStore, MemoryCredentialStore};
