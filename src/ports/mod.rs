//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SubjectReader` - Subject snapshots from the identity collaborator
//! - `SubscriptionRepository` - Subscription persistence
//! - `EventPublisher` - Domain event publication

mod event_publisher;
mod subject_reader;
mod subscription_repository;

pub use event_publisher::EventPublisher;
pub use subject_reader::SubjectReader;
pub use subscription_repository::SubscriptionRepository;
