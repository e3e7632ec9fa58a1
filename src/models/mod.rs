pub mod webhook_event;

pub use webhook_event::{Bucket, Person, Recording, WebhookEvent};
