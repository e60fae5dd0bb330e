pub mod notifier;

pub use notifier::{NullNotifier, SlackNotifier};
