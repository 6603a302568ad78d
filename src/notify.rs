//! Push delivery seam. The real push service lives outside this server.

use crate::logic::Reminder;

/// Delivery failure reported by a notifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NotifyError(pub String);

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification failed: {}", self.0)
    }
}

impl std::error::Error for NotifyError {}

pub trait Notifier: Send + Sync {
    fn send(&self, reminder: &Reminder) -> Result<(), NotifyError>;
}

/// Writes reminders to the log instead of pushing them.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, reminder: &Reminder) -> Result<(), NotifyError> {
        log::info!(
            "Reminder for {} ({}): {}",
            reminder.uid,
            reminder.tournament_id,
            reminder.body
        );
        Ok(())
    }
}

/// Send each reminder; failures are logged and skipped. Returns how many went out.
pub fn deliver(notifier: &dyn Notifier, reminders: &[Reminder]) -> usize {
    reminders
        .iter()
        .filter(|r| match notifier.send(r) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Reminder to {} dropped: {}", r.uid, e);
                false
            }
        })
        .count()
}
