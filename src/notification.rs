//! Non-fatal diagnostics collected while reading a file

use std::fmt;

/// Severity of a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Something in the file is recognised but not decoded.
    NotImplemented,
    /// Informational.
    None,
    /// Data was skipped or looks suspicious.
    Warning,
    /// A recoverable error.
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotificationType::NotImplemented => "not implemented",
            NotificationType::None => "info",
            NotificationType::Warning => "warning",
            NotificationType::Error => "error",
        };
        f.write_str(name)
    }
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub notification_type: NotificationType,
    pub message: String,
}

impl Notification {
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message)
    }
}

/// Ordered list of notifications gathered during a read.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a notification.
    pub fn notify(&mut self, message: impl Into<String>, notification_type: NotificationType) {
        self.items.push(Notification::new(notification_type, message));
    }

    pub fn push(&mut self, notification: Notification) {
        self.items.push(notification);
    }

    pub fn extend(&mut self, other: impl IntoIterator<Item = Notification>) {
        self.items.extend(other);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Count notifications of the given type.
    pub fn count_of(&self, notification_type: NotificationType) -> usize {
        self.items
            .iter()
            .filter(|n| n.notification_type == notification_type)
            .count()
    }
}

impl IntoIterator for NotificationCollection {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
