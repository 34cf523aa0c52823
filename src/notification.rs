//! Read diagnostics.
//!
//! Structural recoveries (skipped sections, skipped entity kinds, dangling
//! handles, unknown version tokens) do not abort a read. They are collected
//! as [`Notification`]s on [`Drawing::notifications`](crate::Drawing) so a
//! caller can tell a clean read from a lenient one.

use std::fmt;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// A feature of the file is recognized but not handled.
    NotImplemented,
    /// A record kind this crate does not model was skipped.
    NotSupported,
    /// Lenient handling kicked in (default version, unresolved handle, duplicate name).
    Warning,
    /// A record was dropped because it could not be interpreted.
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotImplemented => write!(f, "NotImplemented"),
            Self::NotSupported => write!(f, "NotSupported"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// A single notification produced while reading.
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

/// Ordered list of notifications.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.items.push(Notification::new(notification_type, message));
    }

    pub fn push(&mut self, notification: Notification) {
        self.items.push(notification);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// All notifications of one type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_basics() {
        let mut c = NotificationCollection::new();
        assert!(c.is_empty());

        c.notify(NotificationType::NotSupported, "section THUMBNAILIMAGE");
        c.notify(NotificationType::Warning, "handle 1F not found");
        c.notify(NotificationType::NotSupported, "entity HATCH");

        assert_eq!(c.len(), 3);
        assert_eq!(c.of_type(NotificationType::NotSupported).len(), 2);
        assert!(c.has_type(NotificationType::Warning));
    }

    #[test]
    fn test_display() {
        let n = Notification::new(NotificationType::Warning, "unknown version token 'AC9999'");
        assert_eq!(format!("{}", n), "[Warning] unknown version token 'AC9999'");
    }
}
