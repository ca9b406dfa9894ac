//! Push notification kinds and their message templates.

/// Trigger of a push notification.
///
/// Wire format: kebab-case tag (`diet-comment`, `diet-reminder`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// A trainer commented on one of the trainee's diet entries.
    DietComment,
    /// A trainer nudged the trainee to log a diet entry.
    DietReminder,
}

/// Tag → kind → message. Every kind has exactly one entry.
const TEMPLATES: &[(&str, NotificationKind, &str)] = &[
    (
        "diet-comment",
        NotificationKind::DietComment,
        "Your trainer left a comment on your diet.",
    ),
    (
        "diet-reminder",
        NotificationKind::DietReminder,
        "Don't forget to log today's diet.",
    ),
];

impl NotificationKind {
    /// Resolve a wire tag. Returns `None` for unsupported tags.
    pub fn from_kebab_case(tag: &str) -> Option<Self> {
        TEMPLATES
            .iter()
            .find(|(t, _, _)| *t == tag)
            .map(|(_, kind, _)| *kind)
    }

    pub fn as_str(self) -> &'static str {
        self.entry().0
    }

    /// Push message body sent under the `message` data key.
    pub fn message(self) -> &'static str {
        self.entry().2
    }

    fn entry(self) -> &'static (&'static str, NotificationKind, &'static str) {
        match self {
            Self::DietComment => &TEMPLATES[0],
            Self::DietReminder => &TEMPLATES[1],
        }
    }
}
