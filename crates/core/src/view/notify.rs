use chrono::{DateTime, Duration, Utc};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME_MS: i64 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "fa-check-circle",
            ToastKind::Error => "fa-exclamation-circle",
            ToastKind::Warning => "fa-exclamation-triangle",
            ToastKind::Info => "fa-info-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct Notifier {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl Notifier {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.push_at(kind, message, Utc::now())
    }

    pub fn push_at(
        &mut self,
        kind: ToastKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> u64 {
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            kind,
            message: message.into(),
            created_at: now,
        });
        self.next_id
    }

    /// Drops toasts that have been shown for their full lifetime.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        let lifetime = Duration::milliseconds(TOAST_LIFETIME_MS);
        self.toasts.retain(|t| now - t.created_at < lifetime);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn messages(&self, kind: ToastKind) -> Vec<&str> {
        self.toasts
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.message.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn toasts_expire_after_lifetime() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 27, 10, 0, 0).unwrap();
        let mut notifier = Notifier::default();
        notifier.push_at(ToastKind::Info, "Refreshing data...", t0);
        notifier.push_at(
            ToastKind::Success,
            "Data refreshed successfully",
            t0 + Duration::milliseconds(2_000),
        );

        notifier.prune(t0 + Duration::milliseconds(2_999));
        assert_eq!(notifier.toasts().len(), 2);

        notifier.prune(t0 + Duration::milliseconds(3_000));
        assert_eq!(notifier.messages(ToastKind::Success), vec!["Data refreshed successfully"]);
        assert!(notifier.messages(ToastKind::Info).is_empty());
    }

    #[test]
    fn ids_increase() {
        let mut notifier = Notifier::default();
        let a = notifier.push(ToastKind::Error, "a");
        let b = notifier.push(ToastKind::Error, "b");
        assert!(b > a);
    }
}
