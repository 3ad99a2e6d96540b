//! Network-layer request interception verdicts.

/// Status returned for hard-blocked requests.
pub const BLOCKED_STATUS: u16 = 403;

/// Who issued the intercepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOrigin {
    Page,
    ServiceWorker,
}

impl std::fmt::Display for RequestOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestOrigin::Page => write!(f, "page"),
            RequestOrigin::ServiceWorker => write!(f, "service-worker"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptVerdict {
    /// Let the request through untouched.
    Allow,
    /// Short-circuit with an empty `text/plain` body.
    Block { status: u16, reason: &'static str },
}

impl InterceptVerdict {
    pub fn blocked() -> Self {
        InterceptVerdict::Block {
            status: BLOCKED_STATUS,
            reason: "Blocked",
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, InterceptVerdict::Block { .. })
    }
}
