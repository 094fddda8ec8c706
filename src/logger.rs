//! Logger capability
//!
//! A thin handle over a `tracing::Span`. The store never installs a
//! subscriber; it only records events inside the span it was given, so the
//! host decides where (and whether) they end up.

use tracing::span::Entered;
use tracing::Span;

/// Named, scoped logger handed to a store by its host
#[derive(Debug, Clone)]
pub struct Logger {
    span: Span,
}

impl Logger {
    /// Create a root logger for a component
    pub fn new(name: &str) -> Self {
        Self {
            span: tracing::info_span!("component", name = %name),
        }
    }

    /// Logger that attaches no span
    ///
    /// Events are still emitted to whatever subscriber is active, just
    /// without a component scope.
    pub fn disabled() -> Self {
        Self { span: Span::none() }
    }

    /// Derive a named sub-logger nested under this one
    pub fn named(&self, name: &str) -> Self {
        Self {
            span: tracing::info_span!(parent: &self.span, "component", name = %name),
        }
    }

    /// Enter the logger's span for the lifetime of the returned guard
    pub fn enter(&self) -> Entered<'_> {
        self.span.enter()
    }

    /// Whether this logger carries a span
    pub fn is_disabled(&self) -> bool {
        self.span.is_none()
    }

    /// Underlying span
    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::disabled()
    }
}
