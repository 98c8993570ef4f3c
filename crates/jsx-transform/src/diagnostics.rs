//! Collecting the errors swc passes report through `HANDLER`.

use std::sync::{Arc, Mutex, PoisonError};
use swc_common::errors::{DiagnosticBuilder, Emitter, Handler, Level};

/// One error-level message and the span it points at.
#[derive(Debug, Clone)]
pub(crate) struct Reported {
    pub message: String,
    pub span: Option<swc_common::Span>,
}

/// Shared sink the handler's emitter appends to.
#[derive(Debug, Clone, Default)]
pub(crate) struct Reports(Arc<Mutex<Vec<Reported>>>);

impl Reports {
    pub fn handler(&self) -> Handler {
        Handler::with_emitter(false, false, Box::new(self.clone()))
    }

    pub fn first(&self) -> Option<Reported> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .first()
            .cloned()
    }
}

impl Emitter for Reports {
    fn emit(&mut self, db: &mut DiagnosticBuilder<'_>) {
        if !matches!(db.level, Level::Bug | Level::Fatal | Level::PhaseFatal | Level::Error) {
            return;
        }
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Reported {
                message: db.message(),
                span: db.span.primary_span(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_common::errors::HANDLER;
    use swc_common::DUMMY_SP;

    #[test]
    fn test_keeps_errors_and_drops_warnings() {
        let reports = Reports::default();
        let handler = reports.handler();
        HANDLER.set(&handler, || {
            HANDLER.with(|handler| {
                handler.struct_span_warn(DUMMY_SP, "just a warning").emit();
                handler.struct_span_err(DUMMY_SP, "real problem").emit();
            });
        });

        let first = reports.first().unwrap();
        assert_eq!(first.message, "real problem");
        assert_eq!(first.span, Some(DUMMY_SP));
    }
}
