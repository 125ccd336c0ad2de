/// Diagnostic sink handed to the parser. The parser never configures or
/// reads global logging state itself.
pub trait ParseLogger {
    fn debug(&self, stage: &'static str, message: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl ParseLogger for NoopLogger {
    fn debug(&self, _stage: &'static str, _message: &str) {}
}

/// Forwards parser diagnostics to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ParseLogger for TracingLogger {
    fn debug(&self, stage: &'static str, message: &str) {
        tracing::debug!(stage, "{message}");
    }
}
