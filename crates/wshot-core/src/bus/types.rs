use super::errors::BusError;

/// One synchronous session-bus method invocation.
///
/// Arguments are passed as strings; `gdbus` parses each one against the
/// method's expected signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusCall {
    dest: String,
    path: String,
    method: String,
    args: Vec<String>,
}

impl BusCall {
    pub fn new(dest: impl Into<String>, path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            dest: dest.into(),
            path: path.into(),
            method: method.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl ToString) -> Self {
        self.args.push(value.to_string());
        self
    }

    pub fn dest(&self) -> &str {
        &self.dest
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Seam between orchestration logic and the real session bus.
///
/// The production implementation is [`super::GdbusBus`]; tests use
/// [`super::MockBus`].
pub trait Bus {
    /// Invoke the call and return the raw reply text (GVariant-printed).
    fn call(&self, call: &BusCall) -> Result<String, BusError>;
}
