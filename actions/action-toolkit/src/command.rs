//! Workflow commands: `::name key=value,...::data` lines the runner parses
//! from stdout.

use std::fmt;

/// A single workflow command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowCommand<'a> {
    name: &'a str,
    properties: Vec<(&'a str, &'a str)>,
    message: &'a str,
}

impl<'a> WorkflowCommand<'a> {
    pub fn new(name: &'a str, message: &'a str) -> Self {
        Self {
            name,
            properties: Vec::new(),
            message,
        }
    }

    pub fn with_property(mut self, key: &'a str, value: &'a str) -> Self {
        self.properties.push((key, value));
        self
    }
}

impl fmt::Display for WorkflowCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "::{}", self.name)?;

        let mut properties = self.properties.iter().filter(|(_, v)| !v.is_empty());
        if let Some((key, value)) = properties.next() {
            write!(f, " {key}={}", escape_property(value))?;
            for (key, value) in properties {
                write!(f, ",{key}={}", escape_property(value))?;
            }
        }

        write!(f, "::{}", escape_data(self.message))
    }
}

/// Escapes command data so multi-line messages stay on one line.
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a property value, which additionally may not contain `:` or `,`.
pub fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
