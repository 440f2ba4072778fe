use std::process::Command;

use serde_json::Value;

use crate::error::{Error, Result};

/// The site a request is scoped to.
///
/// `Local` leaves scoping to whatever ambient configuration the `wp` binary
/// resolves on its own; `Site` pins the request to one base URL. A context is
/// a request parameter, never stored state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteContext {
    Local,
    Site { url: String },
}

impl SiteContext {
    /// Build a site-scoped context. Trailing slashes are stripped so the URL
    /// can be appended to wp-cli flags verbatim.
    pub fn site(url: &str) -> Self {
        Self::Site {
            url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Local => None,
            Self::Site { url } => Some(url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Flag {
    Switch(String),
    Value(String, String),
}

/// One wp-cli operation: operation path, positional arguments, and flags.
///
/// The runner owns serialization into an argument vector, so call sites never
/// concatenate shell strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WpRequest {
    operation: Vec<String>,
    positional: Vec<String>,
    flags: Vec<Flag>,
    launch_isolated: bool,
}

impl WpRequest {
    pub fn new<I, S>(operation: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            operation: operation.into_iter().map(Into::into).collect(),
            positional: Vec::new(),
            flags: Vec::new(),
            launch_isolated: false,
        }
    }

    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positional.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn flag(mut self, name: &str, value: impl Into<String>) -> Self {
        self.flags.push(Flag::Value(name.to_string(), value.into()));
        self
    }

    pub fn switch(mut self, name: &str) -> Self {
        self.flags.push(Flag::Switch(name.to_string()));
        self
    }

    /// Mark the request as requiring a fresh execution context. State-mutating
    /// calls (batch deletions) and any remote-site call must not share process
    /// state with the invocation that listed their targets.
    pub fn isolated(mut self) -> Self {
        self.launch_isolated = true;
        self
    }

    pub fn launch_isolated(&self) -> bool {
        self.launch_isolated
    }

    /// Argument vector handed to the `wp` binary. `--url` is appended last
    /// when the context names a site.
    pub fn to_argv(&self, context: &SiteContext) -> Vec<String> {
        let mut argv = self.operation.clone();
        argv.extend(self.positional.iter().cloned());
        for flag in &self.flags {
            match flag {
                Flag::Switch(name) => argv.push(format!("--{name}")),
                Flag::Value(name, value) => argv.push(format!("--{name}={value}")),
            }
        }
        if let Some(url) = context.url() {
            argv.push(format!("--url={url}"));
        }
        argv
    }

    /// Human-readable rendering for diagnostics and error messages.
    pub fn render(&self, context: &SiteContext) -> String {
        let mut parts = vec!["wp".to_string()];
        parts.extend(self.to_argv(context));
        parts.join(" ")
    }
}

/// Executes wp-cli operations against a site context.
pub trait CommandRunner {
    /// Run one operation and return its raw stdout on success.
    fn run(&self, request: &WpRequest, context: &SiteContext) -> Result<String>;
}

/// Production runner that spawns the configured `wp` binary.
///
/// Every invocation is a fresh process, so isolated requests are trivially
/// honored; the marker still travels with the request so an embedded runner
/// could honor it differently.
#[derive(Debug, Clone)]
pub struct WpCliRunner {
    binary: String,
}

impl WpCliRunner {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl CommandRunner for WpCliRunner {
    fn run(&self, request: &WpRequest, context: &SiteContext) -> Result<String> {
        let argv = request.to_argv(context);
        let rendered = request.render(context);
        tracing::debug!(
            target: "haystack",
            command = %rendered,
            isolated = request.launch_isolated(),
            "running wp-cli"
        );

        let output = Command::new(&self.binary)
            .args(&argv)
            .output()
            .map_err(|err| Error::RemoteExecution {
                command: rendered.clone(),
                reason: err.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                trimmed => trimmed.to_string(),
            };
            return Err(Error::RemoteExecution {
                command: rendered,
                reason,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Decode a JSON array of identifiers or URLs.
///
/// wp-cli emits numbers for some ID fields and strings for others; both are
/// accepted and normalized to text, to be passed back unmodified.
pub fn decode_list(raw: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(raw.trim()).map_err(|err| Error::Decode {
        reason: err.to_string(),
    })?;
    let items = value.as_array().ok_or_else(|| Error::Decode {
        reason: format!("expected a JSON array, got {value}"),
    })?;
    items
        .iter()
        .map(|item| match item {
            Value::Number(number) => Ok(number.to_string()),
            Value::String(text) => Ok(text.clone()),
            other => Err(Error::Decode {
                reason: format!("expected an identifier, got {other}"),
            }),
        })
        .collect()
}
