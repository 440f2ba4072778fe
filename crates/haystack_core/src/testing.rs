use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::runner::{CommandRunner, SiteContext, WpRequest};

/// One request as the fake runner saw it.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub argv: Vec<String>,
    pub context: SiteContext,
    pub isolated: bool,
}

/// Test double that records every request and replays scripted responses in
/// order. When the script runs out it answers with an empty JSON array, which
/// is what a quiet wp-cli listing returns.
pub(crate) struct RecordingRunner {
    responses: RefCell<VecDeque<Result<String>>>,
    pub calls: RefCell<Vec<RecordedCall>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(VecDeque::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn push_ok(&self, raw: &str) {
        self.responses.borrow_mut().push_back(Ok(raw.to_string()));
    }

    pub fn push_err(&self, error: Error) {
        self.responses.borrow_mut().push_back(Err(error));
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, request: &WpRequest, context: &SiteContext) -> Result<String> {
        self.calls.borrow_mut().push(RecordedCall {
            argv: request.to_argv(context),
            context: context.clone(),
            isolated: request.launch_isolated(),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok("[]".to_string()))
    }
}
