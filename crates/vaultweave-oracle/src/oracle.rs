//! The oracle seam.
//!
//! [`SemanticOracle`] takes a typed request and returns the matching typed
//! response. [`PromptOracle`] implements it on top of any text completion
//! backend by building prompts and parsing the replies.

use crate::prompt::{connection_prompt, gap_prompt};
use crate::response::{ConnectionJudgment, ContentGap, GapKind, parse_gaps, parse_judgment};
use vaultweave_core::{Error, Note, Result};

/// A question for the oracle
#[derive(Debug, Clone, Copy)]
pub enum OracleRequest<'a> {
    /// Should `source` and `target` be linked?
    Connection { source: &'a Note, target: &'a Note },
    /// Which notes is this set missing?
    Gaps { kind: GapKind, notes: &'a [Note] },
}

/// The oracle's answer, shaped after the request
#[derive(Debug, Clone, PartialEq)]
pub enum OracleResponse {
    Connection(ConnectionJudgment),
    Gaps(Vec<ContentGap>),
}

/// Judge of semantic relationships between notes
pub trait SemanticOracle {
    fn ask(&self, request: OracleRequest<'_>) -> Result<OracleResponse>;

    fn judge_connection(&self, source: &Note, target: &Note) -> Result<ConnectionJudgment> {
        match self.ask(OracleRequest::Connection { source, target })? {
            OracleResponse::Connection(judgment) => Ok(judgment),
            OracleResponse::Gaps(_) => Err(Error::oracle(
                "expected a connection judgment, got a gap list",
            )),
        }
    }

    fn find_gaps(&self, kind: GapKind, notes: &[Note]) -> Result<Vec<ContentGap>> {
        match self.ask(OracleRequest::Gaps { kind, notes })? {
            OracleResponse::Gaps(gaps) => Ok(gaps),
            OracleResponse::Connection(_) => Err(Error::oracle(
                "expected a gap list, got a connection judgment",
            )),
        }
    }
}

impl<O: SemanticOracle + ?Sized> SemanticOracle for &O {
    fn ask(&self, request: OracleRequest<'_>) -> Result<OracleResponse> {
        (**self).ask(request)
    }
}

/// Text-in, text-out model backend
pub trait Completion {
    fn complete(&self, prompt: &str) -> Result<String>;
}

impl<F> Completion for F
where
    F: Fn(&str) -> Result<String>,
{
    fn complete(&self, prompt: &str) -> Result<String> {
        self(prompt)
    }
}

/// Oracle that prompts a [`Completion`] backend and parses its replies
pub struct PromptOracle<C> {
    backend: C,
}

impl<C: Completion> PromptOracle<C> {
    pub fn new(backend: C) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &C {
        &self.backend
    }
}

impl<C: Completion> SemanticOracle for PromptOracle<C> {
    fn ask(&self, request: OracleRequest<'_>) -> Result<OracleResponse> {
        match request {
            OracleRequest::Connection { source, target } => {
                let reply = self.backend.complete(&connection_prompt(source, target))?;
                parse_judgment(&reply).map(OracleResponse::Connection)
            }
            OracleRequest::Gaps { kind, notes } => {
                let reply = self.backend.complete(&gap_prompt(kind, notes))?;
                parse_gaps(&reply, kind).map(OracleResponse::Gaps)
            }
        }
    }
}
