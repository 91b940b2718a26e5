//! Verdict evaluation for one invocation request.
//!
//! Evaluation order is fixed: sensitive-file access is checked before
//! destructive-command detection, and the first rule that matches decides
//! the verdict. The library only maps well-formed requests to verdicts;
//! the fail-open handling of malformed or absent input lives at the
//! process boundary in `ward-cli`, a deliberate availability-over-security
//! tradeoff (see DESIGN.md).

use crate::request::InvocationRequest;
use crate::rules::{
    normalize_command, references_env_file, RuleCategory, DANGEROUS_TARGET_RULES,
    ENV_COMMAND_RULES, RECURSIVE_FORCE_RULES, RM_RECURSIVE,
};

/// Exit status the gate process uses to signal a blocked tool call.
pub const BLOCK_EXIT_CODE: i32 = 2;

const ENV_BLOCK_MESSAGE: &str =
    "BLOCKED: Access to .env files containing sensitive data is prohibited";
const ENV_BLOCK_HINT: &str = "Use .env.sample for template files instead";

const RM_BLOCK_MESSAGE: &str = "BLOCKED: Dangerous rm command detected and prevented";
const RM_BLOCK_HINT: &str =
    "Use ward-archive instead to move files into .deleted/ where they can be recovered";

/// Outcome of evaluating one invocation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Let the tool call proceed.
    Allow,
    /// Stop the tool call before it executes.
    Block(BlockReason),
}

/// Why a request was blocked, with the rationale surfaced to the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReason {
    /// Category of the rule that matched.
    pub category: RuleCategory,
    /// Name of the first rule that matched.
    pub rule: &'static str,
    /// First rationale line.
    pub message: &'static str,
    /// Second rationale line, naming the safe alternative.
    pub hint: &'static str,
}

/// Evaluate a request against the full rule battery.
pub fn evaluate(request: &InvocationRequest) -> Verdict {
    if let Some(rule) = sensitive_file_rule(request) {
        tracing::debug!(rule, "sensitive file rule matched");
        return Verdict::Block(BlockReason {
            category: RuleCategory::SensitiveFile,
            rule,
            message: ENV_BLOCK_MESSAGE,
            hint: ENV_BLOCK_HINT,
        });
    }

    if request.is_shell_tool() {
        if let Some(rule) = destructive_delete_rule(request.command().unwrap_or("")) {
            tracing::debug!(rule, "destructive delete rule matched");
            return Verdict::Block(BlockReason {
                category: RuleCategory::DestructiveDelete,
                rule,
                message: RM_BLOCK_MESSAGE,
                hint: RM_BLOCK_HINT,
            });
        }
    }

    Verdict::Allow
}

/// Name of the first sensitive-file rule this request trips, if any.
///
/// Path-bearing tools are checked on their `file_path`; shell execution is
/// scanned for `.env` access idioms. The `.env.sample` template suffix is
/// always exempt.
pub fn sensitive_file_rule(request: &InvocationRequest) -> Option<&'static str> {
    if request.is_path_tool() {
        let path = request.file_path().unwrap_or("");
        if path.contains(".env") && !path.ends_with(".env.sample") {
            return Some("env-file-path");
        }
    } else if request.is_shell_tool() {
        let command = request.command().unwrap_or("");
        return ENV_COMMAND_RULES
            .iter()
            .find(|rule| rule.pattern.is_match(command) && references_env_file(command))
            .map(|rule| rule.name);
    }
    None
}

/// Name of the dangerous-target rule a recursively deleting command
/// trips, if any.
///
/// A recursive-force flag cluster alone is not destructive; the verdict
/// requires the combination of a recursive deletion shape with an
/// unbounded or ambiguous target.
pub fn destructive_delete_rule(command: &str) -> Option<&'static str> {
    let normalized = normalize_command(command);

    let recursive_shape = RECURSIVE_FORCE_RULES
        .iter()
        .any(|rule| rule.pattern.is_match(&normalized))
        || RM_RECURSIVE.is_match(&normalized);
    if !recursive_shape {
        return None;
    }

    DANGEROUS_TARGET_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(&normalized))
        .map(|rule| rule.name)
}
