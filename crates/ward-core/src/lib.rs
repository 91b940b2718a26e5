//! ward-core: Invocation requests, the policy rule battery, and project root discovery.

pub mod gate;
pub mod project;
pub mod request;
pub mod rules;

pub use gate::{evaluate, BlockReason, Verdict, BLOCK_EXIT_CODE};
pub use project::{find_project_root, project_root_override, ProjectRootError};
pub use request::{InvocationRequest, PATH_TOOLS, SHELL_TOOL};
pub use rules::{normalize_command, references_env_file, CommandRule, RuleCategory};
