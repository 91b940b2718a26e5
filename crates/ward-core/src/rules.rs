//! The classifier rule battery.
//!
//! Rules are process-wide static configuration: named regex matchers in
//! fixed-order lists, compiled once and evaluated first-match-wins. The
//! lists are data rather than scattered conditionals so individual rules
//! stay independently testable.

use once_cell::sync::Lazy;
use regex::Regex;

/// Category tag for a classifier rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Recursive deletion aimed at an unbounded or ambiguous target.
    DestructiveDelete,
    /// Access to files holding secrets (`.env` and friends).
    SensitiveFile,
}

impl RuleCategory {
    /// Kebab-case label used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCategory::DestructiveDelete => "destructive-delete",
            RuleCategory::SensitiveFile => "sensitive-file",
        }
    }
}

/// A single named matcher over a prepared command string.
#[derive(Debug)]
pub struct CommandRule {
    /// Stable rule name, reported in verdicts and logs.
    pub name: &'static str,
    /// Category this rule detects.
    pub category: RuleCategory,
    /// Compiled pattern.
    pub pattern: Regex,
}

impl CommandRule {
    fn new(name: &'static str, category: RuleCategory, pattern: &str) -> Self {
        Self {
            name,
            category,
            pattern: Regex::new(pattern).expect("rule pattern must compile"),
        }
    }
}

/// Lowercase a command and collapse whitespace runs to single spaces.
pub fn normalize_command(command: &str) -> String {
    command
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shapes of `rm` combined with recursive+force flags, in either order,
/// long-form or short-form, tolerant of interleaved letters in the flag
/// cluster. Tested against the normalized command.
pub static RECURSIVE_FORCE_RULES: Lazy<Vec<CommandRule>> = Lazy::new(|| {
    vec![
        CommandRule::new(
            "rm-flags-rf",
            RuleCategory::DestructiveDelete,
            r"\brm\s+.*-[a-z]*r[a-z]*f",
        ),
        CommandRule::new(
            "rm-flags-fr",
            RuleCategory::DestructiveDelete,
            r"\brm\s+.*-[a-z]*f[a-z]*r",
        ),
        CommandRule::new(
            "rm-long-recursive-force",
            RuleCategory::DestructiveDelete,
            r"\brm\s+--recursive\s+--force",
        ),
        CommandRule::new(
            "rm-long-force-recursive",
            RuleCategory::DestructiveDelete,
            r"\brm\s+--force\s+--recursive",
        ),
        CommandRule::new(
            "rm-split-r-then-f",
            RuleCategory::DestructiveDelete,
            r"\brm\s+-r\s+.*-f",
        ),
        CommandRule::new(
            "rm-split-f-then-r",
            RuleCategory::DestructiveDelete,
            r"\brm\s+-f\s+.*-r",
        ),
    ]
});

/// `rm` carrying some recursive flag, short or long form.
pub static RM_RECURSIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\brm\s+.*-[a-z]*r").expect("rule pattern must compile"));

/// Risky-target signals for a recursively deleting command.
///
/// The root signal matches `/` as a standalone token only, so a bounded
/// relative path like `build/output` is not flagged. The bare-dot signal
/// is deliberately over-broad: any `.` in the command matches.
pub static DANGEROUS_TARGET_RULES: Lazy<Vec<CommandRule>> = Lazy::new(|| {
    vec![
        CommandRule::new(
            "target-root",
            RuleCategory::DestructiveDelete,
            r"(^|\s)/(\s|$)",
        ),
        CommandRule::new("target-root-glob", RuleCategory::DestructiveDelete, r"/\*"),
        CommandRule::new("target-home", RuleCategory::DestructiveDelete, r"~"),
        CommandRule::new("target-home-path", RuleCategory::DestructiveDelete, r"~/"),
        CommandRule::new(
            "target-home-var",
            RuleCategory::DestructiveDelete,
            r"\$home",
        ),
        CommandRule::new(
            "target-parent-dir",
            RuleCategory::DestructiveDelete,
            r"\.\.",
        ),
        CommandRule::new("target-wildcard", RuleCategory::DestructiveDelete, r"\*"),
        CommandRule::new("target-current-dir", RuleCategory::DestructiveDelete, r"\."),
        CommandRule::new(
            "target-trailing-dot",
            RuleCategory::DestructiveDelete,
            r"\.\s*$",
        ),
    ]
});

/// Shell idioms that reach `.env` files: bare mention plus `cat`, `echo`
/// redirection, `touch`, `cp`, and `mv` forms. A rule only fires when the
/// command also mentions `.env` without the exempt `.sample` suffix (see
/// [`references_env_file`]). Tested against the raw command.
pub static ENV_COMMAND_RULES: Lazy<Vec<CommandRule>> = Lazy::new(|| {
    vec![
        CommandRule::new("env-bare", RuleCategory::SensitiveFile, r"\.env"),
        CommandRule::new("env-cat", RuleCategory::SensitiveFile, r"\bcat\s+.*\.env"),
        CommandRule::new(
            "env-echo-redirect",
            RuleCategory::SensitiveFile,
            r"\becho\s+.*>\s*\.env",
        ),
        CommandRule::new(
            "env-touch",
            RuleCategory::SensitiveFile,
            r"\btouch\s+.*\.env",
        ),
        CommandRule::new("env-cp", RuleCategory::SensitiveFile, r"\bcp\s+.*\.env"),
        CommandRule::new("env-mv", RuleCategory::SensitiveFile, r"\bmv\s+.*\.env"),
    ]
});

// `.env` occurrences with the exempt suffix captured; the engine has no
// lookaround, so the filter happens on the capture group.
static ENV_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.env(\.sample)?\b").expect("rule pattern must compile"));

/// True when `text` mentions `.env` as a whole word that is not
/// immediately followed by `.sample`.
pub fn references_env_file(text: &str) -> bool {
    ENV_TOKEN
        .captures_iter(text)
        .any(|captures| captures.get(1).is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_rule(command: &str) -> Option<&'static str> {
        let normalized = normalize_command(command);
        DANGEROUS_TARGET_RULES
            .iter()
            .find(|rule| rule.pattern.is_match(&normalized))
            .map(|rule| rule.name)
    }

    fn matches_force_shape(command: &str) -> bool {
        let normalized = normalize_command(command);
        RECURSIVE_FORCE_RULES
            .iter()
            .any(|rule| rule.pattern.is_match(&normalized))
    }

    #[test]
    fn test_normalize_command() {
        assert_eq!(normalize_command("RM   -RF\t/tmp"), "rm -rf /tmp");
        assert_eq!(normalize_command("  ls  -la  "), "ls -la");
    }

    #[test]
    fn test_recursive_force_shapes() {
        assert!(matches_force_shape("rm -rf target"));
        assert!(matches_force_shape("rm -fr target"));
        assert!(matches_force_shape("rm -Rf target"));
        assert!(matches_force_shape("rm -rvf target"));
        assert!(matches_force_shape("rm --recursive --force target"));
        assert!(matches_force_shape("rm --force --recursive target"));
        assert!(matches_force_shape("rm -r target -f"));
        assert!(matches_force_shape("rm -f target -r"));
        assert!(!matches_force_shape("rm target"));
        assert!(!matches_force_shape("rm -f target"));
        assert!(!matches_force_shape("firm -rf target"));
    }

    #[test]
    fn test_rm_recursive_gate() {
        assert!(RM_RECURSIVE.is_match(&normalize_command("rm -r target")));
        assert!(RM_RECURSIVE.is_match(&normalize_command("rm --recursive target")));
        assert!(!RM_RECURSIVE.is_match(&normalize_command("rm target")));
    }

    #[test]
    fn test_root_is_standalone_token_only() {
        assert_eq!(target_rule("rm -rf /"), Some("target-root"));
        assert_eq!(target_rule("rm -rf / now"), Some("target-root"));
        assert_eq!(target_rule("rm -rf build/output"), None);
    }

    #[test]
    fn test_target_signals() {
        assert_eq!(target_rule("rm -rf /*"), Some("target-root-glob"));
        assert_eq!(target_rule("rm -rf ~"), Some("target-home"));
        assert_eq!(target_rule("rm -rf ~/projects"), Some("target-home"));
        assert_eq!(target_rule("rm -rf $HOME"), Some("target-home-var"));
        assert_eq!(target_rule("rm -rf ../other"), Some("target-parent-dir"));
        assert_eq!(target_rule("rm -rf *"), Some("target-wildcard"));
        assert_eq!(target_rule("rm -rf ."), Some("target-current-dir"));
        assert_eq!(target_rule("rm -rf build"), None);
    }

    #[test]
    fn test_bare_dot_is_over_broad() {
        // Known heuristic: any dot in the command counts as a signal.
        assert_eq!(target_rule("rm -rf build.tmp"), Some("target-current-dir"));
    }

    #[test]
    fn test_references_env_file() {
        assert!(references_env_file("cat .env"));
        assert!(references_env_file("cat config/.env"));
        assert!(references_env_file("grep KEY .env.local"));
        assert!(references_env_file("cp .env.sample .env"));
        assert!(!references_env_file("cat .env.sample"));
        assert!(!references_env_file("ls environment"));
        assert!(!references_env_file("cat .envrc.sample"));
        assert!(!references_env_file("echo done"));
    }

    #[test]
    fn test_env_command_rules_first_match() {
        let command = "cat .env";
        let matched = ENV_COMMAND_RULES
            .iter()
            .find(|rule| rule.pattern.is_match(command) && references_env_file(command))
            .map(|rule| rule.name);
        assert_eq!(matched, Some("env-bare"));
    }

    #[test]
    fn test_env_command_rules_individual_patterns() {
        let cases = [
            ("env-cat", "cat secrets/.env"),
            ("env-echo-redirect", "echo KEY=1 > .env"),
            ("env-touch", "touch .env"),
            ("env-cp", "cp .env /tmp/"),
            ("env-mv", "mv .env backup"),
        ];
        for (name, command) in cases {
            let rule = ENV_COMMAND_RULES
                .iter()
                .find(|rule| rule.name == name)
                .unwrap();
            assert!(rule.pattern.is_match(command), "{name} should match");
            assert!(references_env_file(command), "{name} case references .env");
        }
    }

    #[test]
    fn test_rule_categories() {
        for rule in RECURSIVE_FORCE_RULES.iter() {
            assert_eq!(rule.category, RuleCategory::DestructiveDelete);
        }
        for rule in ENV_COMMAND_RULES.iter() {
            assert_eq!(rule.category, RuleCategory::SensitiveFile);
        }
        assert_eq!(RuleCategory::SensitiveFile.as_str(), "sensitive-file");
    }
}
