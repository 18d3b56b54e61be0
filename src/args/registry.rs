//! Flag registry: the single source of truth for which flags belong to whom.
//!
//! The registry is built once at startup and read-only afterwards. It can be
//! shared across threads behind an `Arc` without locking.

use std::collections::HashMap;

/// Broad purpose of a flag, used for help grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagCategory {
    Configuration,
    Behavior,
    Output,
    Auth,
    Network,
    Help,
}

impl FlagCategory {
    /// Order in which categories are listed in help output.
    pub const ALL: [FlagCategory; 6] = [
        FlagCategory::Configuration,
        FlagCategory::Behavior,
        FlagCategory::Output,
        FlagCategory::Auth,
        FlagCategory::Network,
        FlagCategory::Help,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FlagCategory::Configuration => "Configuration",
            FlagCategory::Behavior => "Behavior",
            FlagCategory::Output => "Output",
            FlagCategory::Auth => "Authentication",
            FlagCategory::Network => "Network",
            FlagCategory::Help => "Help",
        }
    }
}

/// Which vocabulary a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagClass {
    /// Consumed by ccenv, never forwarded.
    Wrapper,
    /// Known flag of the forwarded command.
    Forwarded,
    /// In neither vocabulary. Always forwarded.
    Unknown,
}

/// A single flag definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagInfo {
    /// Canonical long form (e.g. "--env").
    pub name: String,
    /// Does it consume the following token as its value?
    pub takes_value: bool,
    pub category: FlagCategory,
    /// Human-readable description (for help text and warnings).
    pub description: String,
}

impl FlagInfo {
    pub fn new(
        name: impl Into<String>,
        takes_value: bool,
        category: FlagCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            takes_value,
            category,
            description: description.into(),
        }
    }
}

/// Short form → canonical long form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagAlias {
    pub short: String,
    pub canonical: String,
}

/// How a flag present in both vocabularies is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    /// ccenv consumes the flag.
    WrapperTakesPrecedence,
    /// ccenv's own variant lives under another name; this one is forwarded.
    Rename,
    /// Ambiguous. The core never prompts, so the flag is forwarded with a warning.
    AskUser,
}

/// Resolution policy for one conflicting flag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRule {
    pub flag: String,
    pub resolution: ConflictResolution,
    pub message: String,
}

/// Lookup tables for wrapper flags, forwarded flags, aliases and conflicts.
#[derive(Debug, Clone, Default)]
pub struct FlagRegistry {
    wrapper: HashMap<String, FlagInfo>,
    forwarded: HashMap<String, FlagInfo>,
    aliases: HashMap<String, String>,
    conflicts: HashMap<String, ConflictRule>,
}

impl FlagRegistry {
    /// Empty registry. Everything classifies as `Unknown`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a wrapper flag keyed by its canonical name.
    pub fn register_wrapper_flag(&mut self, info: FlagInfo) {
        self.wrapper.insert(info.name.clone(), info);
    }

    /// Insert or overwrite a forwarded-command flag keyed by its canonical name.
    pub fn register_forwarded_flag(&mut self, info: FlagInfo) {
        self.forwarded.insert(info.name.clone(), info);
    }

    pub fn register_alias(&mut self, alias: FlagAlias) {
        self.aliases.insert(alias.short, alias.canonical);
    }

    /// At most one rule per flag name; a later rule replaces an earlier one.
    pub fn register_conflict(&mut self, rule: ConflictRule) {
        self.conflicts.insert(rule.flag.clone(), rule);
    }

    /// Builder-style variants of the `register_*` methods.
    pub fn with_wrapper_flag(mut self, info: FlagInfo) -> Self {
        self.register_wrapper_flag(info);
        self
    }

    pub fn with_forwarded_flag(mut self, info: FlagInfo) -> Self {
        self.register_forwarded_flag(info);
        self
    }

    pub fn with_alias(mut self, short: &str, canonical: &str) -> Self {
        self.register_alias(FlagAlias {
            short: short.to_string(),
            canonical: canonical.to_string(),
        });
        self
    }

    pub fn with_conflict(
        mut self,
        flag: &str,
        resolution: ConflictResolution,
        message: &str,
    ) -> Self {
        self.register_conflict(ConflictRule {
            flag: flag.to_string(),
            resolution,
            message: message.to_string(),
        });
        self
    }

    /// Resolve a known alias to its canonical name; anything else is returned as is.
    pub fn normalize<'a>(&'a self, token: &'a str) -> &'a str {
        self.aliases.get(token).map(String::as_str).unwrap_or(token)
    }

    /// Classify a token. Tokens in neither vocabulary are `Unknown`, which
    /// callers must treat as forwarded.
    pub fn classify(&self, token: &str) -> FlagClass {
        let name = self.normalize(token);

        if let Some(rule) = self.conflicts.get(name) {
            return match rule.resolution {
                ConflictResolution::WrapperTakesPrecedence => FlagClass::Wrapper,
                ConflictResolution::Rename | ConflictResolution::AskUser => FlagClass::Forwarded,
            };
        }

        if self.wrapper.contains_key(name) {
            FlagClass::Wrapper
        } else if self.forwarded.contains_key(name) {
            FlagClass::Forwarded
        } else {
            FlagClass::Unknown
        }
    }

    /// Whether the flag consumes the next token. Unknown tokens never do, so
    /// a positional meant for the forwarded command is never swallowed.
    pub fn takes_value(&self, token: &str) -> bool {
        self.lookup(token).is_some_and(|info| info.takes_value)
    }

    /// Definition for a token after alias normalization, honoring conflict
    /// resolution for names present in both vocabularies.
    pub fn lookup(&self, token: &str) -> Option<&FlagInfo> {
        let name = self.normalize(token);
        match self.classify(token) {
            FlagClass::Wrapper => self.wrapper.get(name),
            FlagClass::Forwarded => self.forwarded.get(name),
            FlagClass::Unknown => None,
        }
    }

    pub fn conflict_for(&self, token: &str) -> Option<&ConflictRule> {
        self.conflicts.get(self.normalize(token))
    }

    pub fn is_help(&self, token: &str) -> bool {
        self.normalize(token) == HELP_FLAG && self.wrapper.contains_key(HELP_FLAG)
    }

    pub fn is_version(&self, token: &str) -> bool {
        self.normalize(token) == VERSION_FLAG && self.wrapper.contains_key(VERSION_FLAG)
    }

    /// Wrapper flags sorted by name, for help output.
    pub fn wrapper_flags(&self) -> Vec<&FlagInfo> {
        let mut flags: Vec<_> = self.wrapper.values().collect();
        flags.sort_by(|a, b| a.name.cmp(&b.name));
        flags
    }

    /// Short forms registered for a canonical name, sorted.
    pub fn aliases_for(&self, canonical: &str) -> Vec<&str> {
        let mut shorts: Vec<&str> = self
            .aliases
            .iter()
            .filter(|(_, target)| target.as_str() == canonical)
            .map(|(short, _)| short.as_str())
            .collect();
        shorts.sort_unstable();
        shorts
    }
}

pub const HELP_FLAG: &str = "--help";
pub const VERSION_FLAG: &str = "--version";
pub const ENV_FLAG: &str = "--env";
pub const NO_INTERACTIVE_FLAG: &str = "--no-interactive";
pub const DRY_RUN_FLAG: &str = "--dry-run";
pub const WRAPPER_DEBUG_FLAG: &str = "--wrapper-debug";

/// Build the default registry: ccenv's own flags plus the claude flags we know.
pub fn flag_registry() -> FlagRegistry {
    use FlagCategory::*;

    FlagRegistry::new()
        // === Wrapper flags ===
        .with_wrapper_flag(FlagInfo::new(
            ENV_FLAG,
            true,
            Configuration,
            "Environment to use for this invocation",
        ))
        .with_alias("-e", ENV_FLAG)
        .with_wrapper_flag(FlagInfo::new(
            NO_INTERACTIVE_FLAG,
            false,
            Behavior,
            "Never prompt; fail if no environment can be resolved",
        ))
        .with_wrapper_flag(FlagInfo::new(
            DRY_RUN_FLAG,
            false,
            Output,
            "Print the delegation plan instead of running claude",
        ))
        .with_wrapper_flag(FlagInfo::new(
            WRAPPER_DEBUG_FLAG,
            false,
            Output,
            "Enable debug logging for ccenv itself",
        ))
        .with_wrapper_flag(FlagInfo::new(
            HELP_FLAG,
            false,
            Help,
            "Show ccenv and claude help",
        ))
        .with_alias("-h", HELP_FLAG)
        .with_wrapper_flag(FlagInfo::new(
            VERSION_FLAG,
            false,
            Help,
            "Show ccenv version",
        ))
        .with_alias("-v", VERSION_FLAG)
        // === Forwarded (claude) flags ===
        .with_forwarded_flag(FlagInfo::new("--print", false, Output, "Print response and exit"))
        .with_alias("-p", "--print")
        .with_forwarded_flag(FlagInfo::new(
            "--continue",
            false,
            Behavior,
            "Continue the most recent conversation",
        ))
        .with_alias("-c", "--continue")
        .with_forwarded_flag(FlagInfo::new("--model", true, Configuration, "Model override"))
        .with_forwarded_flag(FlagInfo::new(
            "--output-format",
            true,
            Output,
            "Output format for print mode",
        ))
        .with_forwarded_flag(FlagInfo::new(
            "--input-format",
            true,
            Configuration,
            "Input format for print mode",
        ))
        .with_forwarded_flag(FlagInfo::new(
            "--resume",
            true,
            Behavior,
            "Resume a conversation by session ID",
        ))
        .with_forwarded_flag(FlagInfo::new(
            "--session-id",
            true,
            Behavior,
            "Use a specific session ID",
        ))
        .with_forwarded_flag(FlagInfo::new(
            "--settings",
            true,
            Configuration,
            "Settings file or JSON",
        ))
        .with_forwarded_flag(FlagInfo::new(
            "--allowedTools",
            true,
            Auth,
            "Tools allowed without prompting",
        ))
        .with_forwarded_flag(FlagInfo::new(
            "--disallowedTools",
            true,
            Auth,
            "Tools denied outright",
        ))
        .with_forwarded_flag(FlagInfo::new(
            "--permission-mode",
            true,
            Auth,
            "Permission mode for the session",
        ))
        .with_forwarded_flag(FlagInfo::new(
            "--append-system-prompt",
            true,
            Behavior,
            "Append to the system prompt",
        ))
        .with_forwarded_flag(FlagInfo::new(
            "--add-dir",
            true,
            Configuration,
            "Additional directory to allow tool access to",
        ))
        .with_forwarded_flag(FlagInfo::new("--verbose", false, Output, "Verbose output"))
        .with_forwarded_flag(FlagInfo::new("--debug", false, Output, "Debug mode"))
        .with_forwarded_flag(FlagInfo::new(
            "--dangerously-skip-permissions",
            false,
            Auth,
            "Skip permission prompts",
        ))
        // === Conflicts ===
        .with_conflict(
            HELP_FLAG,
            ConflictResolution::WrapperTakesPrecedence,
            "--help shows ccenv help followed by claude help",
        )
        .with_conflict(
            VERSION_FLAG,
            ConflictResolution::WrapperTakesPrecedence,
            "--version reports the ccenv version",
        )
        .with_conflict(
            "--debug",
            ConflictResolution::Rename,
            "--debug is forwarded to claude; use --wrapper-debug for ccenv diagnostics",
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_resolves_aliases_and_passes_unknown_through() {
        let registry = flag_registry();
        assert_eq!(registry.normalize("-e"), "--env");
        assert_eq!(registry.normalize("-p"), "--print");
        assert_eq!(registry.normalize("-r"), "-r");
        assert_eq!(registry.normalize(""), "");
    }

    #[test]
    fn classify_by_vocabulary() {
        let registry = flag_registry();
        assert_eq!(registry.classify("--env"), FlagClass::Wrapper);
        assert_eq!(registry.classify("-e"), FlagClass::Wrapper);
        assert_eq!(registry.classify("--model"), FlagClass::Forwarded);
        assert_eq!(registry.classify("--brand-new-flag"), FlagClass::Unknown);
        assert_eq!(registry.classify(""), FlagClass::Unknown);
        assert_eq!(registry.classify("hello"), FlagClass::Unknown);
    }

    #[test]
    fn unknown_tokens_take_no_value() {
        let registry = flag_registry();
        assert!(!registry.takes_value("-r"));
        assert!(!registry.takes_value("--something-new"));
        assert!(registry.takes_value("--model"));
        assert!(registry.takes_value("-e"));
        assert!(!registry.takes_value("--dry-run"));
    }

    #[test]
    fn reregistering_overwrites() {
        let mut registry = FlagRegistry::new();
        registry.register_forwarded_flag(FlagInfo::new("--x", false, FlagCategory::Behavior, "a"));
        registry.register_forwarded_flag(FlagInfo::new("--x", true, FlagCategory::Behavior, "b"));
        assert!(registry.takes_value("--x"));
        assert_eq!(registry.lookup("--x").map(|f| f.description.as_str()), Some("b"));
    }

    #[test]
    fn conflict_resolution_drives_classification() {
        let registry = flag_registry();
        assert_eq!(registry.classify("--debug"), FlagClass::Forwarded);
        assert_eq!(
            registry.conflict_for("--debug").map(|r| r.resolution),
            Some(ConflictResolution::Rename)
        );
        assert_eq!(registry.classify("-h"), FlagClass::Wrapper);
        assert!(registry.conflict_for("--model").is_none());
    }

    #[test]
    fn ask_user_conflict_is_forwarded() {
        let registry = FlagRegistry::new()
            .with_wrapper_flag(FlagInfo::new("--profile", true, FlagCategory::Configuration, "ccenv"))
            .with_forwarded_flag(FlagInfo::new("--profile", false, FlagCategory::Behavior, "claude"))
            .with_conflict("--profile", ConflictResolution::AskUser, "--profile is ambiguous");

        assert_eq!(registry.classify("--profile"), FlagClass::Forwarded);
        // The forwarded definition decides arity.
        assert!(!registry.takes_value("--profile"));
        assert_eq!(
            registry.lookup("--profile").map(|f| f.description.as_str()),
            Some("claude")
        );
    }

    #[test]
    fn one_rule_per_flag() {
        let registry = FlagRegistry::new()
            .with_conflict("--x", ConflictResolution::AskUser, "first")
            .with_conflict("--x", ConflictResolution::WrapperTakesPrecedence, "second");
        let rule = registry.conflict_for("--x");
        assert_eq!(rule.map(|r| r.message.as_str()), Some("second"));
    }

    #[test]
    fn help_and_version_recognised_through_aliases() {
        let registry = flag_registry();
        assert!(registry.is_help("-h"));
        assert!(registry.is_help("--help"));
        assert!(registry.is_version("-v"));
        assert!(!registry.is_version("-V"));
        assert!(!FlagRegistry::new().is_help("--help"));
    }
}
