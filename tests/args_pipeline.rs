//! Integration tests for argument analysis.

mod common;

use std::sync::Arc;

use ccenv::args::{flag_registry, ArgumentAnalyzer, FlagCategory, FlagClass, FlagInfo, FlagRegistry};
use common::{is_subsequence, raw_args};

fn analyzer() -> ArgumentAnalyzer {
    ArgumentAnalyzer::new(Arc::new(flag_registry()))
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn unknown_short_flag_and_its_text_are_forwarded() {
    let args = raw_args(&["-r", "You are a helpful assistant"]);
    let a = analyzer().analyze(&args);

    assert!(a.has_forwarded_flags);
    assert!(!a.has_wrapper_flags);
    assert_eq!(a.forwarded_args, args);
    assert!(a.requires_passthrough);
}

#[test]
fn env_flag_extracted_rest_forwarded() {
    let args = raw_args(&["--env", "production", "-r", "instruction"]);
    let a = analyzer().analyze(&args);

    assert!(a.has_wrapper_flags);
    assert_eq!(a.wrapper_flags.get("env"), Some("production"));
    assert_eq!(a.wrapper_flags.len(), 1);
    assert_eq!(a.forwarded_args, raw_args(&["-r", "instruction"]));
    assert!(!a.requires_passthrough);
}

#[test]
fn empty_argv_means_interactive() {
    let a = analyzer().analyze(&[]);
    assert!(a.empty);
    assert!(!a.has_wrapper_flags && !a.has_forwarded_flags);
    assert!(!a.help_requested && !a.version_requested);
    assert!(!a.requires_passthrough);
    assert!(a.forwarded_args.is_empty());
}

// =============================================================================
// POLICIES
// =============================================================================

#[test]
fn wrapper_flag_after_forwarded_tokens_is_still_extracted() {
    let args = raw_args(&["-p", "summarize", "--output-format", "json", "-e", "work"]);
    let a = analyzer().analyze(&args);

    assert_eq!(a.wrapper_flags.get("--env"), Some("work"));
    assert_eq!(
        a.forwarded_args,
        raw_args(&["-p", "summarize", "--output-format", "json"])
    );
}

#[test]
fn known_value_flag_keeps_its_value_adjacent() {
    let args = raw_args(&["--model", "opus", "--env", "work"]);
    let a = analyzer().analyze(&args);
    assert_eq!(a.forwarded_args, raw_args(&["--model", "opus"]));
    assert_eq!(a.wrapper_flags.get("env"), Some("work"));
}

#[test]
fn unknown_value_flag_does_not_consume_next_token() {
    // `--future-flag` might take a value in claude; ccenv cannot know, so the
    // value is treated as a separate token. Both still reach claude in order.
    let registry = Arc::new(flag_registry());
    assert!(!registry.takes_value("--future-flag"));

    let args = raw_args(&["--future-flag", "--env", "work"]);
    let a = ArgumentAnalyzer::new(registry).analyze(&args);
    assert_eq!(a.forwarded_args, raw_args(&["--future-flag"]));
    assert_eq!(a.wrapper_flags.get("env"), Some("work"));
}

#[test]
fn tokens_with_spaces_and_metacharacters_survive_verbatim() {
    let args = raw_args(&[
        "-p",
        "what does `rm -rf $HOME` do?",
        "--append-system-prompt",
        "  \"quoted\" 'single' ; | & > < \n",
        "",
    ]);
    let a = analyzer().analyze(&args);
    assert_eq!(a.forwarded_args, args);
}

#[test]
fn unknown_tokens_never_fail_and_always_forward() {
    let registry = flag_registry();
    let odd = ["--nope", "-Z", "---", "--", "-", "", "=", "--x=y", "plain"];
    for token in odd {
        assert_ne!(registry.classify(token), FlagClass::Wrapper, "{token}");
        let a = analyzer().analyze(&raw_args(&[token]));
        assert_eq!(a.forwarded_args, raw_args(&[token]), "{token}");
    }
}

#[test]
fn analysis_is_idempotent() {
    let inputs = [
        raw_args(&[]),
        raw_args(&["--help"]),
        raw_args(&["-e", "work", "-p", "hi", "--debug"]),
        raw_args(&["--env"]),
        raw_args(&["doctor", "--verbose"]),
    ];
    let analyzer = analyzer();
    for args in inputs {
        assert_eq!(analyzer.analyze(&args), analyzer.analyze(&args));
    }
}

#[test]
fn residual_is_always_a_subsequence() {
    let inputs = [
        raw_args(&["-e", "a", "-p", "x", "-e", "b", "y"]),
        raw_args(&["--dry-run", "--model", "--env", "z"]),
        raw_args(&["-h", "-v", "--wrapper-debug", "chat"]),
        raw_args(&["--env=work", "--model=opus", "--", "-e", "tail"]),
    ];
    let analyzer = analyzer();
    for args in inputs {
        let a = analyzer.analyze(&args);
        assert!(is_subsequence(&a.forwarded_args, &args), "{args:?}");
    }
}

#[test]
fn help_and_version_are_not_forwarded() {
    let a = analyzer().analyze(&raw_args(&["-p", "x", "-h", "-v"]));
    assert!(a.help_requested);
    assert!(a.version_requested);
    assert_eq!(a.forwarded_args, raw_args(&["-p", "x"]));
    assert!(!a.requires_passthrough);
}

#[test]
fn repeated_wrapper_flag_keeps_last_value() {
    let a = analyzer().analyze(&raw_args(&["-e", "one", "--env", "two"]));
    assert_eq!(a.wrapper_flags.get("env"), Some("two"));
}

#[test]
fn extract_wrapper_flags_matches_analysis() {
    let args = raw_args(&["--dry-run", "-e", "work", "--print", "hello"]);
    let analyzer = analyzer();
    let (flags, residual) = analyzer.extract_wrapper_flags(&args);
    let full = analyzer.analyze(&args);
    assert_eq!(flags, full.wrapper_flags);
    assert_eq!(residual, full.forwarded_args);
    assert_eq!(flags.get("dry-run"), Some(""));
}

// =============================================================================
// REGISTRY EXTENSION
// =============================================================================

#[test]
fn registry_extended_at_startup_changes_arity() {
    let mut registry = flag_registry();
    registry.register_forwarded_flag(FlagInfo::new(
        "--future-flag",
        true,
        FlagCategory::Behavior,
        "Newly added claude flag",
    ));

    let args = raw_args(&["--future-flag", "--env", "work"]);
    let a = ArgumentAnalyzer::new(Arc::new(registry)).analyze(&args);
    // "--env" is now the flag's value and "work" an ordinary positional
    assert_eq!(a.forwarded_args, args);
    assert!(a.wrapper_flags.is_empty());
    assert!(a.requires_passthrough);
}

#[test]
fn empty_registry_forwards_everything() {
    let args = raw_args(&["--env", "x", "--help"]);
    let a = ArgumentAnalyzer::new(Arc::new(FlagRegistry::new())).analyze(&args);
    assert!(!a.help_requested);
    assert_eq!(a.forwarded_args, args);
    assert!(a.requires_passthrough);
}
