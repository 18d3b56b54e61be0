//! ccenv's half of the combined help, rendered from the flag registry so that
//! every registered wrapper flag is listed.

use crate::args::{FlagCategory, FlagInfo, FlagRegistry};
use crate::cli::command;

pub(crate) fn render_wrapper_help(registry: &FlagRegistry) -> String {
    let cmd = command();
    let mut out = String::new();

    if let Some(about) = cmd.get_about() {
        out.push_str(&format!("{about}\n\n"));
    }
    out.push_str("Usage: ccenv [WRAPPER FLAGS] [CLAUDE ARGS]...\n");
    out.push_str("       ccenv <COMMAND>\n");

    let subcommands: Vec<(&str, String)> = cmd
        .get_subcommands()
        .map(|sub| {
            let about = sub.get_about().map(ToString::to_string).unwrap_or_default();
            (sub.get_name(), about)
        })
        .collect();
    if !subcommands.is_empty() {
        let width = subcommands.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        out.push_str("\nCommands:\n");
        for (name, about) in &subcommands {
            out.push_str(&format!("  {name:<width$}  {about}\n"));
        }
    }

    let flags = registry.wrapper_flags();
    let labels: Vec<(&FlagInfo, String)> = flags
        .iter()
        .map(|info| (*info, flag_label(registry, info)))
        .collect();
    let width = labels.iter().map(|(_, label)| label.len()).max().unwrap_or(0);

    out.push_str("\nWrapper flags:\n");
    for category in FlagCategory::ALL {
        let group: Vec<_> = labels
            .iter()
            .filter(|(info, _)| info.category == category)
            .collect();
        if group.is_empty() {
            continue;
        }
        out.push_str(&format!("  {}:\n", category.label()));
        for (info, label) in group {
            out.push_str(&format!("    {label:<width$}  {}\n", info.description));
        }
    }

    if let Some(after) = cmd.get_after_help() {
        out.push_str(&format!("\n{after}\n"));
    }
    out
}

/// `-e, --env <VALUE>`
fn flag_label(registry: &FlagRegistry, info: &FlagInfo) -> String {
    let mut names = registry.aliases_for(&info.name);
    names.push(info.name.as_str());
    let mut label = names.join(", ");
    if info.takes_value {
        label.push_str(" <VALUE>");
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::flag_registry;

    #[test]
    fn lists_default_wrapper_flags_with_aliases() {
        let help = render_wrapper_help(&flag_registry());
        assert!(help.contains("-e, --env <VALUE>"));
        assert!(help.contains("--no-interactive"));
        assert!(help.contains("--dry-run"));
        assert!(help.contains("-h, --help"));
        assert!(help.contains("-v, --version"));
        assert!(!help.contains("--print"));
    }

    #[test]
    fn lists_subcommands() {
        let help = render_wrapper_help(&flag_registry());
        for name in ["list", "add", "remove", "use"] {
            assert!(help.contains(&format!("  {name} ")), "{name}");
        }
    }

    #[test]
    fn flags_registered_later_are_listed_under_their_category() {
        let mut registry = flag_registry();
        registry.register_wrapper_flag(FlagInfo::new(
            "--profile-dir",
            true,
            FlagCategory::Network,
            "Directory holding proxy profiles",
        ));
        let help = render_wrapper_help(&registry);

        let network = help.find("  Network:").unwrap();
        let flag = help.find("--profile-dir <VALUE>").unwrap();
        let next_group = help.find("  Help:").unwrap();
        assert!(network < flag && flag < next_group);
        assert!(help.contains("Directory holding proxy profiles"));
    }
}
