use std::collections::HashSet;
use std::path::PathBuf;

/// Extension given to every exported table file.
pub const OUTPUT_EXTENSION: &str = ".sql";

/// The final configuration after merging presets and CLI args.
///
/// Built once by [`resolve_config`](crate::app::config::resolve_config)
/// and never mutated afterwards. When `only` is non-empty the resolver
/// has already cleared `ignore`.
#[derive(Debug, Clone)]
pub struct Config {
    pub dump_path: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub list_only: bool,
    pub force: bool,
    pub postfix_name: Option<String>,
    pub postfix_time: Option<String>,
    pub only: HashSet<String>,
    pub ignore: HashSet<String>,
}

impl Config {
    /// Whether a table passes the include/exclude filter. A non-empty
    /// `only` set takes precedence over `ignore`.
    pub fn is_selected(&self, table: &str) -> bool {
        if !self.only.is_empty() {
            self.only.contains(table)
        } else {
            !self.ignore.contains(table)
        }
    }

    /// Compose the output file name: `<table>[-name][-time].sql`.
    pub fn output_file_name(&self, table: &str) -> String {
        let mut name = String::from(table);
        if let Some(postfix) = &self.postfix_name {
            name.push('-');
            name.push_str(postfix);
        }
        if let Some(postfix) = &self.postfix_time {
            name.push('-');
            name.push_str(postfix);
        }
        name.push_str(OUTPUT_EXTENSION);
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            dump_path: PathBuf::from("dump.sql"),
            output_dir: Some(PathBuf::from("out")),
            list_only: false,
            force: false,
            postfix_name: None,
            postfix_time: None,
            only: HashSet::new(),
            ignore: HashSet::new(),
        }
    }

    #[test]
    fn no_filters_selects_everything() {
        let config = base_config();
        assert!(config.is_selected("users"));
        assert!(config.is_selected(""));
    }

    #[test]
    fn ignore_excludes_named_tables() {
        let mut config = base_config();
        config.ignore.insert("cache".to_string());
        assert!(!config.is_selected("cache"));
        assert!(config.is_selected("users"));
    }

    #[test]
    fn only_wins_over_ignore() {
        let mut config = base_config();
        config.only.insert("users".to_string());
        config.ignore.insert("users".to_string());
        assert!(config.is_selected("users"));
        assert!(!config.is_selected("orders"));
    }

    #[test]
    fn file_name_without_postfixes() {
        let config = base_config();
        assert_eq!(config.output_file_name("users"), "users.sql");
    }

    #[test]
    fn file_name_with_both_postfixes() {
        let mut config = base_config();
        config.postfix_name = Some("bak".to_string());
        config.postfix_time = Some("2026-08-27".to_string());
        assert_eq!(
            config.output_file_name("users"),
            "users-bak-2026-08-27.sql"
        );
    }
}
