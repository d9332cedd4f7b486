use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub schedule_dir: PathBuf,
    pub items_path: Option<PathBuf>,
    pub items_have_headers: bool,
    /// Top-level codes indexed without a subcategory tier
    pub direct_categories: Vec<String>,
    pub show_counts: bool,
    /// Restrict the printed dump to one category
    pub category: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            schedule_dir: env::var("SCHEDULE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("schedules")),
            items_path: env::var("ITEMS_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            items_have_headers: env_flag("ITEMS_HAVE_HEADERS", true),
            direct_categories: env::var("DIRECT_CATEGORIES")
                .ok()
                .map(|s| parse_codes(&s))
                .unwrap_or_else(|| vec!["E".to_string(), "F".to_string()]),
            show_counts: env_flag("SHOW_COUNTS", true),
            category: None,
        }
    }

    /// Apply `--schedules`, `--items` and `--category` from the command line.
    pub fn apply_args(&mut self, args: &[String]) {
        if let Some(val) = flag_value(args, "--schedules") {
            self.schedule_dir = PathBuf::from(val);
        }
        if let Some(val) = flag_value(args, "--items") {
            self.items_path = Some(PathBuf::from(val));
        }
        if let Some(val) = flag_value(args, "--category") {
            self.category = Some(val.to_uppercase());
        }
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let pos = args.iter().position(|arg| arg == flag)?;
    args.get(pos + 1).map(String::as_str)
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| v != "false" && v != "0")
        .unwrap_or(default)
}

fn parse_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "SCHEDULE_DIR",
        "ITEMS_PATH",
        "ITEMS_HAVE_HEADERS",
        "DIRECT_CATEGORIES",
        "SHOW_COUNTS",
    ];

    fn clear_env() {
        for var in VARS {
            // SAFETY: env-mutating tests are serialized
            unsafe { env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env();

        assert_eq!(config.schedule_dir, PathBuf::from("schedules"));
        assert_eq!(config.items_path, None);
        assert!(config.items_have_headers);
        assert_eq!(config.direct_categories, vec!["E", "F"]);
        assert!(config.show_counts);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        // SAFETY: env-mutating tests are serialized
        unsafe {
            env::set_var("DIRECT_CATEGORIES", "e, f ,G");
            env::set_var("SHOW_COUNTS", "0");
            env::set_var("ITEMS_PATH", "items.csv");
        }
        let config = Config::from_env();
        clear_env();

        assert_eq!(config.direct_categories, vec!["E", "F", "G"]);
        assert!(!config.show_counts);
        assert_eq!(config.items_path, Some(PathBuf::from("items.csv")));
    }

    #[test]
    #[serial]
    fn test_args_override_env() {
        clear_env();
        let mut config = Config::from_env();
        let args: Vec<String> = ["lcc-tree", "--schedules", "data", "--category", "q"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        config.apply_args(&args);

        assert_eq!(config.schedule_dir, PathBuf::from("data"));
        assert_eq!(config.category.as_deref(), Some("Q"));
        assert_eq!(config.items_path, None);
    }
}
