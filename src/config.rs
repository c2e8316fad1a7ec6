use std::path::PathBuf;

pub const BASE_ENV: &str = "SYLLABUS_TREE_BASE";
pub const CURRICULUM_ENV: &str = "SYLLABUS_TREE_CURRICULUM";

pub fn default_base_path() -> PathBuf {
    let home = home::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join("Desktop").join("DS").join("IES_Syllabus_Data")
}

/// `-q` wins over `-v`; `RUST_LOG`, when set, wins over both.
pub fn log_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet { return "error"; }
    match verbose { 0 => "warn", 1 => "info", 2 => "debug", _ => "trace" }
}
