/// Config file looked up in the source root when `--config` is not given.
pub const CONFIG_FILENAME: &str = "steprun.json";

/// Environment variable locating the Java toolchain installation.
pub const TOOLCHAIN_HOME_VAR: &str = "JAVA_HOME";

pub const COMPILER_NAME: &str = "javac";
pub const RUNTIME_NAME: &str = "java";

// Default harness layout, relative to the source root unless noted.
pub const DEFAULT_WORK_DIR: &str = "tests/java";
/// Relative to the working directory.
pub const DEFAULT_SOURCE_FILE: &str = "Main.java";
pub const DEFAULT_ARCHIVE: &str = "bindings/java/binding.jar";
/// Relative to the working directory.
pub const DEFAULT_CLASS_DIR: &str = ".";
pub const DEFAULT_ENTRY_POINT: &str = "Main";

pub const EXIT_COMPILE_FAILURE: u8 = 1;
pub const EXIT_RUN_FAILURE: u8 = 2;
pub const EXIT_SETUP_FAILURE: u8 = 3;
/// Invalid command-line arguments (`EX_USAGE`).
pub const EXIT_USAGE: u8 = 64;
