pub const APP_NAME: &str = "fnpack";

/// Exported symbol the runtime invokes when no handler name is given.
pub const DEFAULT_HANDLER_NAME: &str = "handler";

/// Build directory created next to the entry file when none is given.
pub const DEFAULT_BUILD_DIR_NAME: &str = ".build";

/// Extension of the file the bundler writes.
pub const BUNDLER_OUTPUT_EXT: &str = "js";

/// Package (and `node_modules/.bin` executable) name of the bundler CLI.
pub const BUNDLER_PACKAGE: &str = "webpack-cli";

/// Overrides bundler discovery with an explicit executable path.
pub const BUNDLER_ENV_VAR: &str = "FNPACK_BUNDLER";

/// Source file extensions accepted as entry points.
pub const ENTRY_EXTENSIONS: &[&str] = &["js", "ts"];
