pub const CLASSNAME_VAR: &str = "{classname}";
pub const TITLE_VAR: &str = "{title}";

pub const DEFAULT_SUITE_NAME: &str = "jest tests";
pub const DEFAULT_OUTPUT: &str = "./junit.xml";
pub const DEFAULT_CLASSNAME_TEMPLATE: &str = "{classname} {title}";
pub const DEFAULT_TITLE_TEMPLATE: &str = "{classname} {title}";
pub const DEFAULT_ANCESTOR_SEPARATOR: &str = " ";
pub const DEFAULT_USE_PATH_FOR_SUITE_NAME: &str = "false";

/// Key inside `package.json` holding reporter options.
pub const PACKAGE_JSON_OPTIONS_KEY: &str = "jest-junit";
pub const PACKAGE_JSON_FILE_NAME: &str = "package.json";

pub const JEST_SUITE_NAME_ENV: &str = "JEST_SUITE_NAME";
pub const JEST_JUNIT_OUTPUT_ENV: &str = "JEST_JUNIT_OUTPUT";
pub const JEST_JUNIT_CLASSNAME_ENV: &str = "JEST_JUNIT_CLASSNAME";
pub const JEST_JUNIT_TITLE_ENV: &str = "JEST_JUNIT_TITLE";
pub const JEST_JUNIT_ANCESTOR_SEPARATOR_ENV: &str = "JEST_JUNIT_ANCESTOR_SEPARATOR";
pub const JEST_USE_PATH_FOR_SUITE_NAME_ENV: &str = "JEST_USE_PATH_FOR_SUITE_NAME";
pub const JEST_JUNIT_LOG_ENV: &str = "JEST_JUNIT_LOG";

/// Output path that sends the rendered XML to stdout instead of a file.
pub const STDOUT_OUTPUT: &str = "-";
