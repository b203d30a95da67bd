use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::constants::{
    DEFAULT_ANCESTOR_SEPARATOR, DEFAULT_CLASSNAME_TEMPLATE, DEFAULT_OUTPUT, DEFAULT_SUITE_NAME,
    DEFAULT_TITLE_TEMPLATE, DEFAULT_USE_PATH_FOR_SUITE_NAME, PACKAGE_JSON_FILE_NAME,
    PACKAGE_JSON_OPTIONS_KEY,
};

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Reporter options as they appear in `package.json` and the environment.
/// Every value is kept as a string, including `usePathForSuiteName`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOptions {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub suite_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub output: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub class_name_template: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub title_template: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub ancestor_separator: Option<String>,
    /// Only a JSON string can spell `"true"`; booleans and numbers are read as
    /// unset so they never enable path based names.
    #[serde(default, deserialize_with = "string_only")]
    pub use_path_for_suite_name: Option<String>,
}

fn scalar_as_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(v @ (Value::Bool(..) | Value::Number(..))) => Ok(Some(v.to_string())),
        Some(v) => Err(D::Error::custom(format!("expected a string, found {v}"))),
    }
}

fn string_only<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(v @ (Value::Bool(..) | Value::Number(..))) => {
            log::warn!("ignoring non-string usePathForSuiteName value {v}");
            Ok(None)
        }
        Some(v) => Err(D::Error::custom(format!("expected a string, found {v}"))),
    }
}

impl RawOptions {
    pub fn defaults() -> Self {
        Self {
            suite_name: Some(DEFAULT_SUITE_NAME.into()),
            output: Some(DEFAULT_OUTPUT.into()),
            class_name_template: Some(DEFAULT_CLASSNAME_TEMPLATE.into()),
            title_template: Some(DEFAULT_TITLE_TEMPLATE.into()),
            ancestor_separator: Some(DEFAULT_ANCESTOR_SEPARATOR.into()),
            use_path_for_suite_name: Some(DEFAULT_USE_PATH_FOR_SUITE_NAME.into()),
        }
    }

    /// Layers `overrides` on top of `self`, field by field.
    pub fn merge(self, overrides: RawOptions) -> Self {
        Self {
            suite_name: overrides.suite_name.or(self.suite_name),
            output: overrides.output.or(self.output),
            class_name_template: overrides.class_name_template.or(self.class_name_template),
            title_template: overrides.title_template.or(self.title_template),
            ancestor_separator: overrides.ancestor_separator.or(self.ancestor_separator),
            use_path_for_suite_name: overrides
                .use_path_for_suite_name
                .or(self.use_path_for_suite_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub suite_name: String,
    pub output: PathBuf,
    pub class_name_template: String,
    pub title_template: String,
    pub ancestor_separator: String,
    pub use_path_for_suite_name: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions::from(RawOptions::defaults())
    }
}

impl From<RawOptions> for ReportOptions {
    /// Fields left unset fall back to their defaults. Only the exact string
    /// `"true"` enables path based suite names.
    fn from(raw: RawOptions) -> Self {
        let RawOptions {
            suite_name,
            output,
            class_name_template,
            title_template,
            ancestor_separator,
            use_path_for_suite_name,
        } = RawOptions::defaults().merge(raw);
        Self {
            suite_name: suite_name.unwrap_or_default(),
            output: PathBuf::from(output.unwrap_or_default()),
            class_name_template: class_name_template.unwrap_or_default(),
            title_template: title_template.unwrap_or_default(),
            ancestor_separator: ancestor_separator.unwrap_or_default(),
            use_path_for_suite_name: use_path_for_suite_name.as_deref() == Some("true"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PackageJson {
    #[serde(rename = "jest-junit", default)]
    jest_junit: Option<RawOptions>,
}

/// Reads the `jest-junit` section of `<app_directory>/package.json`.
/// A missing file or section yields empty options.
pub fn load_package_json_options<T: AsRef<Path>>(
    app_directory: T,
) -> Result<RawOptions, OptionsError> {
    read_package_json_options(app_directory.as_ref().join(PACKAGE_JSON_FILE_NAME))
}

pub fn read_package_json_options<T: AsRef<Path>>(path: T) -> Result<RawOptions, OptionsError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("no {} found at {}", PACKAGE_JSON_FILE_NAME, path.display());
            return Ok(RawOptions::default());
        }
        Err(source) => {
            return Err(OptionsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let package_json: PackageJson =
        serde_json::from_str(&contents).map_err(|source| OptionsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    if package_json.jest_junit.is_none() {
        log::debug!(
            "{} has no \"{}\" section",
            path.display(),
            PACKAGE_JSON_OPTIONS_KEY
        );
    }
    Ok(package_json.jest_junit.unwrap_or_default())
}
