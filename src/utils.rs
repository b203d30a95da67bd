use chrono::DateTime;

use crate::constants::{CLASSNAME_VAR, TITLE_VAR};

/// Fills in `{classname}` and `{title}` in `template`.
///
/// Only the first occurrence of each placeholder is replaced; any later
/// repeats stay in the output as literal text. The template is scanned once,
/// so placeholder-looking text inside `classname` or `title` is never
/// substituted.
pub fn replace_vars(template: &str, classname: &str, title: &str) -> String {
    let mut substitutions: Vec<(usize, &str, &str)> = [
        (CLASSNAME_VAR, classname),
        (TITLE_VAR, title),
    ]
    .into_iter()
    .filter_map(|(token, value)| template.find(token).map(|pos| (pos, token, value)))
    .collect();
    substitutions.sort_by_key(|(pos, ..)| *pos);

    let mut replaced = String::with_capacity(template.len() + classname.len() + title.len());
    let mut cursor = 0;
    for (pos, token, value) in substitutions {
        replaced.push_str(&template[cursor..pos]);
        replaced.push_str(value);
        cursor = pos + token.len();
    }
    replaced.push_str(&template[cursor..]);
    replaced
}

/// Removes the first occurrence of `base_directory` from `path`, wherever it
/// appears.
pub fn strip_base_directory(path: &str, base_directory: &str) -> String {
    if base_directory.is_empty() {
        return path.to_string();
    }
    path.replacen(base_directory, "", 1)
}

/// Formats epoch milliseconds as a UTC `YYYY-MM-DDTHH:MM:SS` timestamp.
/// Fractional milliseconds are truncated; out of range values give the epoch.
pub fn iso_timestamp_secs(epoch_millis: f64) -> String {
    DateTime::from_timestamp_millis(epoch_millis.trunc() as i64)
        .unwrap_or_default()
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

pub fn millis_to_secs(millis: f64) -> f64 {
    millis / 1000.0
}
