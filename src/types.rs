use std::{io::Read, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportParseError {
    #[error("could not decode test report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not read test report: {0}")]
    Io(#[from] std::io::Error),
}

/// Aggregated results of a Jest run, as written by `jest --json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TestRunReport {
    #[serde(rename = "numRuntimeErrorTestSuites", default)]
    pub num_runtime_error_test_suites: u64,
    #[serde(rename = "testResults", default)]
    pub test_results: Vec<SuiteResult>,
}

/// Results of a single test file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SuiteResult {
    #[serde(rename = "testFilePath")]
    pub test_file_path: String,
    #[serde(rename = "numFailingTests", default)]
    pub num_failing_tests: u64,
    #[serde(rename = "numPassingTests", default)]
    pub num_passing_tests: u64,
    #[serde(rename = "numPendingTests", default)]
    pub num_pending_tests: u64,
    #[serde(rename = "perfStats", default)]
    pub perf_stats: PerfStats,
    /// Jest reports this as an error object, but older runners have used plain
    /// strings and booleans, so any truthy JSON value counts.
    #[serde(rename = "testExecError", default)]
    pub test_exec_error: Option<serde_json::Value>,
    #[serde(rename = "failureMessage", default)]
    pub failure_message: Option<String>,
    #[serde(rename = "testResults", default)]
    pub test_results: Vec<CaseResult>,
}

/// Start and end of a suite, in milliseconds since the Unix epoch. Runners
/// other than Jest may report fractional milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct PerfStats {
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CaseResult {
    #[serde(rename = "ancestorTitles", default)]
    pub ancestor_titles: Vec<String>,
    pub title: String,
    /// Milliseconds. Jest leaves this `null` for tests that never ran.
    #[serde(default)]
    pub duration: Option<f64>,
    pub status: CaseStatus,
    #[serde(rename = "failureMessages", default)]
    pub failure_messages: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    #[default]
    Passed,
    Failed,
    Pending,
    /// `todo`, `disabled` and anything newer Jest versions add.
    #[serde(other)]
    Unknown,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportIssue {
    #[error("suite {0} ends before it starts")]
    SuiteEndsBeforeStart(String),
    #[error("suite {0} has an execution error but no failure message")]
    ExecErrorWithoutMessage(String),
    #[error("suite {0} has no ancestor titles on its first test case")]
    FirstCaseWithoutAncestorTitles(String),
    #[error("test case {title:?} in {suite} failed without failure messages")]
    FailedCaseWithoutMessages { suite: String, title: String },
}

impl TestRunReport {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReportParseError> {
        serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                ReportParseError::Io(e.into())
            } else {
                ReportParseError::Json(e)
            }
        })
    }

    pub fn has_runtime_errors(&self) -> bool {
        self.num_runtime_error_test_suites > 0
    }

    /// Non-fatal problems that will still transform, but likely into a
    /// surprising document.
    pub fn check(&self) -> Vec<ReportIssue> {
        let mut issues = Vec::new();
        for suite in self.test_results.iter() {
            let path = &suite.test_file_path;
            if suite.perf_stats.end < suite.perf_stats.start {
                issues.push(ReportIssue::SuiteEndsBeforeStart(path.clone()));
            }
            if suite.has_exec_error() {
                if suite.failure_message.is_none() {
                    issues.push(ReportIssue::ExecErrorWithoutMessage(path.clone()));
                }
                continue;
            }
            if suite
                .test_results
                .first()
                .is_some_and(|tc| tc.ancestor_titles.is_empty())
            {
                issues.push(ReportIssue::FirstCaseWithoutAncestorTitles(path.clone()));
            }
            issues.extend(
                suite
                    .test_results
                    .iter()
                    .filter(|tc| tc.status == CaseStatus::Failed && tc.failure_messages.is_empty())
                    .map(|tc| ReportIssue::FailedCaseWithoutMessages {
                        suite: path.clone(),
                        title: tc.title.clone(),
                    }),
            );
        }
        issues
    }
}

impl FromStr for TestRunReport {
    type Err = ReportParseError;

    fn from_str(json: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(json)?)
    }
}

impl SuiteResult {
    pub fn has_exec_error(&self) -> bool {
        match &self.test_exec_error {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(serde_json::Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(serde_json::Value::Array(..)) | Some(serde_json::Value::Object(..)) => true,
        }
    }

    pub fn total_tests(&self) -> u64 {
        self.num_failing_tests + self.num_passing_tests + self.num_pending_tests
    }

    pub fn elapsed_millis(&self) -> f64 {
        self.perf_stats.end - self.perf_stats.start
    }
}
