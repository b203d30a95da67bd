use crate::{
    document::{attrs, Node},
    options::ReportOptions,
    string_safety::strip_ansi,
    types::{CaseResult, CaseStatus, SuiteResult, TestRunReport},
    utils::{iso_timestamp_secs, millis_to_secs, replace_vars, strip_base_directory},
};

/// Builds a single JUnit document for every suite in `report`.
///
/// Suites without test cases are left out unless they failed to execute, in
/// which case they carry one `error` child with the raw failure message and
/// no test cases.
pub fn build_junit_document(
    report: &TestRunReport,
    app_directory: &str,
    options: &ReportOptions,
) -> Node {
    // Once any suite fails to run, case titles can't name every suite, so all
    // suites in the report are named by path.
    let use_path_for_suite_name =
        options.use_path_for_suite_name || report.has_runtime_errors();

    let test_suites = report
        .test_results
        .iter()
        .filter(|suite| {
            let keep = !suite.test_results.is_empty() || suite.has_exec_error();
            if !keep {
                log::debug!("skipping empty test suite {}", suite.test_file_path);
            }
            keep
        })
        .map(|suite| build_test_suite(suite, app_directory, options, use_path_for_suite_name));

    Node::test_suites(options.suite_name.as_str()).with_children(test_suites)
}

fn build_test_suite(
    suite: &SuiteResult,
    app_directory: &str,
    options: &ReportOptions,
    use_path_for_suite_name: bool,
) -> Node {
    let test_suite = Node::test_suite()
        .with_attribute(
            attrs::NAME,
            test_suite_name(suite, app_directory, use_path_for_suite_name),
        )
        .with_attribute(attrs::TESTS, suite.total_tests())
        .with_attribute(attrs::ERRORS, u64::from(suite.has_exec_error()))
        .with_attribute(attrs::FAILURES, suite.num_failing_tests)
        .with_attribute(attrs::SKIPPED, suite.num_pending_tests)
        .with_attribute(attrs::TIMESTAMP, iso_timestamp_secs(suite.perf_stats.start))
        .with_attribute(attrs::TIME, millis_to_secs(suite.elapsed_millis()));

    if suite.has_exec_error() {
        return test_suite.with_child(Node::error(
            suite.failure_message.as_deref().unwrap_or_default(),
        ));
    }

    test_suite.with_children(
        suite
            .test_results
            .iter()
            .map(|test_case| build_test_case(test_case, options)),
    )
}

fn test_suite_name(suite: &SuiteResult, app_directory: &str, use_path: bool) -> String {
    let path_name = || strip_base_directory(&suite.test_file_path, app_directory);
    if use_path {
        return path_name();
    }
    match suite
        .test_results
        .first()
        .and_then(|tc| tc.ancestor_titles.first())
    {
        Some(title) => title.clone(),
        None => {
            log::warn!(
                "no ancestor title for the first test case in {}, naming suite by path",
                suite.test_file_path
            );
            path_name()
        }
    }
}

fn build_test_case(test_case: &CaseResult, options: &ReportOptions) -> Node {
    let classname = test_case
        .ancestor_titles
        .join(options.ancestor_separator.as_str());
    let title = test_case.title.as_str();

    let node = Node::test_case()
        .with_attribute(
            attrs::CLASSNAME,
            replace_vars(&options.class_name_template, &classname, title),
        )
        .with_attribute(
            attrs::NAME,
            replace_vars(&options.title_template, &classname, title),
        )
        .with_attribute(
            attrs::TIME,
            millis_to_secs(test_case.duration.unwrap_or_default()),
        );

    match test_case.status {
        CaseStatus::Failed => node.with_children(
            test_case
                .failure_messages
                .iter()
                .map(|message| Node::failure(strip_ansi(message))),
        ),
        CaseStatus::Pending => node.with_child(Node::skipped()),
        CaseStatus::Passed | CaseStatus::Unknown => node,
    }
}
