// End-to-end tests for the DLI interpreter
//
// Every case is a whole program run through `dli::run`, checked against the
// exact line it must print. Cases are grouped into suites; a panic anywhere
// in the pipeline is reported as a crash instead of aborting the run.

use dli::ERROR_OUTPUT;

/// Test result for a single test case
#[derive(Debug)]
pub enum TestResult {
    Pass,
    Fail(String),
    Crash(String),
}

/// Individual test case
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    pub expected: String,
}

/// Test suite containing multiple test cases
#[derive(Debug)]
pub struct TestSuite {
    pub name: String,
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tests: Vec::new(),
        }
    }

    pub fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    /// Run all tests in this suite
    pub fn run(&self) -> TestSuiteResults {
        let mut results = TestSuiteResults::new(&self.name);

        println!("Running test suite: {}", self.name);
        println!("{}", "=".repeat(50));

        for test in &self.tests {
            let result = run_single_test(test);
            results.add_result(&test.name, result);
        }

        results.print_summary();
        results
    }
}

/// Results for a test suite run
#[derive(Debug)]
pub struct TestSuiteResults {
    pub suite_name: String,
    pub results: Vec<(String, TestResult)>,
    pub passed: usize,
    pub failed: usize,
    pub crashed: usize,
}

impl TestSuiteResults {
    pub fn new(suite_name: &str) -> Self {
        Self {
            suite_name: suite_name.to_string(),
            results: Vec::new(),
            passed: 0,
            failed: 0,
            crashed: 0,
        }
    }

    pub fn add_result(&mut self, test_name: &str, result: TestResult) {
        match &result {
            TestResult::Pass => {
                self.passed += 1;
                println!("  ✓ {}", test_name);
            }
            TestResult::Fail(msg) => {
                self.failed += 1;
                println!("  ✗ {}: {}", test_name, msg);
            }
            TestResult::Crash(msg) => {
                self.crashed += 1;
                println!("  💥 {}: CRASHED - {}", test_name, msg);
            }
        }
        self.results.push((test_name.to_string(), result));
    }

    pub fn print_summary(&self) {
        println!();
        println!("Test Suite: {} - Summary", self.suite_name);
        println!("{}", "-".repeat(30));
        println!("Passed:  {}", self.passed);
        println!("Failed:  {}", self.failed);
        println!("Crashed: {}", self.crashed);
        println!("Total:   {}", self.results.len());
        println!();
    }

    pub fn is_all_passed(&self) -> bool {
        self.crashed == 0 && self.failed == 0
    }
}

/// Run a single test case
fn run_single_test(test: &TestCase) -> TestResult {
    let result = std::panic::catch_unwind(|| dli::run(&test.input));

    match result {
        Ok(output) if output == test.expected => TestResult::Pass,
        Ok(output) => TestResult::Fail(format!(
            "expected '{}', got '{}'",
            test.expected, output
        )),
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Unknown panic".to_string()
            };
            TestResult::Crash(panic_msg)
        }
    }
}

impl TestCase {
    pub fn prints(name: &str, input: &str, expected: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            expected: expected.to_string(),
        }
    }

    pub fn fails(name: &str, input: &str) -> Self {
        Self::prints(name, input, ERROR_OUTPUT)
    }
}

// ============================================================================
// Test Suite Creation Functions
// ============================================================================

fn create_arithmetic_tests() -> TestSuite {
    let mut suite = TestSuite::new("Values and Arithmetic");

    suite.add_test(TestCase::prints("literal", "(val 5)", "(val 5)"));
    suite.add_test(TestCase::prints("negative_literal", "(val -12)", "(val -12)"));
    suite.add_test(TestCase::prints("add", "(add (val 2) (val 3))", "(val 5)"));
    suite.add_test(TestCase::prints("add_negative", "(add (val -2) (val 3))", "(val 1)"));
    suite.add_test(TestCase::prints(
        "nested_add",
        "(add (add (val 1) (val 2)) (add (val 3) (val 4)))",
        "(val 10)",
    ));

    for (a, b) in [(0, 0), (7, -7), (123, 456), (-40, -2)] {
        suite.add_test(TestCase::prints(
            &format!("add_{}_{}", a, b),
            &format!("(add (val {}) (val {}))", a, b),
            &format!("(val {})", a + b),
        ));
    }

    suite.add_test(TestCase::fails(
        "add_overflow",
        "(add (val 9223372036854775807) (val 1))",
    ));
    suite.add_test(TestCase::fails("add_function", "(add (function x (var x)) (val 1))"));
    suite.add_test(TestCase::fails("add_array", "(add (arr (val 1) ) (val 1))"));

    suite
}

fn create_conditional_tests() -> TestSuite {
    let mut suite = TestSuite::new("Conditionals");

    suite.add_test(TestCase::prints(
        "greater_takes_then",
        "(if (val 5) (val 3) then (val 1) else (val 2))",
        "(val 1)",
    ));
    suite.add_test(TestCase::prints(
        "less_takes_else",
        "(if (val 3) (val 5) then (val 1) else (val 2))",
        "(val 2)",
    ));
    suite.add_test(TestCase::prints(
        "equal_takes_else",
        "(if (val 5) (val 5) then (val 1) else (val 2))",
        "(val 2)",
    ));
    suite.add_test(TestCase::prints(
        "unselected_branch_not_evaluated",
        "(if (val 1) (val 0) then (val 5) else (var nope))",
        "(val 5)",
    ));
    suite.add_test(TestCase::fails(
        "compare_function",
        "(if (function x (var x)) (val 0) then (val 1) else (val 2))",
    ));

    suite
}

fn create_binding_tests() -> TestSuite {
    let mut suite = TestSuite::new("Bindings and Environment");

    suite.add_test(TestCase::prints(
        "let",
        "(let x = (val 10) in (add (var x) (val 5)))",
        "(val 15)",
    ));
    suite.add_test(TestCase::prints(
        "let_rebinding",
        "(let x = (val 1) in (let x = (val 2) in (var x)))",
        "(val 2)",
    ));
    suite.add_test(TestCase::prints(
        "rebinding_survives_let_body",
        "(block (let x = (val 1) in (let x = (val 2) in (var x))) (var x) )",
        "(val 2)",
    ));
    suite.add_test(TestCase::prints(
        "let_binding_visible_after_body",
        "(add (let x = (val 1) in (var x)) (var x))",
        "(val 2)",
    ));
    suite.add_test(TestCase::prints("set_yields_value", "(set x (val 3))", "(val 3)"));
    suite.add_test(TestCase::prints(
        "set_then_read",
        "(block (set x (val 3)) (add (var x) (var x)) )",
        "(val 6)",
    ));
    suite.add_test(TestCase::prints(
        "set_overwrites_let",
        "(let x = (val 1) in (block (set x (val 9)) (var x) ))",
        "(val 9)",
    ));
    suite.add_test(TestCase::fails("unbound_reference", "(var y)"));
    suite.add_test(TestCase::fails(
        "reference_before_binding",
        "(add (var x) (let x = (val 1) in (var x)))",
    ));

    suite
}

fn create_function_tests() -> TestSuite {
    let mut suite = TestSuite::new("Functions and Calls");

    suite.add_test(TestCase::prints(
        "function_is_a_value",
        "(function x (var x))",
        "(function x = (var x))",
    ));
    suite.add_test(TestCase::prints(
        "function_with_equals",
        "(function x = (add (var x) (val 1)))",
        "(function x = (add (var x) (val 1)))",
    ));
    suite.add_test(TestCase::prints(
        "function_body_renders_if_without_markers",
        "(function x (if (var x) (val 0) then (val 1) else (val 0)))",
        "(function x = (if (var x) (val 0) (val 1) (val 0)))",
    ));
    suite.add_test(TestCase::prints(
        "call_literal",
        "(call (function x = (add (var x) (var x))) (val 4))",
        "(val 8)",
    ));
    suite.add_test(TestCase::prints(
        "call_literal_without_equals",
        "(call (function x (add (var x) (var x))) (val 4))",
        "(val 8)",
    ));
    suite.add_test(TestCase::prints(
        "call_through_name",
        "(let f = (function x (add (var x) (val 1))) in (call (var f) (val 41)))",
        "(val 42)",
    ));
    suite.add_test(TestCase::prints(
        "call_returns_function",
        "(call (function x (function y (var x))) (val 1))",
        "(function y = (var x))",
    ));
    suite.add_test(TestCase::prints(
        "recursive_sum",
        "(let f = (function n (if (var n) (val 0) then (add (var n) (call (var f) (add (var n) (val -1)))) else (val 0))) in (call (var f) (val 4)))",
        "(val 10)",
    ));
    suite.add_test(TestCase::prints(
        "recursive_sum_100",
        "(let f = (function n (if (var n) (val 0) then (add (var n) (call (var f) (add (var n) (val -1)))) else (val 0))) in (call (var f) (val 100)))",
        "(val 5050)",
    ));
    suite.add_test(TestCase::prints(
        "recursive_sum_1000",
        "(let f = (function n (if (var n) (val 0) then (add (var n) (call (var f) (add (var n) (val -1)))) else (val 0))) in (call (var f) (val 1000)))",
        "(val 500500)",
    ));
    suite.add_test(TestCase::prints(
        "parameters_are_global",
        "(block (set g (function n (var n))) (set f (function n (add (call (var g) (val 100)) (var n)))) (call (var f) (val 1)) )",
        "(val 200)",
    ));
    suite.add_test(TestCase::prints(
        "parameter_stays_bound_after_call",
        "(block (call (function p (var p)) (val 7)) (var p) )",
        "(val 7)",
    ));
    suite.add_test(TestCase::fails("call_unbound", "(call (var f) (val 1))"));
    suite.add_test(TestCase::fails("call_integer", "(call (val 1) (val 2))"));
    suite.add_test(TestCase::fails("call_array", "(call (arr ) (val 2))"));
    suite.add_test(TestCase::fails(
        "infinite_recursion",
        "(let f = (function x (call (var f) (var x))) in (call (var f) (val 1)))",
    ));

    suite
}

fn create_array_tests() -> TestSuite {
    let mut suite = TestSuite::new("Arrays");

    suite.add_test(TestCase::prints(
        "array_literal",
        "(arr (val 1) (add (val 1) (val 1)) )",
        "(arr (val 1) (val 2) )",
    ));
    suite.add_test(TestCase::prints("empty_array", "(arr )", "(arr )"));
    suite.add_test(TestCase::prints(
        "array_of_functions",
        "(arr (function x (var x)) )",
        "(arr (function x = (var x)) )",
    ));
    suite.add_test(TestCase::prints(
        "gen",
        "(gen (val 3) (function i = (add (var i) (val 1))))",
        "(arr (val 1) (val 2) (val 3) )",
    ));
    suite.add_test(TestCase::prints(
        "gen_empty",
        "(gen (val 0) (function i (var i)))",
        "(arr )",
    ));
    suite.add_test(TestCase::prints(
        "gen_nested_arrays",
        "(gen (val 2) (function i (arr (var i) )))",
        "(arr (arr (val 0) ) (arr (val 1) ) )",
    ));
    suite.add_test(TestCase::prints(
        "gen_applies_in_ascending_order",
        "(block (set c (val 0)) (gen (val 3) (function i (set c (add (var c) (var i))))) )",
        "(arr (val 0) (val 1) (val 3) )",
    ));
    suite.add_test(TestCase::prints(
        "gen_side_effects_persist",
        "(block (set c (val 0)) (gen (val 3) (function i (set c (add (var c) (var i))))) (var c) )",
        "(val 3)",
    ));
    suite.add_test(TestCase::prints(
        "gen_through_name",
        "(let sq = (function i (add (var i) (var i))) in (gen (val 3) (var sq)))",
        "(arr (val 0) (val 2) (val 4) )",
    ));
    suite.add_test(TestCase::prints(
        "at",
        "(at (arr (val 7) (val 8) (val 9) ) (val 1))",
        "(val 8)",
    ));
    suite.add_test(TestCase::prints(
        "at_generated",
        "(at (gen (val 5) (function i (add (var i) (var i)))) (val 4))",
        "(val 8)",
    ));
    suite.add_test(TestCase::prints(
        "at_array_element_is_array",
        "(at (arr (arr (val 1) ) (val 2) ) (val 0))",
        "(arr (val 1) )",
    ));
    suite.add_test(TestCase::fails("at_past_end", "(at (arr (val 7) ) (val 5))"));
    suite.add_test(TestCase::fails("at_negative", "(at (arr (val 7) ) (val -1))"));
    suite.add_test(TestCase::fails("at_empty", "(at (arr ) (val 0))"));
    suite.add_test(TestCase::fails("at_integer", "(at (val 1) (val 0))"));
    suite.add_test(TestCase::fails("gen_negative", "(gen (val -1) (function i (var i)))"));
    suite.add_test(TestCase::fails("gen_non_function", "(gen (val 2) (val 1))"));

    suite
}

fn create_syntax_tests() -> TestSuite {
    let mut suite = TestSuite::new("Syntax");

    suite.add_test(TestCase::prints("no_spaces_around_parens", "(add(val 1)(val 2))", "(val 3)"));
    suite.add_test(TestCase::prints(
        "newlines_are_whitespace",
        "(let x =\n  (val 2)\nin\n  (add (var x) (var x)))",
        "(val 4)",
    ));
    suite.add_test(TestCase::prints("trailing_forms_ignored", "(val 1) (val 2)", "(val 1)"));
    suite.add_test(TestCase::prints(
        "block_yields_last",
        "(block (val 1) (val 2) (val 3) )",
        "(val 3)",
    ));

    suite.add_test(TestCase::fails("empty_program", ""));
    suite.add_test(TestCase::fails("whitespace_program", "  \n\t "));
    suite.add_test(TestCase::fails("let_missing_body", "(let x = (val 1) in )"));
    suite.add_test(TestCase::fails("let_missing_equals", "(let x (val 1) in (var x))"));
    suite.add_test(TestCase::fails("let_missing_in", "(let x = (val 1) (var x))"));
    suite.add_test(TestCase::fails("if_missing_then", "(if (val 1) (val 2) (val 3) else (val 4))"));
    suite.add_test(TestCase::fails("if_missing_else", "(if (val 1) (val 2) then (val 3) (val 4))"));
    suite.add_test(TestCase::fails("val_missing_integer", "(val)"));
    suite.add_test(TestCase::fails("val_not_integer", "(val x)"));
    suite.add_test(TestCase::fails("val_too_large", "(val 99999999999999999999)"));
    suite.add_test(TestCase::fails("var_keyword_name", "(var in)"));
    suite.add_test(TestCase::fails("empty_parens", "()"));
    suite.add_test(TestCase::fails("unknown_keyword", "(foo (val 1))"));
    suite.add_test(TestCase::fails("add_one_operand", "(add (val 1))"));
    suite.add_test(TestCase::fails("add_three_operands", "(add (val 1) (val 2) (val 3))"));
    suite.add_test(TestCase::fails("empty_block", "(block )"));
    suite.add_test(TestCase::fails("unclosed", "(val 1"));
    suite.add_test(TestCase::fails("unclosed_array", "(arr (val 1)"));
    suite.add_test(TestCase::fails("bare_val", "val 1"));
    suite.add_test(TestCase::fails("stray_close", ")"));

    suite
}

// ============================================================================
// Main Test Function
// ============================================================================

#[test]
fn comprehensive_program_tests() {
    println!("🧪 DLI Program Test Suite");
    println!("=========================\n");

    let suites = vec![
        create_arithmetic_tests(),
        create_conditional_tests(),
        create_binding_tests(),
        create_function_tests(),
        create_array_tests(),
        create_syntax_tests(),
    ];

    let mut failed_suites = Vec::new();
    for suite in suites {
        let results = suite.run();
        if !results.is_all_passed() {
            failed_suites.push(results.suite_name);
        }
    }

    assert!(
        failed_suites.is_empty(),
        "suites with failures: {}",
        failed_suites.join(", ")
    );
}
