//! Shared test utilities for planfold.

pub mod fixtures;

/// Table-driven test case structure.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
}

/// Run every case and report all mismatches together.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F) -> Result<(), String>
where
    I: std::fmt::Debug,
    E: std::fmt::Debug + PartialEq,
    F: Fn(I) -> E,
{
    let mut failures = Vec::new();
    for case in cases {
        println!("[TEST] Running: {} with {:?}", case.name, case.input);
        let start = std::time::Instant::now();
        let actual = test_fn(case.input);
        let elapsed = start.elapsed();

        if actual == case.expected {
            println!("[TEST] PASSED: {} ({elapsed:?})", case.name);
        } else {
            println!("[TEST] FAILED: {} ({elapsed:?})", case.name);
            failures.push(format!(
                "'{}': expected {:?}, got {:?}",
                case.name, case.expected, actual
            ));
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures.join("\n"))
    }
}
