//! Minimal on-target test support, reported over the serial console.
//!
//! The pure conversion logic also has host-side unit tests; this runner
//! exists so the same properties can be checked on real hardware from a
//! `demos/` binary.

use ufmt::uwriteln;

use crate::drivers::SerialConsole;

pub struct TestRunner {
    console: SerialConsole,
    total_tests: u32,
    passed_tests: u32,
}

pub trait TestCase {
    fn run(&self) -> TestResult;
    fn name(&self) -> &'static str;
}

#[derive(PartialEq)]
pub enum TestResult {
    Pass,
    Fail(&'static str),
}

impl TestRunner {
    pub fn new() -> Self {
        Self {
            console: SerialConsole::new(),
            total_tests: 0,
            passed_tests: 0,
        }
    }

    pub fn run_suite(&mut self, name: &'static str, tests: &[&dyn TestCase]) {
        let _ = uwriteln!(&mut self.console, "=== suite: {} ===", name);

        for test in tests {
            self.total_tests += 1;
            match test.run() {
                TestResult::Pass => {
                    self.passed_tests += 1;
                    let _ = uwriteln!(&mut self.console, "{}: PASS", test.name());
                }
                TestResult::Fail(reason) => {
                    let _ = uwriteln!(&mut self.console, "{}: FAIL - {}", test.name(), reason);
                }
            }
        }
    }

    pub fn summary(&mut self) {
        let _ = uwriteln!(
            &mut self.console,
            "passed {}/{}",
            self.passed_tests,
            self.total_tests
        );
    }

    pub fn all_passed(&self) -> bool {
        self.passed_tests == self.total_tests
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[macro_export]
macro_rules! check {
    ($cond:expr) => {
        if !$cond {
            return $crate::testing::TestResult::Fail(concat!("check failed: ", stringify!($cond)));
        }
    };
}

#[macro_export]
macro_rules! check_eq {
    ($left:expr, $right:expr) => {
        if $left != $right {
            return $crate::testing::TestResult::Fail(concat!(
                "check failed: ",
                stringify!($left),
                " == ",
                stringify!($right)
            ));
        }
    };
}
