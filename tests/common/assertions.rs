//! Domain-specific assertion macros for e2e-report harnesses.
//!
//! These wrap plain string checks with failure messages that print the whole
//! document, which is what you want when an XML or log assertion fails.

// ---------------------------------------------------------------------------
// Text assertions
// ---------------------------------------------------------------------------

/// Assert that `haystack` contains `needle`, printing the haystack on failure.
///
/// ```rust
/// assert_contains!(xml, r#"<testcase name="pushes""#);
/// ```
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {{
        let haystack: &str = &$haystack;
        let needle: &str = &$needle;
        if !haystack.contains(needle) {
            panic!(
                "assert_contains! failed:\n  needle: {:?}\n  document:\n{}",
                needle, haystack
            );
        }
    }};
}

/// Assert that `haystack` does not contain `needle`.
#[macro_export]
macro_rules! assert_not_contains {
    ($haystack:expr, $needle:expr) => {{
        let haystack: &str = &$haystack;
        let needle: &str = &$needle;
        if haystack.contains(needle) {
            panic!(
                "assert_not_contains! failed:\n  unexpected: {:?}\n  document:\n{}",
                needle, haystack
            );
        }
    }};
}

/// Assert that the needles occur in `haystack` in the given order.
#[macro_export]
macro_rules! assert_in_order {
    ($haystack:expr, [$($needle:expr),+ $(,)?]) => {{
        let haystack: &str = &$haystack;
        let mut from = 0usize;
        $(
            let needle: &str = &$needle;
            match haystack[from..].find(needle) {
                Some(pos) => from += pos + needle.len(),
                None => panic!(
                    "assert_in_order! failed: {:?} not found after byte {}\n  document:\n{}",
                    needle, from, haystack
                ),
            }
        )+
    }};
}

// ---------------------------------------------------------------------------
// Name assertions
// ---------------------------------------------------------------------------

/// Assert that a test-case name respects the length bound: at most
/// `MAX_NAME_BYTES` bytes of UTF-8, plus separator and a 40-char digest.
#[macro_export]
macro_rules! assert_name_bounded {
    ($name:expr) => {{
        let name: &str = &$name;
        let max = e2e_report_core::naming::MAX_NAME_BYTES
            + e2e_report_core::naming::HASH_SEPARATOR.len()
            + 40;
        let bytes = name.len();
        if bytes > max {
            panic!(
                "assert_name_bounded! failed: {:?} is {} bytes (max {})",
                name, bytes, max
            );
        }
    }};
}
