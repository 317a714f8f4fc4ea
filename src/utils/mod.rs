// Sat Oct 17 2026 - Alex

pub mod logging;

pub use logging::LoggingUtils;

pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "patch", "patches"), "1 patch");
        assert_eq!(pluralize(3, "patch", "patches"), "3 patches");
    }
}
