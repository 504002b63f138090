//! # Pattern Tools

/// Concatenate string literals with a separator, at compile time.
///
/// # Examples
///
/// ```rust
/// use tokencost::join_strs;
///
/// assert_eq!(join_strs!(",", ("Hello", "World")), "Hello,World");
/// assert_eq!(join_strs!(";", ("OnlyOne")), "OnlyOne");
/// ```
#[macro_export]
macro_rules! join_strs {
    ($sep:literal, ($first:literal $(, $rest:literal)* $(,)?)) => {
        concat!($first $(, $sep, $rest)*)
    };
}

/// [`join_strs!()`] with ``|`` as the separator; builds regex alternations.
#[macro_export]
macro_rules! join_patterns {
    ($($e:literal),* $(,)?) => { $crate::join_strs!("|", ($($e),*)) };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_join_patterns() {
        assert_eq!(join_patterns!("a", "b", "c"), "a|b|c");
        assert_eq!(join_patterns!(r"'s", r"\s+",), r"'s|\s+");
    }

    #[test]
    fn test_join_strs() {
        assert_eq!(join_strs!("+", ("a", "b", "c")), "a+b+c");
    }
}
