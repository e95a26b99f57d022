use std::fmt::{self, Display, Formatter};

/// Writes `items` as `[a, b, c]`.
pub(crate) fn write_list<I>(f: &mut Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator,
    I::Item: Display,
{
    f.write_str("[")?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct List(Vec<i32>);

    impl Display for List {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write_list(f, &self.0)
        }
    }

    #[test]
    fn writes_bracketed_comma_separated_items() {
        assert_eq!(List(vec![]).to_string(), "[]");
        assert_eq!(List(vec![1]).to_string(), "[1]");
        assert_eq!(List(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
    }
}
