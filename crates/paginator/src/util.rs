//! Slice helpers.

/// Returns a copy of `s` with its elements in reverse order.
///
/// Useful when a previous page was fetched with a reversed scan and has to be put
/// back in forward order before building a [`Page`](crate::Page).
///
/// ```
/// use helios_paginator::reverse;
///
/// let numbers = [1, 2, 3, 4, 5];
/// assert_eq!(reverse(&numbers), vec![5, 4, 3, 2, 1]);
/// assert_eq!(numbers, [1, 2, 3, 4, 5]);
/// ```
pub fn reverse<T: Clone>(s: &[T]) -> Vec<T> {
    s.iter().rev().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_empty() {
        assert!(reverse::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_reverse_odd_and_even() {
        assert_eq!(reverse(&["a", "b", "c"]), vec!["c", "b", "a"]);
        assert_eq!(reverse(&[1, 2, 3, 4]), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_reverse_is_involution() {
        let books = vec![
            "48 Laws of power -1".to_string(),
            "48 Laws of power -2".to_string(),
        ];
        assert_eq!(reverse(&reverse(&books)), books);
    }
}
