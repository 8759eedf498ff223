/// # hide sensitive
///
/// Masks `value` as "se******et", keeping at most `shown` characters split
/// between both ends. Values not longer than `shown` are masked entirely so
/// that something always stays hidden.
pub(crate) fn hide_sensitive(value: &str, shown: usize) -> String {
    let len = value.chars().count();
    if len <= shown {
        return "*".repeat(len);
    }

    let head = shown / 2;
    let tail_start = len - (shown - head);
    value
        .chars()
        .enumerate()
        .map(|(i, c)| if i < head || i >= tail_start { c } else { '*' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hide_sensitive() {
        assert_eq!(hide_sensitive("1234567890", 0), "**********");
        assert_eq!(hide_sensitive("1234567890", 5), "12*****890");
        assert_eq!(hide_sensitive("abc", 4), "***");
        assert_eq!(hide_sensitive("", 4), "");
    }
}
