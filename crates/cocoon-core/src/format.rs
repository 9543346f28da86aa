//! Number formatting for counters.

/// Group digits by thousands: `group_thousands(40000, ",") == "40,000"`
pub fn group_thousands(value: u64, separator: &str) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + (len / 3) * separator.len());

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Counter text: grouped value followed by the suffix, verbatim
pub fn format_counter(value: u64, suffix: &str, separator: &str) -> String {
    format!("{}{}", group_thousands(value, separator), suffix)
}
