/// Permissive syntactic check: `local@domain.tld` with no whitespace, a single
/// `@`, and a `.` inside the domain part that is neither its first nor last char.
/// Not RFC validation and says nothing about deliverability.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(idx, c)| c == '.' && idx > 0 && idx + 1 < domain.len())
}
