/// Mask a login email for logging: keep the first character of the local
/// part and the domain.
pub(crate) fn email(addr: &str) -> String {
    match addr.split_once('@') {
        Some((local, domain)) => {
            let head = local.chars().next().map(String::from).unwrap_or_default();
            format!("{head}***@{domain}")
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_char_and_domain() {
        assert_eq!(email("player@example.com"), "p***@example.com");
    }

    #[test]
    fn handles_non_email_input() {
        assert_eq!(email("not-an-email"), "***");
        assert_eq!(email("@example.com"), "***@example.com");
    }
}
