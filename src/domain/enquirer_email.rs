#[derive(Debug, Clone)]
pub struct EnquirerEmail(String);

impl EnquirerEmail {
    /// Accepts anything shaped like `local@domain.tld`: no whitespace, a
    /// single `@`, and a dot strictly inside the part after it. This is a
    /// syntactic sanity check only; deliverability is the transport's
    /// problem, and the looseness (consecutive dots and the like) is part of
    /// the contract.
    pub fn parse(s: String) -> Result<EnquirerEmail, String> {
        if is_email_shaped(&s) {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid email address.", s))
        }
    }
}

fn is_email_shaped(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.is_empty() || domain.chars().any(|c| c == '@' || c.is_whitespace()) {
        return false;
    }
    // a dot with at least one character on each side of it
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

impl AsRef<str> for EnquirerEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
