#[derive(Debug)]
pub struct EnquirerName(String);

impl EnquirerName {
    /// Presence is the only rule; the text reaches the outbound emails
    /// verbatim.
    pub fn parse(s: String) -> Result<EnquirerName, String> {
        if s.is_empty() {
            Err("enquirer name is missing.".to_string())
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for EnquirerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
