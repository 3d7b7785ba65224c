#[derive(Debug)]
pub struct EnquiryMessage(String);

impl EnquiryMessage {
    /// Unbounded free text; only emptiness is rejected. Not escaped here,
    /// the emails quote it verbatim.
    pub fn parse(s: String) -> Result<EnquiryMessage, String> {
        if s.is_empty() {
            Err("enquiry message is missing.".to_string())
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for EnquiryMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
