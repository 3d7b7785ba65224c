mod enquirer_email;
mod enquirer_name;
mod enquiry_message;
mod new_enquiry;

pub use enquirer_email::EnquirerEmail;
pub use enquirer_name::EnquirerName;
pub use enquiry_message::EnquiryMessage;
pub use new_enquiry::NewEnquiry;
