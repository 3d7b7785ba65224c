use super::{
    enquirer_email::EnquirerEmail, enquirer_name::EnquirerName, enquiry_message::EnquiryMessage,
};

pub struct NewEnquiry {
    pub name: EnquirerName,
    pub email: EnquirerEmail,
    pub message: EnquiryMessage,
}
