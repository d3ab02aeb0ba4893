pub mod quiz_type;
pub mod request;
pub mod respond;
