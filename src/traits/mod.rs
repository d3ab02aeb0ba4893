pub mod transport;
pub mod view;
