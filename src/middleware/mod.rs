pub mod ack;
pub mod client_addr;

pub use ack::{LEGAL_ACK_COOKIE, RequireLegalAck, acknowledgement_cookie};
pub use client_addr::ClientAddr;
