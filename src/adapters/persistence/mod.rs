pub mod memory;
pub mod waitlist;
