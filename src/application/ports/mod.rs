pub mod key_value_store;
pub mod referral_code;
