use rand::Rng;

pub const REFERRAL_CODE_LEN: usize = 8;

const REFERRAL_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of fresh referral codes.
///
/// Codes are short, human-shareable tokens. They are not secrets and carry no
/// uniqueness guarantee of their own; the waitlist checks for collisions.
pub trait ReferralCodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// 8-character `[A-Z0-9]` codes drawn from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomReferralCodeGenerator;

impl ReferralCodeGenerator for RandomReferralCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..REFERRAL_CODE_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..REFERRAL_CODE_ALPHABET.len());
                REFERRAL_CODE_ALPHABET[idx] as char
            })
            .collect()
    }
}
