//! Verification code generation.

use rand::Rng;
use vox_types::VerificationCode;

/// Generates fixed-length numeric codes.
///
/// Each digit is drawn independently and uniformly from `0..=9`. The code
/// only needs to resist brute force within the TTL window; boundary rate
/// limiting covers the rest.
pub struct CodeGenerator {
    length: usize,
}

impl CodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Produce a new code, e.g. `"654874"` for length 6.
    pub fn generate(&self) -> VerificationCode {
        let mut rng = rand::thread_rng();
        let digits: String = (0..self.length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();
        VerificationCode::from_digits(digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_length_is_six() {
        let code = CodeGenerator::new(6).generate();
        assert_eq!(code.len(), 6);
    }

    #[test]
    fn generated_codes_parse_at_the_boundary() {
        let gen = CodeGenerator::new(6);
        for _ in 0..100 {
            let code = gen.generate();
            vox_types::VerificationCode::parse(code.as_str(), 6).unwrap();
        }
    }

    #[test]
    fn every_digit_position_varies() {
        // With 200 samples the chance of any position staying constant
        // under a uniform generator is ~10^-200 per position.
        let gen = CodeGenerator::new(6);
        let samples: Vec<String> = (0..200).map(|_| gen.generate().as_str().to_string()).collect();
        for pos in 0..6 {
            let first = samples[0].as_bytes()[pos];
            assert!(
                samples.iter().any(|s| s.as_bytes()[pos] != first),
                "digit position {pos} never varied"
            );
        }
    }

    proptest! {
        #[test]
        fn any_length_yields_exactly_that_many_digits(len in 1usize..16) {
            let code = CodeGenerator::new(len).generate();
            prop_assert_eq!(code.len(), len);
            prop_assert!(code.as_str().bytes().all(|b| b.is_ascii_digit()));
        }
    }
}
