use anyhow::anyhow;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 verifier for processor callbacks.
///
/// The signature must be computed over the body exactly as it arrived on the
/// wire. Signatures are lowercase hex and must match byte for byte; comparison
/// is constant time.
#[derive(Clone)]
pub struct SignatureVerifier {
    keyed: HmacSha256,
}

impl SignatureVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> anyhow::Result<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(anyhow!("webhook secret must not be empty"));
        }
        let keyed = HmacSha256::new_from_slice(secret)
            .map_err(|err| anyhow!("hmac init failed: {err}"))?;
        Ok(Self { keyed })
    }

    /// Lowercase hex signature of `body`, as the processor would send it.
    pub fn sign(&self, body: &[u8]) -> String {
        let digest = self.digest(body);
        let mut out = String::with_capacity(digest.len() * 2);
        for byte in digest {
            out.push_str(&format!("{byte:02x}"));
        }
        out
    }

    /// A missing signature, or any string other than `sign(body)`, is a
    /// mismatch.
    pub fn verify(&self, body: &[u8], signature: Option<&str>) -> bool {
        let Some(provided) = signature else {
            return false;
        };
        let expected = self.sign(body);
        if provided.len() != expected.len() {
            return false;
        }
        expected.as_bytes().ct_eq(provided.as_bytes()).into()
    }

    fn digest(&self, body: &[u8]) -> Vec<u8> {
        let mut mac = self.keyed.clone();
        mac.update(body);
        mac.finalize().into_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";

    #[test]
    fn sign_then_verify_round_trips() {
        let verifier = SignatureVerifier::new(SECRET).expect("verifier");
        for body in [
            b"".as_slice(),
            br#"{"event":"payment.captured"}"#.as_slice(),
            [0x00u8, 0xff, 0x80].as_slice(),
        ] {
            let signature = verifier.sign(body);
            assert!(verifier.verify(body, Some(&signature)));
        }
    }

    #[test]
    fn signature_matches_rfc4231_vector() {
        // RFC 4231 test case 2.
        let verifier = SignatureVerifier::new("Jefe").expect("verifier");
        assert_eq!(
            verifier.sign(b"what do ya want for nothing?"),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn only_the_exact_lowercase_signature_is_accepted() {
        let verifier = SignatureVerifier::new(SECRET).expect("verifier");
        let body = b"payload";
        let canonical = verifier.sign(body);
        for other in [
            canonical.to_uppercase(),
            format!(" {canonical}\t"),
            format!("{canonical}\n"),
        ] {
            assert_ne!(other, canonical);
            assert!(!verifier.verify(body, Some(&other)), "accepted {:?}", other);
        }
        assert!(verifier.verify(body, Some(&canonical)));
    }

    #[test]
    fn tampered_body_or_signature_is_rejected() {
        let verifier = SignatureVerifier::new(SECRET).expect("verifier");
        let signature = verifier.sign(b"original");
        assert!(!verifier.verify(b"modified", Some(&signature)));

        let mut flipped = signature.into_bytes();
        flipped[0] = if flipped[0] == b'0' { b'1' } else { b'0' };
        let flipped = String::from_utf8(flipped).expect("utf8");
        assert!(!verifier.verify(b"original", Some(&flipped)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let signer = SignatureVerifier::new("secret-a").expect("verifier");
        let verifier = SignatureVerifier::new("secret-b").expect("verifier");
        let signature = signer.sign(b"body");
        assert!(!verifier.verify(b"body", Some(&signature)));
    }

    #[test]
    fn missing_or_malformed_signature_is_rejected() {
        let verifier = SignatureVerifier::new(SECRET).expect("verifier");
        assert!(!verifier.verify(b"body", None));
        for signature in ["", "   ", "abc", "zz", "not-hex", "00", "é0"] {
            assert!(
                !verifier.verify(b"body", Some(signature)),
                "signature {:?} should fail",
                signature
            );
        }
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(SignatureVerifier::new("").is_err());
    }
}
