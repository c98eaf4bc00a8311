//! Content-addressed identifier minting.
//!
//! Every anonymous node in the graph (regions, positions, variant loci,
//! associations) gets its identity here, so re-running an ingest over
//! unchanged input reproduces the same identifiers byte for byte.
//!
//! The parts are joined with the ASCII unit separator, hashed with SHA-256,
//! and the first 160 bits of the digest are hex-encoded as the local name:
//!
//! ```text
//! mint(["5", "21259029"], "position")  ==>  _:position-<40 hex chars>
//! ```
//!
//! This is an identity function, not a security primitive.

use sha2::{Digest, Sha256};

use crate::core::types::{Identifier, ModelError, ANONYMOUS_PREFIX};

/// Separator placed between parts before hashing (ASCII unit separator)
pub const PART_SEPARATOR: char = '\u{1f}';

/// Number of digest bytes kept in the local name (160 bits)
pub const DIGEST_BYTES: usize = 20;

/// Mint a deterministic identifier from an ordered sequence of parts.
///
/// Order is significant: `mint(["a", "b"])` and `mint(["b", "a"])` differ.
///
/// # Errors
///
/// Returns `ModelError::InvalidInput` if `parts` is empty, if every part is
/// empty, or if `namespace` is empty or contains whitespace or `:`.
///
/// # Examples
///
/// ```
/// use bioforge::utils::digest::mint;
///
/// let a = mint(&["5", "21259029"], "position").unwrap();
/// let b = mint(&["5", "21259029"], "position").unwrap();
/// assert_eq!(a, b);
/// assert!(a.as_str().starts_with("_:position-"));
/// ```
pub fn mint<S: AsRef<str>>(parts: &[S], namespace: &str) -> Result<Identifier, ModelError> {
    validate_namespace(namespace)?;

    if parts.is_empty() {
        return Err(ModelError::invalid("cannot mint an identifier from no parts"));
    }
    if parts.iter().all(|p| p.as_ref().is_empty()) {
        return Err(ModelError::invalid(
            "cannot mint an identifier from empty parts",
        ));
    }

    let mut hasher = Sha256::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            let mut buf = [0u8; 4];
            hasher.update(PART_SEPARATOR.encode_utf8(&mut buf).as_bytes());
        }
        hasher.update(part.as_ref().as_bytes());
    }
    let digest = hasher.finalize();
    let local = hex::encode(&digest[..DIGEST_BYTES]);

    Ok(Identifier::new(format!(
        "{ANONYMOUS_PREFIX}{namespace}-{local}"
    )))
}

/// True if `id` has the shape of an identifier produced by [`mint`]
#[must_use]
pub fn is_minted(id: &Identifier) -> bool {
    let Some(rest) = id.as_str().strip_prefix(ANONYMOUS_PREFIX) else {
        return false;
    };
    let Some((namespace, local)) = rest.rsplit_once('-') else {
        return false;
    };
    !namespace.is_empty()
        && local.len() == DIGEST_BYTES * 2
        && local.chars().all(|c| c.is_ascii_hexdigit())
}

fn validate_namespace(namespace: &str) -> Result<(), ModelError> {
    if namespace.is_empty() {
        return Err(ModelError::invalid("mint namespace must not be empty"));
    }
    if namespace.contains(':') || namespace.chars().any(char::is_whitespace) {
        return Err(ModelError::invalid(format!(
            "mint namespace '{namespace}' must not contain ':' or whitespace"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_deterministic() {
        let a = mint(&["NCBIGene:1234", "MONDO:0005148"], "variant-locus").unwrap();
        let b = mint(&["NCBIGene:1234", "MONDO:0005148"], "variant-locus").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_mint_order_sensitive() {
        let ab = mint(&["a", "b"], "test").unwrap();
        let ba = mint(&["b", "a"], "test").unwrap();
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_mint_separator_prevents_concatenation_collisions() {
        let split = mint(&["ab", "c"], "test").unwrap();
        let joined = mint(&["a", "bc"], "test").unwrap();
        assert_ne!(split, joined);
        assert_ne!(mint(&["abc"], "test").unwrap(), split);
    }

    #[test]
    fn test_mint_namespace_scopes_identifier() {
        let position = mint(&["5", "100"], "position").unwrap();
        let region = mint(&["5", "100"], "region").unwrap();
        assert_ne!(position, region);
        assert!(position.as_str().starts_with("_:position-"));
        assert!(region.as_str().starts_with("_:region-"));
    }

    #[test]
    fn test_mint_fixed_length() {
        let short = mint(&["x"], "n").unwrap();
        let long = mint(&["x".repeat(10_000)], "n").unwrap();
        assert_eq!(short.as_str().len(), long.as_str().len());
        assert_eq!(short.as_str().len(), "_:n-".len() + 40);
    }

    #[test]
    fn test_mint_known_value() {
        // A single part hashes exactly its own bytes
        let id = mint(&["a"], "n").unwrap();
        assert_eq!(
            id.as_str(),
            "_:n-ca978112ca1bbdcafac231b39a23dc4da786eff8"
        );
    }

    #[test]
    fn test_mint_empty_parts_rejected() {
        let none: [&str; 0] = [];
        assert!(matches!(
            mint(&none, "n"),
            Err(ModelError::InvalidInput(_))
        ));
        assert!(matches!(mint(&[""], "n"), Err(ModelError::InvalidInput(_))));
        assert!(matches!(
            mint(&["", ""], "n"),
            Err(ModelError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_mint_partially_empty_parts_allowed() {
        assert!(mint(&["", "x"], "n").is_ok());
    }

    #[test]
    fn test_mint_bad_namespace_rejected() {
        assert!(mint(&["a"], "").is_err());
        assert!(mint(&["a"], "has space").is_err());
        assert!(mint(&["a"], "ns:x").is_err());
    }

    #[test]
    fn test_is_minted() {
        let id = mint(&["a"], "association").unwrap();
        assert!(is_minted(&id));
        assert!(!is_minted(&Identifier::new("NCBIGene:1234")));
        assert!(!is_minted(&Identifier::new("_:region-notahash")));
    }
}
