use imgsign::config::{ConfigError, SignerConfig};
use imgsign::Signer;

const KEY: &str = "943b421c9eb07c830af81030552c86009268de4e532ba2ee2eab8247c6da0881";
const SALT: &str = "520f986b998545b4785e0defbc4f3c1203f22de2374a3d53cb7a7fe9fea309c5";

#[test]
fn default_config_disables_signing() {
    let cfg = SignerConfig::default();
    assert!(cfg.validate().is_ok());
    assert!(!cfg.is_signing_enabled());
    assert_eq!(cfg.signature_size, 32);
}

#[test]
fn loads_from_vars() {
    let cfg = SignerConfig::from_vars(vec![
        ("IMGPROXY_KEY", KEY),
        ("IMGPROXY_SALT", SALT),
        ("IMGPROXY_SIGNATURE_SIZE", "8"),
        ("IMGPROXY_TRUSTED_SIGNATURES", "one, two,,three"),
        ("UNRELATED", "x"),
    ])
    .unwrap();
    assert!(cfg.is_signing_enabled());
    assert_eq!(cfg.key.len(), 32);
    assert_eq!(cfg.signature_size, 8);
    assert_eq!(cfg.trusted_signatures, vec!["one", "two", "three"]);

    let signer = Signer::from_config(&cfg).unwrap();
    assert!(signer.verify("two", "/anything").is_ok());
    let signed = signer.sign("/rs:fit:300:300/plain/http://img.example.com/pretty/image.jpg").unwrap();
    assert!(signed.starts_with("/m3k5QADfcKM/"));
}

#[test]
fn key_requires_salt() {
    let err = SignerConfig::from_vars(vec![("IMGPROXY_KEY", KEY)]).unwrap_err();
    assert!(matches!(err, ConfigError::MissingSalt));
    let err = SignerConfig::from_vars(vec![("IMGPROXY_SALT", SALT)]).unwrap_err();
    assert!(matches!(err, ConfigError::MissingKey));
}

#[test]
fn rejects_bad_signature_size() {
    for size in ["0", "33"] {
        let err = SignerConfig::from_vars(vec![("IMGPROXY_SIGNATURE_SIZE", size)]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSignatureSize(_)));
    }
    let err = SignerConfig::from_vars(vec![("IMGPROXY_SIGNATURE_SIZE", "big")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidNumber { .. }));
}

#[test]
fn rejects_bad_hex() {
    let err = SignerConfig::from_vars(vec![("IMGPROXY_KEY", "abc"), ("IMGPROXY_SALT", SALT)]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidHex { var: "IMGPROXY_KEY", .. }));
}
