use imgsign::encoding::{decode_base64url, decode_hex, encode_base64url, encode_hex};
use imgsign::SignError;

#[test]
fn hex_decodes_either_case() {
    assert_eq!(decode_hex("0aFF10").unwrap(), vec![0x0a, 0xff, 0x10]);
    assert_eq!(decode_hex("0aff10").unwrap(), decode_hex("0AFF10").unwrap());
    assert!(decode_hex("").unwrap().is_empty());
}

#[test]
fn hex_round_trip() {
    let key = "943b421c9eb07c830af81030552c86009268de4e532ba2ee2eab8247c6da0881";
    let bytes = decode_hex(key).unwrap();
    assert_eq!(bytes.len(), key.len() / 2);
    assert_eq!(encode_hex(&bytes), key);
}

#[test]
fn hex_rejects_odd_length() {
    for input in ["a", "abc", "0a0"] {
        let err = decode_hex(input).unwrap_err();
        assert!(matches!(err, SignError::InvalidArgument(_)), "{}", input);
    }
}

#[test]
fn hex_rejects_non_hex() {
    let err = decode_hex("zz").unwrap_err();
    assert!(matches!(err, SignError::InvalidArgument(ref msg) if msg.contains("'z'")));
}

#[test]
fn base64url_alphabet_without_padding() {
    assert_eq!(encode_base64url(&[]), "");
    assert_eq!(encode_base64url(&[0xfb, 0xff, 0xfe]), "-__-");
    assert_eq!(encode_base64url(b"hi"), "aGk");
    assert_eq!(
        encode_base64url(b"http://img.example.com/pretty/image.jpg"),
        "aHR0cDovL2ltZy5leGFtcGxlLmNvbS9wcmV0dHkvaW1hZ2UuanBn"
    );
}

#[test]
fn base64url_decode_tolerates_padding() {
    assert_eq!(decode_base64url("aGk").unwrap(), b"hi");
    assert_eq!(decode_base64url("aGk=").unwrap(), b"hi");
    assert_eq!(decode_base64url("-__-").unwrap(), vec![0xfb, 0xff, 0xfe]);
    assert!(decode_base64url("a+b/").is_err());
}
