//! Decoding the signed message and signed receipt samples of RFC 5035.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use hex_literal::hex;
use cmsder::cms::{
    self, find_attribute, parse_content_info, parse_content_info_with,
    parse_signed_data, resolved_attribute_value,
};
use cmsder::cms::schema::{ATTRIBUTE, CONTENT_INFO, SIGNED_ATTRIBUTES};
use cmsder::decode::{Pos, SetOrder};
use cmsder::ess::{
    self, AllOrFirstTier, ContentHints, Receipt, ReceiptRequest,
    ReceiptsFrom, SigningCertificate, msg_sig_digest, parse_receipt_content,
};
use cmsder::int::Integer;
use cmsder::schema::{self, Domain};
use cmsder::value::Components;
use cmsder::verify::{
    BindingError, BindingMismatch, check_resolved_round_trip,
    check_round_trip, declared_content_type, each_signed_attribute,
    encapsulated_bytes, receipt_binding, signed_attrs_der,
};
use cmsder::{
    Captured, DecodeOptions, ErrorKind, Oid, Registry, Value, extend,
};


//------------ Fixtures ------------------------------------------------------

const SIGNED_MESSAGE: &str = "\
MIIFzAYJKoZIhvcNAQcCoIIFvTCCBbkCAQExDTALBglghkgBZQMEAgIwUQYJKoZI
hvcNAQcBoEQEQkNvbnRlbnQtVHlwZTogdGV4dC9wbGFpbg0KDQpXYXRzb24sIGNv
bWUgaGVyZSAtIEkgd2FudCB0byBzZWUgeW91LqCCAnwwggJ4MIIB/qADAgECAgkA
pbNUKBuwbjswCgYIKoZIzj0EAwMwPzELMAkGA1UEBhMCVVMxCzAJBgNVBAgMAlZB
MRAwDgYDVQQHDAdIZXJuZG9uMREwDwYDVQQKDAhCb2d1cyBDQTAeFw0xOTA1Mjkx
NDQ1NDFaFw0yMDA1MjgxNDQ1NDFaMHAxCzAJBgNVBAYTAlVTMQswCQYDVQQIEwJW
QTEQMA4GA1UEBxMHSGVybmRvbjEQMA4GA1UEChMHRXhhbXBsZTEOMAwGA1UEAxMF
QWxpY2UxIDAeBgkqhkiG9w0BCQEWEWFsaWNlQGV4YW1wbGUuY29tMHYwEAYHKoZI
zj0CAQYFK4EEACIDYgAE+M2fBy/sRA6V1pKFqecRTE8+LuAHtZxes1wmJZrBBg+b
z7uYZfYQxI3dVB0YCSD6Mt3yXFlnmfBRwoqyArbjIBYrDbHBv2k8Csg2DhQ7qs/w
to8hMKoFgkcscqIbiV7Zo4GUMIGRMAsGA1UdDwQEAwIHgDBCBglghkgBhvhCAQ0E
NRYzVGhpcyBjZXJ0aWZpY2F0ZSBjYW5ub3QgYmUgdHJ1c3RlZCBmb3IgYW55IHB1
cnBvc2UuMB0GA1UdDgQWBBTEuloOPnrjPIGw9AKqaLsW4JYONTAfBgNVHSMEGDAW
gBTyNds0BNqlVfK9aQOZsGLs4hUIwTAKBggqhkjOPQQDAwNoADBlAjBjuR/RNbgL
3kRhmn+PJTeKaL9sh/oQgHOYTgLmSnv3+NDCkhfKuMNoo/tHrkmihYgCMQC94Mae
rDIrQpi0IDh+v0QSAv9rMife8tClafXWtDwwL8MS7oAh0ymT446Uizxx3PUxggLQ
MIICzAIBATBMMD8xCzAJBgNVBAYTAlVTMQswCQYDVQQIDAJWQTEQMA4GA1UEBwwH
SGVybmRvbjERMA8GA1UECgwIQm9ndXMgQ0ECCQCls1QoG7BuOzALBglghkgBZQME
AgKgggH1MBgGCSqGSIb3DQEJAzELBgkqhkiG9w0BBwEwHAYJKoZIhvcNAQkFMQ8X
DTE5MDUyOTE4MjMxOVowJQYLKoZIhvcNAQkQAgcxFgQUAbWZQYhLO5wtUgsOCGtT
4V3aNhUwLwYLKoZIhvcNAQkQAgQxIDAeDBFXYXRzb24sIGNvbWUgaGVyZQYJKoZI
hvcNAQcBMDUGCyqGSIb3DQEJEAICMSYxJAIBAQYKKwYBBAGBrGABARMTQm9hZ3Vz
IFByaXZhY3kgTWFyazA/BgkqhkiG9w0BCQQxMgQwtuQipP2CZx7U96rGbUT06LC5
jVFYccZW5/CaNvpcrOPiChDm2vI3m4k300z5mSZsME0GCyqGSIb3DQEJEAIBMT4w
PAQgx08hD2QnVwj1DoeRELNtdZ0PffW4BQIvcwwVc/goU6OAAQEwFTATgRFhbGlj
ZUBleGFtcGxlLmNvbTCBmwYLKoZIhvcNAQkQAi8xgYswgYgwdjB0BCACcp04gyM2
dTDg+0ydCwlucr6Mg8Wd3J3c9V+iLHsnZzBQMEOkQTA/MQswCQYDVQQGEwJVUzEL
MAkGA1UECAwCVkExEDAOBgNVBAcMB0hlcm5kb24xETAPBgNVBAoMCEJvZ3VzIENB
AgkApbNUKBuwbjswDjAMBgorBgEEAYGsYAEBMAoGCCqGSM49BAMDBGcwZQIxAO3K
D9YjFTKE3p383VVw/ol79WTVoMea4H1+7xn+3E1XO4oyb7qwQz0KmsGfdqWptgIw
T9yMtRLN5ZDU14y+Phzq9NKpSw/x5KyXoUKjCMc3Ru6dIW+CgcRQees+dhnvuD5U
";

const SIGNED_RECEIPT: &str = "\
MIIE3gYJKoZIhvcNAQcCoIIEzzCCBMsCAQMxDTALBglghkgBZQMEAgEwga4GCyqGSIb3DQEJ
EAEBoIGeBIGbMIGYAgEBBgkqhkiG9w0BBwEEIMdPIQ9kJ1cI9Q6HkRCzbXWdD331uAUCL3MM
FXP4KFOjBGYwZAIwOLV5WCbYjy5HLHE69IqXQQHVDJQzmo18WwkFrEYH3EMsvpXEIGqsFTFN
6NV4VBe9AjA5fGOCP5IhI32YqmGfs+zDlqZyb2xSX6Gr/IfCIm0angfOI39g7lAZDyivjh5H
/oSgggJ3MIICczCCAfqgAwIBAgIJAKWzVCgbsG48MAoGCCqGSM49BAMDMD8xCzAJBgNVBAYT
AlVTMQswCQYDVQQIDAJWQTEQMA4GA1UEBwwHSGVybmRvbjERMA8GA1UECgwIQm9ndXMgQ0Ew
HhcNMTkwNTI5MTkyMDEzWhcNMjAwNTI4MTkyMDEzWjBsMQswCQYDVQQGEwJVUzELMAkGA1UE
CBMCVkExEDAOBgNVBAcTB0hlcm5kb24xEDAOBgNVBAoTB0V4YW1wbGUxDDAKBgNVBAMTA0Jv
YjEeMBwGCSqGSIb3DQEJARYPYm9iQGV4YW1wbGUuY29tMHYwEAYHKoZIzj0CAQYFK4EEACID
YgAEMaRiVS8WvN8Ycmpfq75jBbOMUukNfXAg6AL0JJBXtIFAuIJcZVlkLn/xbywkcMLHK/O+
w9RWUQa2Cjw+h8b/1Cl+gIpqLtE558bD5PfM2aYpJ/YE6yZ9nBfTQs7z1TH5o4GUMIGRMAsG
A1UdDwQEAwIHgDBCBglghkgBhvhCAQ0ENRYzVGhpcyBjZXJ0aWZpY2F0ZSBjYW5ub3QgYmUg
dHJ1c3RlZCBmb3IgYW55IHB1cnBvc2UuMB0GA1UdDgQWBBTKa2Zy3iybV3+YjuLDKtNmjsIa
pTAfBgNVHSMEGDAWgBTyNds0BNqlVfK9aQOZsGLs4hUIwTAKBggqhkjOPQQDAwNnADBkAjAV
boS6OfEYQomLDi2RUkd71hzwwiQZztbxNbosahIzjR8ZQaHhjdjJlrP/T6aXBwsCMDfRweYz
3Ce4E4wPfoqQnvqpM7ZlfhstjQQGOsWAtIIfqW/l+TgCO8ux3XLV6fj36zGCAYkwggGFAgEB
MEwwPzELMAkGA1UEBhMCVVMxCzAJBgNVBAgMAlZBMRAwDgYDVQQHDAdIZXJuZG9uMREwDwYD
VQQKDAhCb2d1cyBDQQIJAKWzVCgbsG48MAsGCWCGSAFlAwQCAaCBrjAaBgkqhkiG9w0BCQMx
DQYLKoZIhvcNAQkQAQEwHAYJKoZIhvcNAQkFMQ8XDTE5MDUyOTE5MzU1NVowLwYJKoZIhvcN
AQkEMSIEIGb9Hm2kCnM0CYNpZU4Uj7dN0AzOieIn9sDqZMcIcZrEMEEGCyqGSIb3DQEJEAIF
MTIEMBZzeHVja7fQ62ywyh8rtKzBP1WJooMdZ+8c6pRqfIESYIU5bQnH99OPA51QCwdOdjAK
BggqhkjOPQQDAgRoMGYCMQDZiT22xgab6RFMAPvN4fhWwzx017EzttD4VaYrpbolropBdPJ6
jIXiZQgCwxbGTCwCMQClaQ9K+L5LTeuW50ZKSIbmBZQ5dxjtnK3OlS7hYRi6U0JKZmWbbuS8
vFIgX7eIkd8=
";

fn fixture(text: &str) -> Bytes {
    let text: String = text.split_whitespace().collect();
    STANDARD.decode(text).unwrap().into()
}

/// The offset and length of the signer’s signed attributes in the message.
const MESSAGE_ATTRS: (usize, usize) = (866, 505);

/// The offsets of the first two signed attributes in the receipt.
const RECEIPT_ATTRS: (usize, usize, usize) = (958, 986, 1016);


//------------ Signed Message ------------------------------------------------

#[test]
fn message_round_trip() {
    let data = fixture(SIGNED_MESSAGE);
    let info = parse_content_info(data.clone()).unwrap();
    assert_eq!(declared_content_type(&info), &cms::oid::SIGNED_DATA);
    assert_eq!(info.encode().unwrap(), data);
    check_resolved_round_trip(info.value()).unwrap();

    let signed = parse_signed_data(&info).unwrap();
    assert_eq!(signed.encode().unwrap(), info.content().raw().as_slice());
    assert_eq!(signed.version().to_i64(), Some(1));
    assert_eq!(signed.certificates().map(<[_]>::len), Some(1));
    assert!(signed.crls().is_none());
    assert_eq!(
        encapsulated_bytes(&signed).map(Bytes::as_ref),
        Some(
            b"Content-Type: text/plain\r\n\r\n\
              Watson, come here - I want to see you.".as_ref()
        )
    );

    check_round_trip(
        &CONTENT_INFO, data.clone(), Registry::standard(),
        &DecodeOptions::default()
    ).unwrap();
    check_round_trip(
        &CONTENT_INFO, data, Registry::standard(), &DecodeOptions::opaque()
    ).unwrap();
}

#[test]
fn message_ess_attributes() {
    let info = parse_content_info(fixture(SIGNED_MESSAGE)).unwrap();
    let signed = parse_signed_data(&info).unwrap();
    let signer = &signed.signer_infos()[0];
    let overlay = ess::overlay();

    let mut ess_attrs = 0;
    for attr in each_signed_attribute(signer) {
        let value = attr.first_value().unwrap();
        if overlay.contains(Domain::Attribute, attr.attr_type()) {
            ess_attrs += 1;
            let res = value.resolution().unwrap();
            assert_eq!(
                schema::encode(res.schema, &res.value).unwrap(),
                value.raw().as_slice()
            );
        }
        // All attribute types of the message are known.
        assert!(value.is_resolved());
    }
    assert_eq!(ess_attrs, 5);
    assert_eq!(each_signed_attribute(signer).count(), 8);

    let attrs = signer.signed_attrs().unwrap();
    assert!(find_attribute(attrs, &cms::oid::MESSAGE_DIGEST).is_some());
    assert_eq!(
        resolved_attribute_value(
            attrs, &ess::oid::AA_CONTENT_IDENTIFIER, Registry::standard()
        ).unwrap(),
        Some(Value::OctetString(Bytes::copy_from_slice(
            &hex!("01b59941884b3b9c2d520b0e086b53e15dda3615")
        )))
    );
    assert_eq!(msg_sig_digest(signer).unwrap(), None);

    let der = signed_attrs_der(signer).unwrap().unwrap();
    let data = fixture(SIGNED_MESSAGE);
    let (start, len) = MESSAGE_ATTRS;
    assert_eq!(der[0], 0x31);
    assert_eq!(&der[1..], &data[start + 1..start + len]);
}

#[test]
fn message_typed_attributes() {
    let info = parse_content_info(fixture(SIGNED_MESSAGE)).unwrap();
    let signed = parse_signed_data(&info).unwrap();
    let signer = &signed.signer_infos()[0];

    let request = ReceiptRequest::from_signer(signer).unwrap().unwrap();
    assert_eq!(
        request.signed_content_identifier().as_ref(),
        hex!(
            "c74f210f64275708f50e879110b36d75"
            "9d0f7df5b805022f730c1573f82853a3"
        )
    );
    assert_eq!(
        request.receipts_from(),
        &ReceiptsFrom::AllOrFirstTier(AllOrFirstTier::FirstTierRecipients)
    );
    assert_eq!(
        request.receipts_to()[0][0].as_rfc822_name(),
        Some("alice@example.com")
    );

    let hints = ContentHints::from_signer(signer).unwrap().unwrap();
    assert_eq!(hints.content_description(), Some("Watson, come here"));
    assert_eq!(hints.content_type(), &cms::oid::DATA);

    let cert = match SigningCertificate::from_signer(signer).unwrap() {
        Some(SigningCertificate::V2(cert)) => cert,
        other => panic!("unexpected signing certificate {:?}", other)
    };
    let cert_id = &cert.certs()[0];
    assert_eq!(cert_id.hash_algorithm().algorithm(), &cms::oid::SHA256);
    assert_eq!(
        cert_id.cert_hash().as_ref(),
        hex!(
            "02729d388323367530e0fb4c9d0b096e"
            "72be8c83c59ddc9ddcf55fa22c7b2767"
        )
    );
    let issuer_serial = cert_id.issuer_serial().unwrap();
    assert_eq!(
        issuer_serial.serial_number().as_slice(),
        hex!("00a5b354281bb06e3b")
    );
    assert_eq!(
        issuer_serial.issuer()[0].as_directory_name()
            .map(|name| name.rdns().len()),
        Some(4)
    );
    assert_eq!(
        cert.policies().unwrap()[0].policy_identifier().to_string(),
        "1.3.6.1.4.1.22112.1.1"
    );
}

#[test]
fn message_idempotence() {
    let data = fixture(SIGNED_MESSAGE);
    let first = parse_content_info(data.clone()).unwrap();
    let second = parse_content_info(data).unwrap();
    assert_eq!(first.value(), second.value());
}

#[test]
fn message_registries() {
    let data = fixture(SIGNED_MESSAGE);

    // Every open type of the message is bound in the standard registry.
    parse_content_info_with(
        data.clone(), Registry::standard(), &DecodeOptions::require_all()
    ).unwrap();

    // Without the ESS overlay the ESS attributes are unknown.
    let base = extend(&cms::registry(), &Registry::new());
    let info = parse_content_info_with(
        data.clone(), &base, &DecodeOptions::default()
    ).unwrap();
    let signed = parse_signed_data(&info).unwrap();
    let attrs = signed.signer_infos()[0].signed_attrs().unwrap();
    let hint = find_attribute(attrs, &ess::oid::AA_CONTENT_HINT).unwrap();
    assert!(!hint.first_value().unwrap().is_resolved());
    assert_eq!(
        resolved_attribute_value(attrs, &ess::oid::AA_CONTENT_HINT, &base)
            .unwrap(),
        None
    );
    assert_eq!(info.encode().unwrap(), data);

    assert_eq!(
        parse_content_info_with(data, &base, &DecodeOptions::require_all())
            .unwrap_err().kind(),
        ErrorKind::UnknownOpenType
    );
}


//------------ Signed Receipt ------------------------------------------------

#[test]
fn receipt_round_trip() {
    let data = fixture(SIGNED_RECEIPT);
    let info = parse_content_info(data.clone()).unwrap();
    assert_eq!(info.encode().unwrap(), data);
    check_resolved_round_trip(info.value()).unwrap();

    let signed = parse_signed_data(&info).unwrap();
    assert_eq!(
        signed.encap_content_info().content_type(), &ess::oid::CT_RECEIPT
    );
    let receipt = parse_receipt_content(&signed).unwrap();
    assert_eq!(receipt.version().to_i64(), Some(Receipt::VERSION));
    assert_eq!(receipt.content_type(), &cms::oid::DATA);
    assert_eq!(
        receipt.encode().unwrap(),
        encapsulated_bytes(&signed).unwrap().as_ref()
    );

    let digest = msg_sig_digest(&signed.signer_infos()[0]).unwrap().unwrap();
    assert_eq!(digest.len(), 48);
    assert_eq!(&digest[..4], hex!("16737875"));
}

#[test]
fn receipt_binding_to_message() {
    let message = parse_signed_data(
        &parse_content_info(fixture(SIGNED_MESSAGE)).unwrap()
    ).unwrap();
    let receipt_data = parse_signed_data(
        &parse_content_info(fixture(SIGNED_RECEIPT)).unwrap()
    ).unwrap();
    let receipt = parse_receipt_content(&receipt_data).unwrap();

    // The samples were produced independently, the signature differs.
    match receipt_binding(&message, &receipt) {
        Err(BindingError::Mismatch(mismatches)) => {
            assert_eq!(mismatches, [BindingMismatch::OriginatorSignature]);
        }
        other => panic!("unexpected binding result {:?}", other)
    }

    // A receipt with the message’s signature is bound.
    let bound = Receipt::from_value(Value::Constructed(
        Components::new()
            .with("version", Value::Integer(Integer::from_i64(1)))
            .with("contentType", Value::Oid(cms::oid::DATA.into()))
            .with(
                "signedContentIdentifier",
                Value::OctetString(
                    receipt.signed_content_identifier().clone()
                )
            )
            .with(
                "originatorSignatureValue",
                Value::OctetString(
                    message.signer_infos()[0].signature().clone()
                )
            )
    )).unwrap();
    receipt_binding(&message, &bound).unwrap();

    // The receipt itself doesn’t request a receipt.
    assert!(matches!(
        receipt_binding(&receipt_data, &bound),
        Err(BindingError::NoReceiptRequest)
    ));
}

#[test]
fn receipt_set_order() {
    let data = fixture(SIGNED_RECEIPT);
    let (first, second, end) = RECEIPT_ATTRS;
    let mut swapped = data[..first].to_vec();
    swapped.extend_from_slice(&data[second..end]);
    swapped.extend_from_slice(&data[first..second]);
    swapped.extend_from_slice(&data[end..]);
    let swapped = Bytes::from(swapped);

    let err = parse_content_info(swapped.clone()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OpenTypeDecodeFailure);
    assert_eq!(
        err.inner().map(|err| err.kind()),
        Some(ErrorKind::NonCanonicalEncoding)
    );

    let relaxed = DecodeOptions::default().with_set_order(SetOrder::Relaxed);
    let info = parse_content_info_with(
        swapped.clone(), Registry::standard(), &relaxed
    ).unwrap();
    assert_eq!(info.encode().unwrap(), data);

    let err = check_round_trip(
        &CONTENT_INFO, swapped, Registry::standard(), &relaxed
    ).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RoundTripViolation);
    assert_eq!(err.pos(), Pos::from(first + 1));
}

#[test]
fn receipt_error_positions() {
    let message = parse_signed_data(
        &parse_content_info(fixture(SIGNED_MESSAGE)).unwrap()
    ).unwrap();
    let err = parse_receipt_content(&message).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedContentType);
    assert_eq!(err.pos(), Pos::from(43));

    let receipt = parse_signed_data(
        &parse_content_info(fixture(SIGNED_RECEIPT)).unwrap()
    ).unwrap();
    assert_eq!(
        receipt.encap_content_info().content_pos(), Some(Pos::from(63))
    );

    // Receipt version 2 at offset 66.
    let mut data = fixture(SIGNED_RECEIPT).to_vec();
    assert_eq!(data[66..69], hex!("020101"));
    data[68] = 2;
    let receipt = parse_signed_data(
        &parse_content_info(Bytes::from(data)).unwrap()
    ).unwrap();
    let err = parse_receipt_content(&receipt).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
    assert_eq!(err.pos(), Pos::from(66));
}


//------------ Attributes ----------------------------------------------------

#[test]
fn attribute_resolution() {
    use cmsder::registry::resolve;

    let options = DecodeOptions::default();
    let unknown: Oid = "1.2.3.4".parse().unwrap();
    let value = Captured::from_bytes(Bytes::from_static(b"\x04\x01\x00"))
        .unwrap();
    assert_eq!(
        resolve(
            Registry::standard(), Domain::Attribute, &unknown, &value,
            &options
        ).unwrap(),
        None
    );

    // A message digest that is an INTEGER.
    let malformed = Captured::from_bytes(
        Bytes::from_static(b"\x02\x01\x01")
    ).unwrap();
    let err = resolve(
        Registry::standard(), Domain::Attribute,
        &cms::oid::MESSAGE_DIGEST.into(), &malformed, &options
    ).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OpenTypeDecodeFailure);
    assert_eq!(
        err.inner().map(|err| err.kind()), Some(ErrorKind::SchemaMismatch)
    );
}

#[test]
fn non_empty_sets() {
    fn decode(
        target: &'static schema::Schema, data: &'static [u8]
    ) -> Result<Value, cmsder::DecodeError> {
        schema::decode(
            target, Bytes::from_static(data), Registry::standard(),
            &DecodeOptions::default()
        )
    }

    // An attribute without values.
    assert_eq!(
        decode(
            &ATTRIBUTE,
            b"\x30\x0d\x06\x09\x2a\x86\x48\x86\xf7\x0d\x01\x09\x04\x31\x00"
        ).unwrap_err().kind(),
        ErrorKind::SchemaMismatch
    );
    let attr = decode(
        &ATTRIBUTE,
        b"\x30\x11\x06\x09\x2a\x86\x48\x86\xf7\x0d\x01\x09\x04\
          \x31\x04\x04\x02\xab\xcd"
    ).unwrap();
    assert_eq!(
        attr.get("attrValues").and_then(Value::as_list).map(<[_]>::len),
        Some(1)
    );

    // Signed attributes without attributes.
    assert_eq!(
        decode(&SIGNED_ATTRIBUTES, b"\x31\x00").unwrap_err().kind(),
        ErrorKind::SchemaMismatch
    );
}
