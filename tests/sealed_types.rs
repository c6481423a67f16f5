mod common;

use bidijson::{ErrorKind, JsonCodec};

use common::{party_codec, Company, Party, Person, TaxType};

#[rstest::rstest]
fn test_both_subtypes_round_trip() {
    let codec = party_codec();

    let ann = Party::Human(Person {
        name: "Ann".to_string(),
    });
    let text = codec.to_json(&ann).unwrap();
    assert_eq!(text, r#"{"_type": "person", "name": "Ann"}"#);
    assert_eq!(codec.from_json(&text).unwrap(), ann);

    let acme = Party::Corp(Company {
        name: "Acme".to_string(),
        tax_type: TaxType::Exempt,
    });
    let text = codec.to_json(&acme).unwrap();
    assert_eq!(
        text,
        r#"{"_type": "company", "name": "Acme", "tax_type": "Exempt"}"#
    );
    assert_eq!(codec.from_json(&text).unwrap(), acme);
}

#[rstest::rstest]
fn test_discriminator_renders_first_regardless_of_source_order() {
    let codec = party_codec();
    let decoded = codec
        .from_json(r#"{"name": "Acme", "tax_type": "EU", "_type": "company"}"#)
        .unwrap();
    let text = codec.to_json(&decoded).unwrap();
    assert!(text.starts_with(r#"{"_type": "company""#));
}

#[rstest::rstest]
fn test_unknown_subtype_is_a_named_failure() {
    let codec = party_codec();
    let error = codec
        .from_json(r#"{"_type": "alien", "name": "Zorg"}"#)
        .unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnknownSubtype);
    assert_eq!(error.location, "root");
    assert_eq!(error.reason, "subtype not known: alien");
}

#[rstest::rstest]
fn test_missing_discriminator_is_a_named_failure() {
    let codec = party_codec();
    let error = codec.from_json(r#"{"name": "Ann"}"#).unwrap_err();
    assert_eq!(error.kind, ErrorKind::MissingField);
    assert_eq!(error.reason, "discriminator field '_type' not found");
}

#[rstest::rstest]
fn test_bad_subtype_field_keeps_its_path() {
    let codec = party_codec();
    let error = codec
        .from_json(r#"{"_type": "company", "name": "Acme", "tax_type": "Galactic"}"#)
        .unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidValue);
    assert_eq!(error.location, "root/tax_type");
    assert!(error.reason.contains("not a valid TaxType: Galactic"));
}

#[rstest::rstest]
fn test_subtype_field_errors_still_aggregate() {
    let codec = party_codec();
    let error = codec.from_json(r#"{"_type": "company"}"#).unwrap_err();
    assert_eq!(error.kind, ErrorKind::Multiple);
    assert!(error.reason.contains("field 'name' not found"));
    assert!(error.reason.contains("field 'tax_type' not found"));
}
