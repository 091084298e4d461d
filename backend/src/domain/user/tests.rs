//! Tests for the domain user model.

use super::*;
use rstest::rstest;
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[rstest]
fn user_id_rejects_empty_input() {
    let err = UserId::new("").expect_err("empty id should be rejected");
    assert_eq!(err, UserValidationError::EmptyId);
}

#[rstest]
#[case(VALID_ID)]
#[case("legacy-key-42")]
#[case(" abc")]
#[case("abc\t")]
#[case("   ")]
fn user_id_accepts_opaque_identifiers(#[case] raw: &str) {
    let id = UserId::new(raw).expect("valid id");
    assert_eq!(id.as_ref(), raw);
}

#[rstest]
fn random_ids_are_distinct_uuids() {
    let first = UserId::random();
    let second = UserId::random();

    assert_ne!(first, second);
    assert!(Uuid::parse_str(first.as_ref()).is_ok());
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn user_name_rejects_blank_input(#[case] raw: &str) {
    let err = UserName::new(raw).expect_err("blank name should be rejected");
    assert_eq!(err, UserValidationError::EmptyName);
}

#[rstest]
fn user_name_preserves_input() {
    let name = UserName::new("Alice").expect("valid name");
    assert_eq!(name.as_ref(), "Alice");
    assert_eq!(name.to_string(), "Alice");
}

#[rstest]
fn try_from_strings_builds_user() {
    let user = User::try_from_strings(VALID_ID, "Ada Lovelace").expect("valid user");

    assert_eq!(user.id().as_ref(), VALID_ID);
    assert_eq!(user.name().as_ref(), "Ada Lovelace");
}

#[rstest]
fn try_from_strings_reports_first_failure() {
    let err = User::try_from_strings("", "").expect_err("invalid user");
    assert_eq!(err, UserValidationError::EmptyId);
}

#[rstest]
fn deserialisation_validates_fields() {
    let valid = json!({ "id": VALID_ID, "name": "Alice" });
    let user: User = serde_json::from_value(valid).expect("valid payload");
    assert_eq!(user.name().as_ref(), "Alice");

    let invalid = json!({ "id": VALID_ID, "name": "  " });
    assert!(serde_json::from_value::<User>(invalid).is_err());
}

#[rstest]
fn validation_errors_have_readable_messages() {
    assert_eq!(
        UserValidationError::EmptyName.to_string(),
        "user name must not be empty"
    );
    assert_eq!(
        UserValidationError::EmptyId.to_string(),
        "user id must not be empty"
    );
}
