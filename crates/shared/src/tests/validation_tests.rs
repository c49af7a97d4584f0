use super::*;

fn valid_draft() -> StudentDraft {
    StudentDraft {
        name: "Amaya Perera".to_string(),
        nic: "123456789V".to_string(),
        course: "Software Engineering".to_string(),
        contact: "0712345678".to_string(),
    }
}

#[test]
fn accepts_both_nic_shapes() {
    assert!(is_valid_nic("123456789V"));
    assert!(is_valid_nic("123456789v"));
    assert!(is_valid_nic("123456789X"));
    assert!(is_valid_nic("123456789x"));
    assert!(is_valid_nic("123456789012"));
}

#[test]
fn rejects_malformed_nic() {
    assert!(!is_valid_nic("12345678V"));
    assert!(!is_valid_nic("abcdefghiV"));
    assert!(!is_valid_nic("123456789A"));
    assert!(!is_valid_nic("12345678901"));
    assert!(!is_valid_nic("1234567890123"));
    assert!(!is_valid_nic("123456789012V"));
    assert!(!is_valid_nic(""));
}

#[test]
fn contact_requires_exactly_ten_digits() {
    assert!(is_valid_contact("0712345678"));
    assert!(!is_valid_contact("071234567"));
    assert!(!is_valid_contact("07123456789"));
    assert!(!is_valid_contact("07123-5678"));
}

#[test]
fn valid_draft_passes() {
    assert!(validate_draft(&valid_draft()).is_ok());
}

#[test]
fn empty_draft_reports_every_field_as_required() {
    let err = validate_draft(&StudentDraft::default()).expect_err("empty draft");
    assert_eq!(err.fields().collect::<Vec<_>>(), StudentField::ALL.to_vec());
    assert!(err
        .violations
        .iter()
        .all(|v| v.code == ViolationCode::Required));
}

#[test]
fn whitespace_name_is_treated_as_missing() {
    let mut draft = valid_draft();
    draft.name = "   ".to_string();
    let err = validate_draft(&draft).expect_err("blank name");
    assert_eq!(err.fields().collect::<Vec<_>>(), vec![StudentField::Name]);
}

#[test]
fn pattern_violations_name_the_field() {
    let mut draft = valid_draft();
    draft.nic = "12345678V".to_string();
    draft.contact = "071234567".to_string();
    let err = validate_draft(&draft).expect_err("bad patterns");
    assert_eq!(
        err.fields().collect::<Vec<_>>(),
        vec![StudentField::Nic, StudentField::Contact]
    );
    assert!(err.summary().contains("valid NIC"));
    assert!(err.summary().contains("10-digit"));
}

#[test]
fn patch_validation_ignores_absent_fields() {
    let patch = StudentPatch {
        course: Some("Data Science".to_string()),
        ..StudentPatch::default()
    };
    assert!(validate_patch(&patch).is_ok());

    let patch = StudentPatch {
        contact: Some("123".to_string()),
        ..StudentPatch::default()
    };
    let err = validate_patch(&patch).expect_err("bad contact");
    assert_eq!(err.fields().collect::<Vec<_>>(), vec![StudentField::Contact]);
}
