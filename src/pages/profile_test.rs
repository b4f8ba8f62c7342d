use super::*;

#[test]
fn capitalize_role_names() {
    assert_eq!(capitalize("teacher"), "Teacher");
    assert_eq!(capitalize("élève"), "Élève");
    assert_eq!(capitalize(""), "");
}
