use super::naming::Names;

#[test]
fn unique_counts_from_two() {
    let mut names = Names::new();
    assert_eq!(names.unique("User"), "User");
    assert_eq!(names.unique("User"), "User2");
    assert_eq!(names.unique("User"), "User3");
    assert_eq!(names.unique("Post"), "Post");
}

#[test]
fn reserved_names_are_skipped() {
    let mut names = Names::new();
    names.reserve("Role");
    names.reserve("Role2");
    assert_eq!(names.unique("Role"), "Role3");
}
