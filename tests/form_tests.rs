use lensforge::config::FormPolicy;
use lensforge::form::{copy_addition, normalize_axis_field, normalize_eye, normalize_power_field};
use lensforge::prescription::RawEyeEntry;
use rstest::rstest;

#[rstest]
#[case("1.5", "+1.50")]
#[case(" -2 ", "-2.00")]
#[case("0", "+0.00")]
#[case("-", "-")]
#[case("", "")]
#[case("abc", "abc")]
fn test_power_blur(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(normalize_power_field(raw), expected);
}

#[rstest]
#[case("90.0", "90")]
#[case(" 45 ", "45")]
#[case("", "")]
#[case("x", "x")]
fn test_axis_blur(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(normalize_axis_field(raw), expected);
}

#[test]
fn test_zero_cylinder_kept_by_default() {
    let raw = RawEyeEntry::builder().sphere("1").cylinder("0").axis("90").build();
    let eye = normalize_eye(&raw, &FormPolicy::default());
    assert_eq!(eye.sphere, "+1.00");
    assert_eq!(eye.cylinder, "+0.00");
    assert_eq!(eye.axis, "90");
}

#[test]
fn test_zero_cylinder_cleared_when_policy_says_so() {
    let raw = RawEyeEntry::builder().sphere("1").cylinder("0").axis("90").build();
    let policy = FormPolicy {
        clear_axis_on_zero_cylinder: true,
    };
    let eye = normalize_eye(&raw, &policy);
    assert_eq!(eye.cylinder, "");
    assert_eq!(eye.axis, "");
    assert_eq!(eye.sphere, "+1.00");
}

#[rstest]
#[case("+1.50", "", "+1.50", "+1.50")]
#[case("", "+2.00", "+2.00", "+2.00")]
#[case("+1.00", "+2.00", "+1.00", "+1.00")]
#[case("", "", "", "")]
fn test_copy_addition(
    #[case] right: &str,
    #[case] left: &str,
    #[case] new_right: &str,
    #[case] new_left: &str,
) {
    assert_eq!(
        copy_addition(right, left),
        (new_right.to_string(), new_left.to_string())
    );
}
