/// Artifact left behind when a phone column was read as a float.
const FLOAT_ARTIFACT: &str = ".0";

/// Remove every `.0` substring from an imported phone value.
///
/// Runs to a fixed point, so removing one occurrence cannot expose another
/// (`"..00"` becomes `""`, not `".0"`). Other characters are kept; digit
/// extraction happens when the deep link is built.
pub fn normalize_phone(raw: &str) -> String {
    let mut phone = raw.to_string();
    while phone.contains(FLOAT_ARTIFACT) {
        phone = phone.replace(FLOAT_ARTIFACT, "");
    }
    phone
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_float_suffix() {
        assert_eq!(normalize_phone("0501112222.0"), "0501112222");
        assert_eq!(normalize_phone("501112222.0"), "501112222");
    }

    #[test]
    fn strips_every_occurrence() {
        assert_eq!(normalize_phone("050.0111.02222"), "0501112222");
        assert_eq!(normalize_phone("..00"), "");
    }

    #[test]
    fn keeps_other_formatting() {
        assert_eq!(normalize_phone("050-111-2222"), "050-111-2222");
        assert_eq!(normalize_phone("+972 50 111 2222"), "+972 50 111 2222");
        assert_eq!(normalize_phone(""), "");
    }
}
