use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        QuirlError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        QuirlError::unsupported_color("x")
            .to_string()
            .contains("unsupported color:")
    );
    assert!(
        QuirlError::asset_load("x")
            .to_string()
            .contains("asset load error:")
    );
    assert!(
        QuirlError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = QuirlError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
