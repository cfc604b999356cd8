use super::*;

#[test]
fn symbols_resolve_per_table() {
    assert_eq!(EnumTable::CullMode.lookup("back"), Some(2));
    assert_eq!(EnumTable::BlendOperation.lookup("add"), Some(1));
    assert_eq!(EnumTable::AlphaBlendFactor.lookup("src_alpha_sat"), Some(10));
    assert_eq!(EnumTable::TextureFilter.lookup("cmp_anisotropic"), Some(0x1F));
    assert_eq!(EnumTable::TextureAddressing.lookup("border"), Some(3));
    assert_eq!(EnumTable::ColorMask.lookup("all"), Some(0x0F));
    assert_eq!(EnumTable::CullMode.lookup("add"), None);
}

#[test]
fn integer_wins_over_symbol() {
    assert_eq!(EnumTable::CullMode.resolve("cull_mode", "2").unwrap(), 2);
    assert_eq!(EnumTable::CullMode.resolve("cull_mode", "back").unwrap(), 2);
    // Integers are not range-checked against the table.
    assert_eq!(EnumTable::CullMode.resolve("cull_mode", "7").unwrap(), 7);
}

#[test]
fn unknown_symbol_names_the_field() {
    let err = EnumTable::CompareFunction
        .resolve("depth_func", "sometimes")
        .unwrap_err();
    match err {
        FxmlError::UnknownEnumValue { field, value } => {
            assert_eq!(field, "depth_func");
            assert_eq!(value, "sometimes");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn integer_form_is_decimal() {
    assert_eq!(EnumTable::CullMode.resolve("cull_mode", "010").unwrap(), 10);
    assert_eq!(EnumTable::CullMode.resolve("cull_mode", " 09 ").unwrap(), 9);
    assert!(EnumTable::CullMode.resolve("cull_mode", "0x2").is_err());
}
