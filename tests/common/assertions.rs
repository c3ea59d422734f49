use pyxml::ast::AstNode;
use pyxml::lexer::tokenize;
use pyxml::{convert, reconstruct, serialize, Conversion, ConvertError, ConvertOptions};
use pyxml::SerializeOptions;

/// Convert source with its AST, failing the test on any error
pub fn convert_source(source: &str, ast: &AstNode) -> Conversion {
    let tokens = tokenize(source).expect("Expected source to tokenize");
    match convert(&tokens, ast, ConvertOptions::strict()) {
        Ok(conversion) => conversion,
        Err(e) => panic!("Conversion failed: {}\nsource: {:?}", e, source),
    }
}

/// Assert that conversion fails, returning the error
pub fn assert_convert_fails(source: &str, ast: &AstNode) -> ConvertError {
    let tokens = tokenize(source).expect("Expected source to tokenize");
    match convert(&tokens, ast, ConvertOptions::default()) {
        Ok(conversion) => panic!(
            "Expected conversion to fail, got {:?}",
            conversion.tree.text()
        ),
        Err(e) => e,
    }
}

/// Assert the full round trip: tree text, then XML and back
pub fn assert_round_trip(source: &str, ast: &AstNode) -> Conversion {
    let conversion = convert_source(source, ast);
    assert!(conversion.is_lossless(), "degraded: {:?}", conversion.degradations);
    assert_eq!(conversion.tree.text(), source, "tree text differs");

    let xml = serialize(&conversion.tree, &SerializeOptions::default());
    let restored = reconstruct(&xml).expect("Expected generated XML to read back");
    assert_eq!(restored, source, "restored source differs\nxml: {}", xml);
    conversion
}
