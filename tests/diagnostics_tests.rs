use insta::assert_snapshot;
use jxc::parser::JumpParser;

fn first_error_rendered(source: &str) -> String {
    let mut parser = JumpParser::new(source);
    while parser.next() {}
    let diag = parser.error().expect("expected a parse error").clone().resolved(source);
    diag.render(source)
}

#[test]
fn two_commas_in_an_array_renders_with_position_and_excerpt() {
    let rendered = first_error_rendered("[1,,2]");
    assert_snapshot!(rendered, @"two commas with no value between them (line 1, col 4, `2`)");
}

#[test]
fn unterminated_object_renders_with_position_and_excerpt() {
    let rendered = first_error_rendered("{a: 1");
    assert_snapshot!(rendered, @"unterminated object: expected `}` (line 1, col 5, ``)");
}
