//! Integration tests for tokenizing, syntax validation and the block tree.

use blueprint::parser::{
    DEFAULT_MAX_DEPTH, Guard, Node, SyntaxErrorKind, TokenKind, extract_functions,
    extract_variables, parse, parse_template, parse_template_with_depth, validate_syntax,
};

// =============================================================================
// Tokenizer
// =============================================================================

#[test]
fn tokenize_every_marker_family() {
    let tokens = parse("Hi {{name}} {{MATH.sum(1, 2)}}{{#if x}}a{{elif y}}b{{else}}c{{/if}}");
    let kinds: Vec<&TokenKind> = tokens.iter().map(|t| &t.kind).collect();
    assert_eq!(
        kinds,
        [
            &TokenKind::Text,
            &TokenKind::Variable,
            &TokenKind::Text,
            &TokenKind::Function,
            &TokenKind::Open("if".to_string()),
            &TokenKind::Text,
            &TokenKind::Elif,
            &TokenKind::Text,
            &TokenKind::Else,
            &TokenKind::Text,
            &TokenKind::Close("if".to_string()),
        ]
    );
    assert_eq!(tokens[1].content, "name");
    assert_eq!(tokens[3].content, "MATH.sum(1, 2)");
    assert_eq!(tokens[4].content, "x");
    assert_eq!(tokens[6].content, "y");
}

#[test]
fn tokenize_keeps_spans() {
    let template = "ab {{ name }} cd";
    let tokens = parse(template);
    assert_eq!(&template[tokens[1].span.clone()], "{{ name }}");
    assert_eq!(tokens[1].content, "name");
}

#[test]
fn tokenize_text_only() {
    let tokens = parse("no markers here");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Text);
    assert_eq!(tokens[0].content, "no markers here");
}

#[test]
fn tokenize_unmatched_open_is_text() {
    let tokens = parse("a {{ b");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].content, "a {{ b");
}

#[test]
fn tokenize_empty_marker_is_text() {
    let tokens = parse("x{{  }}y");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].content, "x{{  }}y");
}

#[test]
fn tokenize_brace_balanced_marker() {
    let tokens = parse(r#"{{#for k, v in {"a":1,"b":2}}}{{/for}}"#);
    assert_eq!(tokens[0].kind, TokenKind::Open("for".to_string()));
    assert_eq!(tokens[0].content, r#"k, v in {"a":1,"b":2}"#);
    assert_eq!(tokens[1].kind, TokenKind::Close("for".to_string()));
}

#[test]
fn tokenize_quoted_braces() {
    let tokens = parse(r#"{{STRING.upper("}}")}}"#);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Function);
    assert_eq!(tokens[0].content, r#"STRING.upper("}}")"#);
}

// =============================================================================
// Syntax Validation
// =============================================================================

#[test]
fn validate_balanced_blocks() {
    assert!(validate_syntax("{{#if a}}{{#for i in 1..2}}{{i}}{{/for}}{{/if}}").is_ok());
    assert!(validate_syntax("plain text").is_ok());
}

#[test]
fn validate_unclosed_block() {
    let errors = validate_syntax("{{#if true}}no close").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].kind,
        SyntaxErrorKind::Unclosed {
            keyword: "if".to_string()
        }
    );
    assert_eq!(errors[0].keyword(), "if");
    assert_eq!(errors[0].line, 1);
    assert_eq!(errors[0].to_string(), "line 1: block {{#if}} is never closed");
}

#[test]
fn validate_unexpected_close() {
    let errors = validate_syntax("text\n{{/for}}").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].kind,
        SyntaxErrorKind::UnexpectedClose {
            keyword: "for".to_string()
        }
    );
    assert_eq!(errors[0].line, 2);
    assert_eq!(errors[0].column, 1);
    assert_eq!(errors[0].offset, 5);
    assert_eq!(errors[0].len, 8);
}

#[test]
fn validate_mismatched_close() {
    let errors = validate_syntax("{{#if a}}\n{{#for x in xs}}\n{{/if}}").unwrap_err();
    assert_eq!(
        errors[0].kind,
        SyntaxErrorKind::MismatchedClose {
            expected: "for".to_string(),
            found: "if".to_string()
        }
    );
    assert_eq!(errors[0].line, 3);
    // The mismatched closer pops `for`, leaving `if` unclosed.
    assert_eq!(
        errors[1].kind,
        SyntaxErrorKind::Unclosed {
            keyword: "if".to_string()
        }
    );
    assert_eq!(errors.len(), 2);
}

#[test]
fn validate_collects_all_errors() {
    let errors = validate_syntax("{{/a}}{{/b}}{{#c}}").unwrap_err();
    assert_eq!(errors.len(), 3);
    let keywords: Vec<&str> = errors.iter().map(|e| e.keyword()).collect();
    assert_eq!(keywords, ["a", "b", "c"]);
}

#[test]
fn validate_different_keyword_nesting() {
    // An inner block of another keyword never hides the outer closer.
    assert!(validate_syntax("{{#for a in xs}}{{#if a}}{{#for b in ys}}{{/for}}{{/if}}{{/for}}").is_ok());
}

// =============================================================================
// Block Tree
// =============================================================================

#[test]
fn tree_for_inside_if() {
    let template = parse_template("{{#if true}}{{#for i in 1..2}}{{i}}{{/for}}{{/if}}").unwrap();
    let [Node::If(branches)] = template.nodes.as_slice() else {
        panic!("expected a single if node: {:?}", template.nodes);
    };
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].guard, Guard::If("true".to_string()));
    let [Node::For { target, body }] = branches[0].body.as_slice() else {
        panic!("expected a for node");
    };
    assert_eq!(target, "i in 1..2");
    assert_eq!(body, &[Node::Variable("i".to_string())]);
}

#[test]
fn tree_rejects_invalid_template() {
    let errors = parse_template("{{#switch x}}").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].keyword(), "switch");
}

#[test]
fn tree_rejects_nesting_past_the_limit() {
    let depth = 10_000;
    let template = format!("{}x{}", "{{#if true}}".repeat(depth), "{{/if}}".repeat(depth));
    assert!(validate_syntax(&template).is_ok());

    let errors = parse_template(&template).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].kind,
        SyntaxErrorKind::TooDeep {
            keyword: "if".to_string(),
            limit: DEFAULT_MAX_DEPTH
        }
    );
    // The first opener past the limit.
    assert_eq!(errors[0].offset, DEFAULT_MAX_DEPTH * "{{#if true}}".len());
}

#[test]
fn tree_custom_nesting_limit() {
    let template = "{{#if a}}{{#for i in xs}}{{i}}{{/for}}{{/if}}";
    assert!(parse_template_with_depth(template, 2).is_ok());
    let errors = parse_template_with_depth(template, 1).unwrap_err();
    assert_eq!(errors[0].keyword(), "for");
    assert_eq!(
        errors[0].to_string(),
        "line 1: block {{#for}} is nested more than 1 levels deep"
    );
}

#[test]
fn tree_function_call_arguments() {
    let template = parse_template(r#"{{STRING.replace(name, "a, b", 'c')}}"#).unwrap();
    let [Node::Call(call)] = template.nodes.as_slice() else {
        panic!("expected a call node");
    };
    assert_eq!(call.name, "STRING.replace");
    assert_eq!(call.args, ["name", r#""a, b""#, "'c'"]);
}

// =============================================================================
// Extraction
// =============================================================================

#[test]
fn extract_variables_in_first_appearance_order() {
    let names = extract_variables("{{b}} {{a}} {{b}} {{#if c}}{{d}}{{/if}} {{MATH.sum(e)}}");
    assert_eq!(names, ["b", "a", "d"]);
}

#[test]
fn extract_variables_skips_loop_bindings() {
    let names = extract_variables(
        "{{#for i in 1..3}}{{i}}{{/for}}{{i}} {{#for k, v in map}}{{k}}={{v.label}} {{title}}{{/for}}",
    );
    // `i` after its loop is a context variable again.
    assert_eq!(names, ["i", "title"]);
}

#[test]
fn extract_functions_in_source_order() {
    let calls = extract_functions("{{DATE.now()}} {{x}} {{MATH.round(v, 2)}} {{DATE.now()}}");
    let names: Vec<&str> = calls.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["DATE.now", "MATH.round", "DATE.now"]);
    assert_eq!(calls[1].args, ["v", "2"]);
}
