//! Reader tests: Python source in, syntax tree out.

#![cfg(feature = "read-python")]

use pythonjs_syntax::input::read_python;
use pythonjs_syntax::*;

fn parse(code: &str) -> Vec<Stmt> {
    read_python(code).expect("parse failed").body
}

fn name(id: &str) -> Expr {
    Expr::name(id)
}

#[test]
fn for_loop_with_print_statement() {
    assert_eq!(
        parse("for v in items:\n    print v\n"),
        vec![Stmt::for_loop(
            "v",
            name("items"),
            vec![Stmt::print(vec![name("v")])]
        )]
    );
}

#[test]
fn print_call_is_a_print_statement() {
    assert_eq!(
        parse("print(\"hi\")\n"),
        vec![Stmt::print(vec![Expr::string("hi")])]
    );
}

#[test]
fn elif_chain_nests_into_orelse() {
    let body = parse("if a:\n    x = 1\nelif b:\n    x = 2\nelse:\n    x = 3\n");
    assert_eq!(
        body,
        vec![Stmt::if_stmt(
            name("a"),
            vec![Stmt::assign(name("x"), Expr::int(1))],
            vec![Stmt::if_stmt(
                name("b"),
                vec![Stmt::assign(name("x"), Expr::int(2))],
                vec![Stmt::assign(name("x"), Expr::int(3))],
            )],
        )]
    );
}

#[test]
fn try_except_finally() {
    let body = parse(
        "try:\n    f()\nexcept TypeError as e:\n    pass\nexcept:\n    raise\nfinally:\n    done()\n",
    );
    assert_eq!(
        body,
        vec![Stmt::TryExcept {
            body: vec![Stmt::expr(Expr::call(name("f"), vec![]))],
            handlers: vec![
                ExceptHandler::new(Some(name("TypeError")), Some("e"), vec![Stmt::Pass]),
                ExceptHandler::new(None, None, vec![Stmt::raise(None)]),
            ],
            finalbody: vec![Stmt::expr(Expr::call(name("done"), vec![]))],
        }]
    );
}

#[test]
fn decorated_function_with_defaults() {
    let body = parse("@ns\ndef f(a, b=1):\n    return a, b\n");
    assert_eq!(
        body,
        vec![Stmt::function(
            FunctionDef::new(
                "f",
                vec!["a".into(), "b".into()],
                vec![Stmt::return_stmt(Some(Expr::tuple(vec![name("a"), name("b")])))],
            )
            .with_decorator(name("ns"))
        )]
    );
}

#[test]
fn chained_comparison() {
    assert_eq!(
        parse("a < b <= c\n"),
        vec![Stmt::expr(Expr::compare(
            name("a"),
            vec![(CmpOp::Lt, name("b")), (CmpOp::LtE, name("c"))]
        ))]
    );
}

#[test]
fn negated_membership_operators() {
    assert_eq!(
        parse("a not in b\n"),
        vec![Stmt::expr(Expr::compare(name("a"), vec![(CmpOp::NotIn, name("b"))]))]
    );
    assert_eq!(
        parse("a is not None\n"),
        vec![Stmt::expr(Expr::compare(name("a"), vec![(CmpOp::IsNot, name("None"))]))]
    );
}

#[test]
fn boolean_chain_is_flattened() {
    assert_eq!(
        parse("a and b and c\n"),
        vec![Stmt::expr(Expr::bool_op(
            BoolOperator::And,
            vec![name("a"), name("b"), name("c")]
        ))]
    );
}

#[test]
fn negative_literal_folds() {
    assert_eq!(
        parse("x = -1\ny = -z\n"),
        vec![
            Stmt::assign(name("x"), Expr::int(-1)),
            Stmt::assign(name("y"), Expr::unary(UnaryOperator::USub, name("z"))),
        ]
    );
}

#[test]
fn string_escapes_are_decoded() {
    assert_eq!(
        parse("s = 'it\\'s\\n'\nr = r'\\d'\n"),
        vec![
            Stmt::assign(name("s"), Expr::string("it's\n")),
            Stmt::assign(name("r"), Expr::string("\\d")),
        ]
    );
}

#[test]
fn chained_and_augmented_assignment() {
    assert_eq!(
        parse("a = b = 0\ni += 1\n"),
        vec![
            Stmt::Assign {
                targets: vec![name("a"), name("b")],
                value: Expr::int(0),
            },
            Stmt::aug_assign(name("i"), Operator::Add, Expr::int(1)),
        ]
    );
}

#[test]
fn imports() {
    assert_eq!(
        parse("import os\nfrom x import y\n"),
        vec![
            Stmt::Import {
                names: vec![Alias {
                    name: "os".into(),
                    asname: None
                }]
            },
            Stmt::ImportFrom {
                module: Some("x".into()),
                names: vec![Alias {
                    name: "y".into(),
                    asname: None
                }],
                level: 0,
            },
        ]
    );
}

#[test]
fn comments_are_skipped() {
    assert_eq!(parse("# leading\npass  # trailing\n"), vec![Stmt::Pass]);
}

#[test]
fn call_keywords_and_subscripts() {
    insta::assert_json_snapshot!(parse("JSObject(a=1)[0]\n"), @r#"
    [
      {
        "kind": "Expr",
        "value": {
          "kind": "Subscript",
          "value": {
            "kind": "Call",
            "func": {
              "kind": "Name",
              "id": "JSObject"
            },
            "args": [],
            "keywords": [
              {
                "arg": "a",
                "value": {
                  "kind": "Num",
                  "n": 1
                }
              }
            ]
          },
          "slice": {
            "kind": "Index",
            "value": {
              "kind": "Num",
              "n": 0
            }
          }
        }
      }
    ]
    "#);
}

#[test]
fn class_is_unsupported() {
    let err = read_python("x = 1\nclass A:\n    pass\n").unwrap_err();
    assert!(matches!(err, ReadError::Unsupported(_)));
    assert!(err.to_string().contains("line 2"), "{err}");
}

#[test]
fn comprehension_is_unsupported() {
    let err = read_python("xs = [x for x in y]\n").unwrap_err();
    assert!(matches!(err, ReadError::Unsupported(_)));
}
