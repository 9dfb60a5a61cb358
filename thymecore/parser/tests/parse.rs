use thyme_ast::{BinOp, Expr, PrintArg, Stmt, UnaryOp};
use thyme_parser::parse;

// Strip the interleaved line markers so tests can match statement shapes
fn stmts(src: &str) -> Vec<Stmt> {
    parse(src)
        .unwrap()
        .into_iter()
        .filter(|s| !matches!(s, Stmt::Line(_)))
        .collect()
}

#[test]
fn let_and_print_forms() {
    let prog = stmts("LET x = 1\nPRINT x\nPRINT \"done\"\n");
    assert_eq!(prog.len(), 3);
    assert!(matches!(&prog[0], Stmt::Let { name, .. } if name == "x"));
    assert!(matches!(&prog[1], Stmt::Print(PrintArg::Expr(Expr::Var(v))) if v == "x"));
    assert!(matches!(&prog[2], Stmt::Print(PrintArg::Text(t)) if t == "done"));
}

#[test]
fn label_goto_input_forms() {
    let prog = stmts("LABEL top\nINPUT n\nGOTO top\n");
    assert!(matches!(&prog[0], Stmt::Label(n) if n == "top"));
    assert!(matches!(&prog[1], Stmt::Input { name } if name == "n"));
    assert!(matches!(&prog[2], Stmt::Goto(n) if n == "top"));
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let prog = stmts("LET a = 1+2*3\n");
    let Stmt::Let { init, .. } = &prog[0] else { panic!("expected LET") };
    let Expr::Binary { op: BinOp::Add, rhs, .. } = init else { panic!("expected Add at the top") };
    assert!(matches!(**rhs, Expr::Binary { op: BinOp::Mul, .. }));
}

#[test]
fn addition_is_left_associative() {
    let prog = stmts("LET a = 1-2-3\n");
    let Stmt::Let { init, .. } = &prog[0] else { panic!("expected LET") };
    // (1-2)-3, not 1-(2-3)
    let Expr::Binary { op: BinOp::Sub, lhs, .. } = init else { panic!("expected Sub at the top") };
    assert!(matches!(**lhs, Expr::Binary { op: BinOp::Sub, .. }));
}

#[test]
fn unary_sign_applies_to_primary() {
    let prog = stmts("LET a = -1\n");
    let Stmt::Let { init, .. } = &prog[0] else { panic!("expected LET") };
    assert!(matches!(init, Expr::Unary { op: UnaryOp::Minus, .. }));
}

#[test]
fn empty_if_body_parses() {
    let prog = stmts("IF 1==1 THEN\nENDIF\n");
    let Stmt::If { body, .. } = &prog[0] else { panic!("expected IF") };
    assert!(body.iter().all(|s| matches!(s, Stmt::Line(_))));
}

#[test]
fn empty_while_body_parses() {
    let prog = stmts("WHILE 1==1 REPEAT\nENDWHILE\n");
    assert!(matches!(&prog[0], Stmt::While { .. }));
}

#[test]
fn comparison_requires_an_operator() {
    let err = parse("IF 1 THEN\nENDIF\n").unwrap_err();
    assert!(err.to_string().contains("expected comparison operator"), "{}", err);
}

#[test]
fn comparisons_may_chain() {
    let prog = stmts("IF 1==1==2 THEN\nENDIF\n");
    let Stmt::If { cond, .. } = &prog[0] else { panic!("expected IF") };
    assert_eq!(cond.rest.len(), 2);
}

#[test]
fn if_requires_then() {
    let err = parse("IF 1==1\nENDIF\n").unwrap_err();
    assert!(err.to_string().contains("expected Then"), "{}", err);
}

#[test]
fn while_requires_repeat() {
    let err = parse("WHILE 1==1\nENDWHILE\n").unwrap_err();
    assert!(err.to_string().contains("expected Repeat"), "{}", err);
}

#[test]
fn unterminated_block_is_rejected() {
    let err = parse("WHILE 1==1 REPEAT\nPRINT 1\n").unwrap_err();
    assert!(err.to_string().contains("unterminated WHILE/ENDWHILE"), "{}", err);
}

#[test]
fn statements_end_at_a_newline() {
    let err = parse("LET a = 1 PRINT a\n").unwrap_err();
    assert!(err.to_string().contains("expected Newline"), "{}", err);
}

#[test]
fn blank_lines_are_skipped() {
    let prog = stmts("\n\n\nPRINT 1\n\n\nPRINT 2\n\n");
    assert_eq!(prog.len(), 2);
}

#[test]
fn invalid_statement_names_the_offender() {
    let err = parse("ENDIF\n").unwrap_err();
    assert!(err.to_string().contains("invalid statement at 'ENDIF'"), "{}", err);
}

#[test]
fn errors_carry_the_source_line() {
    let err = parse("PRINT 1\nPRINT 2\nIF 1 THEN\nENDIF\n").unwrap_err();
    assert!(err.to_string().contains("line 3"), "{}", err);
}

#[test]
fn parser_does_no_symbol_checking() {
    // use-before-assignment is the emitter's concern
    assert!(parse("PRINT nosuchvar\n").is_ok());
}
