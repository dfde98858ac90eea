use hansen::{
    ast::Position,
    codegen::{self, LITERAL_POOL_INTERVAL},
    compile,
    emit_assembly,
    error::{CodegenError, Error},
    interpreter::symbol_table::SymbolTable,
};

fn asm(source: &str) -> String {
    emit_assembly(source).unwrap_or_else(|e| panic!("Codegen failed: {e}"))
}

fn lines(asm: &str) -> Vec<&str> {
    asm.lines().map(str::trim).filter(|line| !line.is_empty()).collect()
}

#[test]
fn empty_frame_program_layout() {
    let out = asm("begin print 42 end");

    assert_eq!(lines(&out),
               vec![".data",
                    "ifmt:\t.asciz \"%d\"",
                    "sfmt:\t.asciz \"%s\"",
                    ".text",
                    ".align 2",
                    ".global main",
                    "main:",
                    "push {fp, lr}",
                    "mov fp, sp",
                    "ldr r0, =42",
                    "mov r1, r0",
                    "ldr r0, =ifmt",
                    "bl printf",
                    "mov r0, #0",
                    "mov sp, fp",
                    "pop {fp, pc}",
                    ".ltorg"]);
}

#[test]
fn frame_is_rounded_to_eight_bytes_and_zeroed() {
    let out = asm("begin variable a; variable b; variable c end");

    assert!(out.contains("\tldr r1, =16\n\tsub sp, sp, r1\n\tmov r0, #0\n"));
    assert!(out.contains("\tstr r0, [fp, #-4]\n\tstr r0, [fp, #-8]\n\tstr r0, [fp, #-12]\n"));
}

#[test]
fn binary_operations_use_the_stack_for_the_left_operand() {
    let out = asm("begin variable x; x := x - 1 end");

    assert!(out.contains("\tldr r0, [fp, #-4]\n\tpush {r0}\n\tldr r0, =1\n\tmov r1, r0\n\tpop {r0}\n\tsub r0, r0, r1\n\tstr r0, [fp, #-4]\n"));
}

#[test]
fn division_guards_against_a_zero_divisor() {
    let out = asm("begin print 7 / 2 end");

    assert!(out.contains("\tmov r1, r0\n\tpop {r0}\n\tcmp r1, #0\n\tbeq div_zero\n\tbl __aeabi_idiv\n"));
    assert!(out.contains("div_msg:\t.asciz \"Division by zero.\\n\"\n"));
    assert!(out.contains("div_zero:\n\tmov r0, #2\n\tldr r1, =div_msg\n\tmov r2, #18\n\tbl write\n\tmov r0, #5\n\tbl exit\n"));
}

#[test]
fn programs_without_division_have_no_handler() {
    let out = asm("begin variable x; x := 6 * 7 - 1; print x end");

    assert!(!out.contains("div_zero"));
    assert!(!out.contains("div_msg"));
}

#[test]
fn conditions_never_materialize_a_value() {
    let out = asm("begin variable x; if x + 1 < x * 2 then x := 1 end");

    assert!(!out.contains("1f"));
    assert!(!out.contains("mov r0, #1\n"));
    assert!(out.contains("\tcmp r0, r1\n\tbge else_0\n"));
}

#[test]
fn literal_pools_follow_unconditional_branches() {
    let out = asm("begin variable i; while i < 3 do i := i + 1; if i = 3 then print i end");

    assert!(out.contains("\tb begin_0\n\t.ltorg\nend_0:\n"));
    assert!(out.contains("\tb end_1\n\t.ltorg\nelse_1:\n"));
    assert!(out.ends_with("\tpop {fp, pc}\n\t.ltorg\n"));
}

#[test]
fn long_straight_line_code_gets_intermediate_pools() {
    let body = ["print 1"; 300].join("; ");
    let out = asm(&format!("begin {body} end"));

    assert!(out.contains("\tb pool_0\n\t.ltorg\npool_0:\n"));

    let mut run = 0;
    for line in out.lines() {
        if line == "\t.ltorg" {
            run = 0;
        } else if line.starts_with('\t') && !line.starts_with("\t.") {
            run += 1;
        }
        assert!(run <= LITERAL_POOL_INTERVAL, "{run} instructions without a literal pool");
    }
}

#[test]
fn while_loop_branches_on_inverse_condition() {
    let out = asm("begin variable i; while i < 3 do i := i + 1 end");

    assert!(out.contains("begin_0:\n"));
    assert!(out.contains("\tcmp r0, r1\n\tbge end_0\n"));
    assert!(out.contains("\tb begin_0\n\t.ltorg\nend_0:\n"));
}

#[test]
fn if_else_gets_its_own_labels() {
    let out = asm(r#"begin variable x; if x = 0 then print "zero" else print "other"; while x <> 0 do x := 0 end"#);

    assert!(out.contains("\tbne else_0\n"));
    assert!(out.contains("\tb end_0\n\t.ltorg\nelse_0:\n"));
    assert!(out.contains("\tbeq end_1\n"));
}

#[test]
fn strings_are_deduplicated_and_escaped() {
    let out = asm("begin print \"back\\slash\ttab\"; print \"line\\n\"; print \"line\\n\" end");

    assert!(out.contains("str_0:\t.asciz \"back\\\\slash\\ttab\"\n"));
    assert!(out.contains("str_1:\t.asciz \"line\\n\"\n"));
    assert!(!out.contains("str_2:"));
}

#[test]
fn literal_wider_than_32_bits_is_rejected() {
    let err = emit_assembly("begin print 2147483648 end").unwrap_err();

    assert!(matches!(err,
                     Error::Codegen(CodegenError::LiteralOutOfRange { value: 2_147_483_648,
                                                                      position })
                     if position == Position::new(1, 13)));
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn largest_32_bit_literal_is_accepted() {
    assert!(asm("begin print 2147483647 end").contains("ldr r0, =2147483647"));
}

#[test]
fn variables_need_a_slot() {
    let (program, _) = compile("begin variable x; x := 1 end").unwrap();

    let err = codegen::emit_assembly(&program, &SymbolTable::new()).unwrap_err();

    assert_eq!(err,
               CodegenError::UnknownVariable { name:     "x".into(),
                                               position: Position::new(1, 19), });
}
