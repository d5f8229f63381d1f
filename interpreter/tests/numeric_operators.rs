use flint_test::*;

flint_test!(addition
  "print 1 + 2;"
  stdout == "3\n"
);

flint_test!(precedence_with_power
  "print 2 + 3 * 4 ^ 2;"
  stdout == "50\n"
);

flint_test!(power_binds_tighter_than_unary_result
  "print 2 * 3 ^ 2;"
  stdout == "18\n"
);

flint_test!(power_is_right_associative
  "print 2 ^ 3 ^ 2;"
  stdout == "512\n"
);

flint_test!(division_produces_fractions
  "print 1 / 2;"
  stdout == "0.5\n"
);

flint_test!(modulo
  "print 7 % 3;"
  stdout == "1\n"
);

flint_test!(unary_minus
  "print -3 + 5;"
  stdout == "2\n"
);

flint_test!(grouping_overrides_precedence
  "print (1 + 2) * 3;"
  stdout == "9\n"
);

flint_test!(comparisons_print_booleans
  "print 1 < 2; print 2 > 3;"
  stdout == "true\nfalse\n"
);

flint_test!(equality_on_numbers
  "print 1 == 1; print 1 != 2;"
  stdout == "true\ntrue\n"
);

flint_test!(not_negates_truthiness
  "print !nil; print !0;"
  stdout == "true\nfalse\n"
);

flint_test!(folding_matches_runtime_evaluation
  "var a = 2; var b = 3; print 2 * 3 + 1; print a * b + 1;"
  stdout == "7\n7\n"
);

flint_test!(mixed_operand_addition_fails
  "print 1 + true;"
  RuntimeError "invalid operands to binary expression"
);

flint_test!(modulo_requires_numbers
  "print \"a\" % 2;"
  RuntimeError "operands to binary expression must be numbers"
);

flint_test!(power_requires_numbers
  "print true ^ 2;"
  RuntimeError "operands to binary expression must be numbers"
);

flint_test!(negating_a_boolean_fails
  "print -true;"
  RuntimeError "negation operand must be a number"
);
