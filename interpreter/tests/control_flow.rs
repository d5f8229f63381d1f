use flint_test::*;

flint_test!(if_takes_the_true_branch
  "if 1 < 2 { print \"yes\"; } else { print \"no\"; }"
  stdout == "yes\n"
);

flint_test!(if_takes_the_else_branch
  "if nil { print \"yes\"; } else { print \"no\"; }"
  stdout == "no\n"
);

flint_test!(if_without_else_falls_through
  "if false { print \"skipped\"; } print \"after\";"
  stdout == "after\n"
);

flint_test!(if_expression_selects_a_value
  "var y = if 1 < 2 do \"yes\" else \"no\"; print y;"
  stdout == "yes\n"
);

flint_test!(if_expression_requires_do
  "var y = if true \"yes\" else \"no\";"
  CompileError "expected do keyword after if condition"
);

flint_test!(while_counts_up
  "var x = 0; while x < 10 { x += 1; } print x;"
  stdout == "10\n"
);

flint_test!(while_false_never_runs
  "var x = 0; while false { x += 1; } print x;"
  stdout == "0\n"
);

flint_test!(break_leaves_the_loop
  "var x = 0; while true { x++; if x == 5 { break; } } print x;"
  stdout == "5\n"
);

flint_test!(continue_skips_to_the_condition
  "
  var total = 0;
  var i = 0;
  while i < 10 {
    i++;
    if i % 2 == 1 { continue; }
    total += i;
  }
  print total;
  "
  stdout == "30\n"
);

flint_test!(break_outside_a_loop_is_rejected
  "break;"
  CompileError "break statement cannot be used outside of a loop"
);

flint_test!(continue_outside_a_loop_is_rejected
  "continue;"
  CompileError "continue statement cannot be used outside of a loop"
);

flint_test!(switch_matches_a_case
  "var x = 2; switch x { case 1: print \"a\"; case 2: print \"b\"; default: print \"c\"; }"
  stdout == "b\n"
);

flint_test!(switch_falls_back_to_default
  "var x = 5; switch x { case 1: print \"a\"; case 2: print \"b\"; default: print \"c\"; }"
  stdout == "c\n"
);

flint_test!(switch_default_may_appear_mid_statement
  "var x = 9; switch x { case 1: print \"a\"; default: print \"d\"; case 9: print \"nine\"; }"
  stdout == "nine\n"
);

flint_test!(switch_default_mid_statement_still_catches
  "var x = 2; switch x { case 1: print \"a\"; default: print \"d\"; case 9: print \"nine\"; }"
  stdout == "d\n"
);

flint_test!(switch_case_bodies_take_several_statements
  "
  switch 1 {
    case 1:
      var doubled = 2;
      print doubled;
      print \"done\";
  }
  "
  stdout == "2\ndone\n"
);

flint_test!(duplicate_default_is_rejected
  "switch 1 { default: print 1; default: print 2; }"
  CompileError "duplicate default label"
);

flint_test!(and_yields_a_boolean
  "print 1 and 2; print 1 and nil;"
  stdout == "true\nfalse\n"
);

flint_test!(or_yields_the_first_truthy_operand
  "print false or \"x\"; print nil or false;"
  stdout == "x\nfalse\n"
);

flint_test!(is_compares_type_tags
  "print 1 is 2; print 1 is \"a\"; print nil is nil;"
  stdout == "true\nfalse\ntrue\n"
);
