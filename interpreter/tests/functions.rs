use flint_test::*;

flint_test!(call_with_arguments
  "fn add(a, b) { return a + b; } print add(1, 2);"
  stdout == "3\n"
);

flint_test!(arguments_arrive_in_declaration_order
  "fn show(a, b) { print a; print b; } show(1, 2);"
  stdout == "1\n2\n"
);

flint_test!(function_without_return_yields_nil
  "fn noop() {} print noop();"
  stdout == "nil\n"
);

flint_test!(bare_return_yields_nil
  "fn stop() { return; } print stop();"
  stdout == "nil\n"
);

flint_test!(expression_bodied_function
  "fn double(x) = x * 2; print double(4);"
  stdout == "8\n"
);

flint_test!(missing_arguments_are_padded_with_nil
  "fn show(a, b) { print a; print b; } show(1);"
  stdout == "1\nnil\n"
);

flint_test!(too_many_arguments_is_rejected
  "fn show(a) {} show(1, 2);"
  CompileError "too many arguments provided to function"
);

flint_test!(recursion_before_the_call_site_reads
  "fn fact(n) { if n < 2 { return 1; } return n * fact(n - 1); } print fact(5);"
  stdout == "120\n"
);

flint_test!(multiple_return_values_swap
  "fn swap(a, b) { return b, a; } var (p, q) = swap(1, 2); print p; print q;"
  stdout == "2\n1\n"
);

flint_test!(extra_destructuring_targets_get_nil
  "fn two() { return 1, 2; } var (a, b, c) = two(); print a; print b; print c;"
  stdout == "1\n2\nnil\n"
);

flint_test!(tuples_print_their_elements
  "fn two() { return 1, 2; } var t = two(); print t;"
  stdout == "(1, 2)\n"
);

flint_test!(functions_are_first_class_values
  "fn greet() { return \"hi\"; } var g = greet; print g;"
  stdout == "greet\n"
);

flint_test!(anonymous_functions_are_values
  "var f = fn (a) = a; print f;"
  stdout == "anonymous\n"
);

flint_test!(main_runs_after_the_static_chunk
  "
  print \"static\";
  fn main() { print \"entry\"; }
  "
  stdout == "static\nentry\n"
);

flint_test!(main_with_parameters_is_rejected
  "fn main(a) { print a; }"
  CompileError "main function cannot take arguments"
);

flint_test!(top_level_return_stops_the_program
  "print 1; return; print 2;"
  stdout == "1\n"
);

flint_test!(functions_read_enclosing_slots
  "var x = 1; fn read_x() { return x; } print read_x() is 1;"
  stdout == "true\n"
);

flint_test!(functions_see_earlier_declarations
  "fn late() { return 1; } fn early() { return late(); } print early();"
  stdout == "1\n"
);

flint_test!(forward_references_are_rejected
  "fn early() { return late(); } fn late() { return 1; }"
  CompileError "use of unknown identifier"
);

flint_test!(runaway_recursion_overflows
  "fn forever() { forever(); } forever();"
  RuntimeError "call stack overflow"
);
