use flint_test::*;

flint_test!(line_comments_are_ignored
  "
  // a leading comment
  print 1; // a trailing comment
  // a closing comment
  "
  stdout == "1\n"
);

flint_test!(block_comments_are_ignored
  "print /* inline */ 1; /* spanning
  several
  lines */ print 2;"
  stdout == "1\n2\n"
);

flint_test!(unterminated_block_comment_is_rejected
  "print 1; /* never closed"
  CompileError "multiline comment is not terminated"
);

flint_test!(comment_only_source_is_a_valid_program
  "// nothing to do"
  stdout == ""
);
