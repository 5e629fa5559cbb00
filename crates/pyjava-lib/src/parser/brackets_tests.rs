use super::brackets::{Bracket, BracketStack};

#[test]
fn bracket_from_char() {
    assert_eq!(Bracket::from_open('('), Some(Bracket::Paren));
    assert_eq!(Bracket::from_open('<'), Some(Bracket::Angle));
    assert_eq!(Bracket::from_open(')'), None);
    assert_eq!(Bracket::from_close(']'), Some(Bracket::Square));
    assert_eq!(Bracket::from_close('}'), Some(Bracket::Curly));
    assert_eq!(Bracket::from_close('x'), None);
}

#[test]
fn empty_stack_counts_as_top_level() {
    let stack = BracketStack::new();
    assert_eq!(stack.top(), None);
    assert_eq!(stack.depth(), 0);
    assert!(stack.in_curly_brackets_or_none());
    assert!(!stack.in_parens_or_square_brackets());
}

#[test]
fn innermost_bracket_decides() {
    let mut stack = BracketStack::new();
    stack.enter('(');
    stack.enter('{');
    assert!(stack.in_curly_brackets());
    assert!(stack.in_curly_brackets_or_none());

    stack.enter('[');
    assert!(stack.in_square_brackets());
    assert!(stack.in_parens_or_square_brackets());

    stack.exit(']');
    stack.exit('}');
    assert!(stack.in_parens());
    assert_eq!(stack.depth(), 1);
}

#[test]
fn mismatched_close_is_ignored() {
    let mut stack = BracketStack::new();
    stack.enter('[');
    stack.exit(')');
    assert_eq!(stack.top(), Some(Bracket::Square));

    stack.exit(']');
    stack.exit(']');
    assert_eq!(stack.depth(), 0);
}

#[test]
fn non_bracket_chars_are_ignored() {
    let mut stack = BracketStack::new();
    stack.enter('x');
    assert_eq!(stack.depth(), 0);

    stack.enter('<');
    assert!(stack.in_angle_brackets());
}
