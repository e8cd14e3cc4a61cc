//! Tests for the notation tokenizer and link resolver.

use super::*;
use crate::error::NotationError;

fn links_of(input: &str) -> Vec<(usize, usize)> {
    let (_, resolution) = resolve_str(input).unwrap();
    resolution.links.iter().map(|l| (l.sender, l.receiver)).collect()
}

// =============================================================================
// TOKENIZER TESTS
// =============================================================================

#[test]
fn tokenize_produces_one_token_per_character() {
    for input in ["", "3", "441", "[12]", "[34]1[5]2", "ab[c]"] {
        let tokens = tokenize(input);
        assert_eq!(tokens.len(), input.chars().count(), "input {input:?}");
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.position, i);
        }
    }
}

#[test]
fn tokenize_ungrouped_digits_are_senders_and_receivers() {
    let tokens = tokenize("12");
    assert_eq!(tokens[0].capabilities, Capabilities::BOTH);
    assert_eq!(tokens[0].group_id, 0);
    assert_eq!(tokens[0].value, Some(1));
    assert_eq!(tokens[1].capabilities, Capabilities::BOTH);
    assert_eq!(tokens[1].group_id, 1);
    assert_eq!(tokens[1].value, Some(2));
    assert!(tokens.iter().all(|t| !t.in_group));
}

#[test]
fn tokenize_group_classification() {
    let tokens = tokenize("[12]");
    assert_eq!(tokens[0].kind, TokenKind::GroupOpen);
    assert!(tokens[0].is_receiver());
    assert!(!tokens[0].is_sender());
    assert_eq!(tokens[0].group_id, 0);

    for token in &tokens[1..3] {
        assert_eq!(token.kind, TokenKind::Digit);
        assert!(token.is_sender());
        assert!(!token.is_receiver());
        assert!(token.in_group);
        assert_eq!(token.group_id, 0);
    }
    assert_eq!(tokens[1].value, Some(1));
    assert_eq!(tokens[2].value, Some(2));

    assert_eq!(tokens[3].kind, TokenKind::GroupClose);
    assert_eq!(tokens[3].capabilities, Capabilities::NONE);
    assert_eq!(tokens[3].group_id, 0);
    assert!(!tokens[3].in_group);
}

#[test]
fn tokenize_digit_after_group_starts_its_own_group() {
    let tokens = tokenize("[3]4");
    assert_eq!(tokens[3].group_id, 3);
    assert!(!tokens[3].in_group);
    assert_eq!(tokens[3].capabilities, Capabilities::BOTH);
}

#[test]
fn tokenize_second_group_takes_its_bracket_position() {
    let tokens = tokenize("1[23]4[5]");
    assert_eq!(tokens[2].group_id, 1);
    assert_eq!(tokens[3].group_id, 1);
    assert_eq!(tokens[7].group_id, 6);
}

#[test]
fn tokenize_parses_base36_in_either_case() {
    let tokens = tokenize("azAZ9");
    let values: Vec<Option<u32>> = tokens.iter().map(|t| t.value).collect();
    assert_eq!(values, vec![Some(10), Some(35), Some(10), Some(35), Some(9)]);
}

#[test]
fn tokenize_keeps_invalid_characters_without_value() {
    let tokens = tokenize("1?");
    assert_eq!(tokens[1].kind, TokenKind::Digit);
    assert_eq!(tokens[1].value, None);
    assert!(tokens[1].is_sender());
}

#[test]
fn tokenize_is_stateless_between_calls() {
    let first = tokenize("[12");
    let second = tokenize("3");
    assert_eq!(first.len(), 3);
    assert!(!second[0].in_group);
    assert_eq!(second[0].group_id, 0);
}

// =============================================================================
// STRICT PARSE TESTS
// =============================================================================

#[test]
fn parse_accepts_valid_notation() {
    assert!(parse("").is_ok());
    assert!(parse("[]").is_ok());
    assert!(parse("[34]1[5]2").is_ok());
}

#[test]
fn parse_rejects_invalid_character() {
    let err = parse("12-3").unwrap_err();
    assert_eq!(err, NotationError::InvalidCharacter { character: '-', position: 2 });
    assert_eq!(err.position(), Some(2));
}

#[test]
fn parse_rejects_whitespace() {
    let err = parse("1 2").unwrap_err();
    assert_eq!(err, NotationError::InvalidCharacter { character: ' ', position: 1 });
}

#[test]
fn parse_rejects_nested_group() {
    assert_eq!(parse("[1[2]]").unwrap_err(), NotationError::NestedGroup { position: 2 });
}

#[test]
fn parse_rejects_unmatched_close() {
    assert_eq!(parse("12]").unwrap_err(), NotationError::UnmatchedClose { position: 2 });
}

#[test]
fn parse_rejects_unclosed_group() {
    assert_eq!(parse("1[23").unwrap_err(), NotationError::UnclosedGroup { position: 1 });
}

#[test]
fn error_messages_name_character_and_position() {
    let err = parse("4x").unwrap_err();
    assert_eq!(err.to_string(), "invalid character 'x' at position 1");
}

// =============================================================================
// RESOLVER TESTS
// =============================================================================

#[test]
fn resolve_two_ungrouped_digits() {
    let (_, resolution) = resolve_str("12").unwrap();
    assert_eq!(resolution.senders, vec![0, 1]);
    assert_eq!(resolution.receivers, vec![0, 1]);
    assert_eq!(links_of("12"), vec![(0, 1), (1, 1)]);
}

#[test]
fn resolve_single_group_targets_opening_bracket() {
    let (_, resolution) = resolve_str("[12]").unwrap();
    assert_eq!(resolution.senders, vec![1, 2]);
    assert_eq!(resolution.receivers, vec![0]);
    assert_eq!(links_of("[12]"), vec![(1, 0), (2, 0)]);
    assert!(resolution.links.iter().all(|l| l.receiver_index == 0));
}

#[test]
fn resolve_close_bracket_is_in_neither_list() {
    let (tokens, resolution) = resolve_str("[3]1").unwrap();
    let close = tokens.iter().find(|t| t.kind == TokenKind::GroupClose).unwrap();
    assert!(!resolution.senders.contains(&close.position));
    assert!(!resolution.receivers.contains(&close.position));
}

#[test]
fn resolve_lists_match_classification() {
    let (tokens, resolution) = resolve_str("[34]1[5]2").unwrap();
    let senders: Vec<usize> = tokens.iter().filter(|t| t.is_sender()).map(|t| t.position).collect();
    let receivers: Vec<usize> = tokens.iter().filter(|t| t.is_receiver()).map(|t| t.position).collect();
    assert_eq!(resolution.senders, senders);
    assert_eq!(resolution.receivers, receivers);
    assert_eq!(resolution.links.len(), senders.len());
}

#[test]
fn resolve_mixed_groups_wraps_around() {
    // receivers: [0, 4, 5, 8] (the two '[' and the ungrouped '1' and '2')
    let (_, resolution) = resolve_str("[34]1[5]2").unwrap();
    assert_eq!(resolution.receivers, vec![0, 4, 5, 8]);
    // '3' anchors at 0 (index 0): (0+3)%4 = 3 -> 8
    // '4' anchors at 0: (0+4)%4 = 0 -> 0
    // '1' anchors at 4 (index 1): (1+1)%4 = 2 -> 5
    // '5' anchors at 5 (index 2): (2+5)%4 = 3 -> 8
    // '2' anchors at 8 (index 3): (3+2)%4 = 1 -> 4
    assert_eq!(links_of("[34]1[5]2"), vec![(1, 8), (2, 0), (4, 5), (6, 8), (8, 4)]);
}

#[test]
fn resolve_zero_value_is_self_link() {
    assert_eq!(links_of("30"), vec![(0, 1), (1, 1)]);
}

#[test]
fn resolve_large_value_wraps_many_times() {
    // 'z' = 35, three receivers: (0+35)%3 = 2
    assert_eq!(links_of("z00"), vec![(0, 2), (1, 1), (2, 2)]);
}

#[test]
fn resolve_is_deterministic() {
    let a = resolve_str("[34]1[5]2").unwrap();
    let b = resolve_str("[34]1[5]2").unwrap();
    assert_eq!(a, b);
}

#[test]
fn resolve_empty_group_has_no_links() {
    let (tokens, resolution) = resolve_str("[]").unwrap();
    assert_eq!(tokens.len(), 2);
    assert!(resolution.senders.is_empty());
    assert_eq!(resolution.receivers, vec![0]);
    assert!(resolution.links.is_empty());
}

#[test]
fn resolve_empty_input() {
    let (tokens, resolution) = resolve_str("").unwrap();
    assert!(tokens.is_empty());
    assert_eq!(resolution, Resolution::default());
}

#[test]
fn resolve_reports_undefined_value_in_lenient_tokens() {
    let tokens = tokenize("1?");
    let err = resolve(&tokens).unwrap_err();
    assert_eq!(err, NotationError::UndefinedValue { character: '?', position: 1 });
}

#[test]
fn resolve_guards_empty_receivers() {
    let tokens = vec![Token {
        character: '1',
        value: Some(1),
        position: 0,
        kind: TokenKind::Digit,
        capabilities: Capabilities::SENDER,
        group_id: 0,
        in_group: false,
    }];
    assert_eq!(resolve(&tokens).unwrap_err(), NotationError::EmptyReceivers { senders: 1 });
}

#[test]
fn resolve_reports_missing_anchor() {
    let mut tokens = tokenize("[1]2");
    tokens[1].group_id = 2;
    assert_eq!(
        resolve(&tokens).unwrap_err(),
        NotationError::AnchorNotReceiver { position: 1, anchor: 2 }
    );
}

#[test]
fn resolve_lenient_unbalanced_input_still_resolves() {
    // A stray ']' is neither sender nor receiver; the digits stay ungrouped.
    let tokens = tokenize("1]1");
    let resolution = resolve(&tokens).unwrap();
    assert_eq!(resolution.receivers, vec![0, 2]);
    let links: Vec<(usize, usize)> = resolution.links.iter().map(|l| (l.sender, l.receiver)).collect();
    assert_eq!(links, vec![(0, 2), (2, 0)]);
}

#[test]
fn wrap_stays_within_receiver_list() {
    assert_eq!(resolve::wrap(0, 35, 3), 2);
    assert_eq!(resolve::wrap(2, 35, 3), 1);
    assert_eq!(resolve::wrap(1, 0, 2), 1);
    assert_eq!(resolve::wrap(0, usize::MAX, 4), usize::MAX % 4);
}
