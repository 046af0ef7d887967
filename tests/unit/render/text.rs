use super::*;

const Y: Color = Color::rgb(250, 204, 21);

fn unit_text(unit: &[(char, Color)]) -> String {
    unit.iter().map(|(c, _)| *c).collect()
}

#[test]
fn words_keep_trailing_whitespace() {
    let units = words(&[("hello big  world", Color::WHITE)]);
    let texts: Vec<String> = units.iter().map(|u| unit_text(u)).collect();
    assert_eq!(texts, vec!["hello ", "big  ", "world"]);
}

#[test]
fn a_word_may_span_colored_runs() {
    let units = words(&[("pre", Color::WHITE), ("fix rest", Y)]);
    assert_eq!(units.len(), 2);
    assert_eq!(unit_text(&units[0]), "prefix ");
    assert_eq!(units[0][0].1, Color::WHITE);
    assert_eq!(units[0][3].1, Y);
    assert_eq!(unit_text(&units[1]), "rest");
}

#[test]
fn newline_becomes_an_empty_break_unit() {
    let units = words(&[("one\ntwo", Color::WHITE)]);
    let texts: Vec<String> = units.iter().map(|u| unit_text(u)).collect();
    assert_eq!(texts, vec!["one", "", "two"]);
}

#[test]
fn empty_runs_produce_nothing() {
    assert!(words(&[]).is_empty());
    assert!(words(&[("", Color::WHITE)]).is_empty());
}
