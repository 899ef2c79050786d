use pdp2i86::{Skip, Translator};
use pretty_assertions::assert_eq;

fn tr(line: &str) -> String {
    Translator::default().translate_line(line).unwrap().render()
}

#[test]
fn indirect_call_idiom() {
    assert_eq!(tr("jsr r5, *$target"), "call target");
    assert_eq!(tr("\tjsr\tpc,*$_printf"), "call _printf");
}

#[test]
fn register_direct_call() {
    assert_eq!(tr("jsr pc, _exit"), "call _exit");
}

#[test]
fn call_target_is_consumed() {
    let line = Translator::default().translate_line("jsr pc, _f").unwrap();
    assert!(line.skipped.is_empty());
}

#[test]
fn unmatched_call_shapes_are_skipped() {
    for src in [
        "jsr foo",
        "jsr r5 _f",
        "jsr pc, *(r1)",
        "jsr pc,",
        "jsr pc, (r1)",
        "jsr pc, $foo",
        "jsr pc, r1",
    ] {
        let line = Translator::default().translate_line(src).unwrap();
        assert!(!line.written, "{src}");
        assert_eq!(line.skipped.first(), Some(&Skip::MalformedCall), "{src}");
    }
}
