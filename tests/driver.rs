use pdp2i86::driver::{Fallback, SkipAt};
use pdp2i86::{translate_source, DriverError, Skip, TranslateError, Translator};
use pretty_assertions::assert_eq;

const HELLO: &str = "\
.globl _main
.text
_main:
~L1:
\tmov r5, -(sp)
\tjsr pc, *$_puts
\thalt
.data
L2:.byte 150, 151, 12, 0
";

#[test]
fn translates_a_file_line_by_line() {
    let mut out = Vec::new();
    let summary = translate_source(HELLO, &Translator::default(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "\
.extern _main
.sect .text
_main:
! ~L1:
push bp
call _puts
! \thalt
.sect .data
L2: .data1 0x68, 0x69, 0x0a, 0x00
"
    );
    assert_eq!(summary.lines, 9);
    assert_eq!(summary.translated, 7);
    assert_eq!(
        summary.fallbacks,
        vec![
            Fallback {
                line_no: 4,
                text: "~L1:".into()
            },
            Fallback {
                line_no: 7,
                text: "\thalt".into()
            },
        ]
    );
    assert_eq!(
        summary.skips,
        vec![SkipAt {
            line_no: 7,
            skip: Skip::UnknownToken {
                token: "halt".into()
            }
        }]
    );
}

#[test]
fn lines_do_not_depend_on_each_other() {
    let tr = Translator::default();
    let mut joined = Vec::new();
    translate_source("mov r0, r1\ntst (sp)+\n", &tr, &mut joined).unwrap();
    let mut first = Vec::new();
    translate_source("tst (sp)+\n", &tr, &mut first).unwrap();
    assert!(String::from_utf8(joined)
        .unwrap()
        .ends_with(&String::from_utf8(first).unwrap()));
}

#[test]
fn crlf_input() {
    let mut out = Vec::new();
    translate_source("tst r0\r\n\r\n", &Translator::default(), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "cmp ax, #0\n! \n");
}

#[test]
fn fatal_line_stops_the_run() {
    let mut out = Vec::new();
    let err = translate_source(
        "mov r0, r1\nmov $5, (r1)+\ninc r0\n",
        &Translator::default(),
        &mut out,
    )
    .unwrap_err();
    match err {
        DriverError::Translate {
            line_no,
            source: TranslateError::UnsupportedMode { line, .. },
        } => {
            assert_eq!(line_no, 2);
            assert_eq!(line, "mov $5, (r1)+");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(String::from_utf8(out).unwrap(), "mov dx, ax\n");
}

#[test]
fn empty_source() {
    let mut out = Vec::new();
    let summary = translate_source("", &Translator::default(), &mut out).unwrap();
    assert!(out.is_empty());
    assert_eq!(summary.lines, 0);
}
