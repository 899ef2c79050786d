use pdp2i86::{AddrMode, Features, TranslateError, Translator, TranslatorConfig};
use pretty_assertions::assert_eq;

fn tr(line: &str) -> String {
    Translator::default().translate_line(line).unwrap().render()
}

fn without(f: Features) -> Translator {
    Translator::new(TranslatorConfig {
        features: Features::STANDARD - f,
        ..TranslatorConfig::default()
    })
}

fn mode_of(err: TranslateError) -> AddrMode {
    let TranslateError::UnsupportedMode { mode, .. } = err;
    mode
}

#[test]
fn mov_to_predecremented_sp_is_push() {
    assert_eq!(tr("mov r0, -(sp)"), "push ax");
    assert_eq!(tr("mov r5, -(sp)"), "push bp");
}

#[test]
fn mov_to_stack_top_replaces_it() {
    assert_eq!(tr("mov r0, (sp)"), "add sp, #2; push ax");
}

#[test]
fn pushed_immediates_go_through_scratch() {
    assert_eq!(tr("mov $12, -(sp)"), "mov bx, #0xa; push bx");
    assert_eq!(tr("mov $_msg, (sp)"), "add sp, #2; mov bx, #_msg; push bx");
}

#[test]
fn pushed_indirect_sources_go_through_scratch() {
    assert_eq!(tr("mov (sp), -(sp)"), "mov bx, sp; mov bx, (bx); push bx");
    assert_eq!(tr("mov 4(r5), -(sp)"), "mov bx, 4(bp); push bx");
    assert_eq!(tr("mov (r3), -(sp)"), "mov bx, (si); push bx");
    assert_eq!(tr("mov 2(r1), -(sp)"), "mov bx, dx; mov bx, 2(bx); push bx");
}

#[test]
fn tst_on_stack_adjusts_sp() {
    assert_eq!(tr("tst (sp)+"), "add sp, #2");
    assert_eq!(tr("tst -(sp)"), "sub sp, #2");
    assert_eq!(tr("tst (sp)"), "cmp (sp), #0");
}

#[test]
fn double_pop_compare_collapses() {
    assert_eq!(tr("cmp (sp)+, (sp)+"), "add sp, #4");
}

#[test]
fn pops_and_other_side_effects_are_rejected() {
    let tr = Translator::default();
    assert_eq!(
        mode_of(tr.translate_line("mov (sp)+, r0").unwrap_err()),
        AddrMode::AutoIncrement
    );
    assert_eq!(
        mode_of(tr.translate_line("mov r0, -(r1)").unwrap_err()),
        AddrMode::AutoDecrement
    );
    assert_eq!(
        mode_of(tr.translate_line("mov -(r1), r0").unwrap_err()),
        AddrMode::AutoDecrement
    );
    assert_eq!(
        mode_of(tr.translate_line("cmp (sp)+, r0").unwrap_err()),
        AddrMode::AutoIncrement
    );
}

#[test]
fn narrower_variants() {
    let line = |t: &Translator, s: &str| t.translate_line(s).unwrap().render();

    let t = without(Features::PUSH_IDIOM);
    assert_eq!(line(&t, "mov r0, (sp)"), "mov (sp), ax");
    assert!(t.translate_line("mov r0, -(sp)").is_err());

    let t = without(Features::SCRATCH_SOURCE);
    assert_eq!(line(&t, "cmp $5, r0"), "cmp #5, ax");
    assert_eq!(line(&t, "mov (r0), -(sp)"), "push (ax)");

    let t = without(Features::STACK_TST);
    assert_eq!(line(&t, "tst (sp)+"), "cmp (sp), #0");

    let t = without(Features::CMP_POP);
    assert!(t.translate_line("cmp (sp)+, (sp)+").is_err());
}
