use uniscript_core::{
    CompileError, Dialect, Transform, TransformError, UniscriptCompiler, compile,
};

const COUNTER_APP: &str = r#"
<!uniscript main, us, content = <
    config target = "mobile"
    config title = "Counter"
    declare count = 0
    declare label = "Clicks: "
    use "theme" on "head"
    config execution = {
        start: "layout"
        then: "theme"
        then: "logic"
        end: "missing"
    }
>>;

<!uniscript layout, html, content = <
    <div id="value">0</div>
    <button id='inc'>+</button>
>>;

<!uniscript theme, css, content = <
    import "inc" from "layout";
    #inc { font-size: 2em; }
    #value { color: gray; }
>>;

<!uniscript logic, js, content = <
    import "value" from "layout";
    import "inc" from "layout";
    inc.onclick = () => { count++; value.textContent = label + count; };
>>;
"#;

#[test]
fn compiles_full_document() {
    let html = compile(COUNTER_APP).expect("compile");

    assert!(html.starts_with("<!DOCTYPE html><html><head><meta charset=\"UTF-8\">\n"));
    assert!(html.contains("<title>Counter</title>"));
    assert!(html.contains("width: 360px"));
    assert!(html.contains("<script>\nwindow.count = 0;\nwindow.label = \"Clicks: \";\n</script>\n"));
    assert!(html.ends_with("</body></html>"));
}

#[test]
fn html_ids_are_namespaced_by_block() {
    let html = compile(COUNTER_APP).expect("compile");
    assert!(html.contains(r#"<div id="layout_value">0</div>"#));
    assert!(html.contains(r#"<button id="layout_inc">+</button>"#));
    assert!(!html.contains(r#"id="value""#));
    assert!(!html.contains("id='inc'"));
}

#[test]
fn css_imports_target_other_blocks_and_disappear() {
    let html = compile(COUNTER_APP).expect("compile");
    assert!(html.contains("#layout_inc { font-size: 2em; }"));
    assert!(html.contains("#value { color: gray; }"));
    assert!(!html.contains("import \"inc\""));
}

#[test]
fn head_placed_blocks_follow_preamble_and_body_keeps_sequence_order() {
    let html = compile(COUNTER_APP).expect("compile");
    let (head, body) = html.split_once("</head>").expect("head section");

    let globals = head.find("window.count").expect("globals in head");
    let style = head.find("<style>\n").expect("theme style in head");
    assert!(head.contains("#layout_inc"));
    assert!(globals < style);

    let layout = body.find("layout_value").expect("layout in body");
    let logic = body
        .find("var value = document.getElementById(\"layout_value\")")
        .expect("logic in body");
    assert!(layout < logic);
    assert!(body.contains("var inc = document.getElementById(\"layout_inc\")"));
}

#[test]
fn declarations_precede_block_scripts() {
    let html = compile(COUNTER_APP).expect("compile");
    let globals = html.find("window.count = 0;").expect("globals");
    let first_block_script = html.find("var value").expect("block script");
    assert!(globals < first_block_script);
}

#[test]
fn missing_sequence_entries_are_skipped() {
    let html = compile(COUNTER_APP).expect("compile");
    assert!(!html.contains("missing"));
}

#[test]
fn stray_quote_in_main_keeps_later_directives() {
    let source = r#"
<!uniscript main, us, content = <
    // note: 5" screen
    config execution = { start: "box" }
>>;
<!uniscript box, html, content = <<p>boxed</p>>>;
"#;
    let html = compile(source).expect("compile");
    let body = &html[html.find("<body>").expect("body")..];
    assert!(body.contains("<p>boxed</p>"));
}

#[test]
fn missing_main_fails_regardless_of_content() {
    for source in [
        "",
        "plain text",
        "<!uniscript layout, html, content = <x>>;",
        "<!uniscript Main, html, content = <x>>;",
    ] {
        let err = compile(source).unwrap_err();
        assert!(matches!(err, CompileError::MissingEntryPoint), "{source:?}");
    }
}

#[test]
fn html_main_short_circuits() {
    let source = "<!uniscript main, html, content = <<h1 id=\"t\">Hi</h1>>>;\n\
                  <!uniscript other, py, content = <print(1)>>;";
    assert_eq!(compile(source).expect("compile"), "<h1 id=\"t\">Hi</h1>");
}

#[test]
fn repeated_compiles_are_identical() {
    let mut compiler = UniscriptCompiler::new();
    let first = compiler.compile(COUNTER_APP).expect("first");
    let second = compiler.compile(COUNTER_APP).expect("second");
    assert_eq!(first, second);
}

#[test]
fn no_state_leaks_between_sources() {
    let mut compiler = UniscriptCompiler::new();
    compiler.compile(COUNTER_APP).expect("first");
    let bare = compiler
        .compile("<!uniscript main, us, content = <config execution = { start: \"layout\" }>>;")
        .expect("second");
    assert!(!bare.contains("layout_value"));
    assert!(bare.contains("<title>Uniscript App</title>"));
}

const PYTHON_APP: &str = r#"
<!uniscript main, us, content = <
    config execution = { start: "panel" then: "app" }
>>;
<!uniscript panel, html, content = <<p id="out"></p>>>;
<!uniscript app, py, content = <
    >
    import "out" from "panel";
    out.text = "hello"
>>;
"#;

#[test]
fn python_blocks_pull_in_runtime() {
    let html = compile(PYTHON_APP).expect("compile");
    assert!(html.contains("<body onload=\"brython()\">"));
    assert_eq!(html.matches("<script src=\"https://cdn.jsdelivr.net/npm/brython@3/").count(), 2);
    assert!(html.contains(
        "<script type=\"text/python\">\nfrom browser import document, window, alert\n\
         out = document[\"panel_out\"]\n"
    ));
}

#[test]
fn python_runtime_absent_without_python_blocks() {
    let html = compile(COUNTER_APP).expect("compile");
    assert!(!html.contains("onload"));
    assert!(!html.contains("brython"));
    assert!(html.contains("<body>"));
}

#[test]
fn python_block_outside_sequence_does_not_count() {
    let source = "<!uniscript main, us, content = <config title = \"x\">>;\
                  <!uniscript app, py, content = <print(1)>>;";
    let html = compile(source).expect("compile");
    assert!(!html.contains("brython"));
}

struct Uppercase;

impl Transform for Uppercase {
    fn transform(&self, dialect: Dialect, source: &str) -> Result<String, TransformError> {
        assert_eq!(dialect, Dialect::TypeScript);
        Ok(source.to_uppercase())
    }
}

struct Broken;

impl Transform for Broken {
    fn transform(&self, _dialect: Dialect, _source: &str) -> Result<String, TransformError> {
        Err(TransformError::msg("t.ts: Unexpected token (1:8)"))
    }
}

const TS_APP: &str = r#"
<!uniscript main, us, content = < config execution = { start: "typed" } >>;
<!uniscript typed, ts, content = < let total: number = 1; >>;
"#;

#[test]
fn ts_blocks_use_injected_transform() {
    let mut compiler = UniscriptCompiler::with_transform(Uppercase);
    let html = compiler.compile(TS_APP).expect("compile");
    assert!(html.contains("<script>\nCONST INFO = { LANG: \"TS\" };\nLET TOTAL: NUMBER = 1;\n</script>\n"));
}

#[test]
fn transform_failure_aborts_compile() {
    let mut compiler = UniscriptCompiler::with_transform(Broken);
    let err = compiler.compile(TS_APP).unwrap_err();
    assert!(matches!(err, CompileError::Transform(_)));
    assert_eq!(err.to_string(), "t.ts: Unexpected token (1:8)");
}
